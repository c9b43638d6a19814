use crate::{BroadcastConfig, BroadcastMessage, Result as WsErrorResult};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

/// Manages broadcast channels for all boards
pub struct BoardBroadcaster {
    inner: Arc<RwLock<BroadcasterInner>>,
    config: BroadcastConfig,
}

struct BroadcasterInner {
    channels: HashMap<Uuid, BoardChannel>,
}

/// Per-board broadcast channel
pub(crate) struct BoardChannel {
    sender: broadcast::Sender<BroadcastMessage>,
    subscriber_count: usize,
}

impl BoardBroadcaster {
    pub fn new(config: BroadcastConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BroadcasterInner {
                channels: HashMap::new(),
            })),
            config,
        }
    }

    /// Subscribe to a board's broadcast channel
    pub async fn subscribe(&self, board_id: Uuid) -> broadcast::Receiver<BroadcastMessage> {
        let mut inner = self.inner.write().await;

        let channel = inner.channels.entry(board_id).or_insert_with(|| {
            let (sender, _) = broadcast::channel(self.config.channel_capacity);
            log::info!("Created broadcast channel for board {}", board_id);
            BoardChannel {
                sender,
                subscriber_count: 0,
            }
        });

        channel.subscriber_count += 1;
        let receiver = channel.sender.subscribe();

        log::debug!(
            "Client subscribed to board {} broadcast ({} total subscribers)",
            board_id,
            channel.subscriber_count
        );

        receiver
    }

    /// Unsubscribe from a board's broadcast channel
    pub async fn unsubscribe(&self, board_id: Uuid) {
        let mut inner = self.inner.write().await;

        if let Some(channel) = inner.channels.get_mut(&board_id) {
            channel.subscriber_count = channel.subscriber_count.saturating_sub(1);

            log::debug!(
                "Client unsubscribed from board {} broadcast ({} remaining subscribers)",
                board_id,
                channel.subscriber_count
            );

            // Clean up empty channels
            if channel.subscriber_count == 0 {
                inner.channels.remove(&board_id);
                log::info!("Removed empty broadcast channel for board {}", board_id);
            }
        }
    }

    /// Broadcast a message to all subscribers of a board
    pub async fn broadcast(
        &self,
        board_id: Uuid,
        message: BroadcastMessage,
    ) -> WsErrorResult<usize> {
        let inner = self.inner.read().await;

        if let Some(channel) = inner.channels.get(&board_id) {
            match channel.sender.send(message) {
                Ok(receiver_count) => {
                    log::debug!(
                        "Broadcast message to board {} ({} receivers)",
                        board_id,
                        receiver_count
                    );
                    Ok(receiver_count)
                }
                Err(_) => {
                    // No active receivers - channel exists but no one listening
                    log::debug!("Broadcast to board {} had no active receivers", board_id);
                    Ok(0)
                }
            }
        } else {
            // No channel for this board - no subscribers yet
            log::debug!("No broadcast channel exists for board {}", board_id);
            Ok(0)
        }
    }

    /// Get subscriber count for a board
    pub async fn subscriber_count(&self, board_id: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner
            .channels
            .get(&board_id)
            .map(|c| c.subscriber_count)
            .unwrap_or(0)
    }

    /// Get total number of channels
    pub async fn channel_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.channels.len()
    }
}

impl Clone for BoardBroadcaster {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
        }
    }
}
