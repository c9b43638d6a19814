use crate::{
    BoardBroadcaster, ClientMessage, ConnectionConfig, ConnectionId, Metrics,
    Result as WsErrorResult, WsError,
};

use td_db::BoardRepository;

use error_location::ErrorLocation;

use std::collections::HashMap;
use std::panic::Location;

use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use futures::{SinkExt, StreamExt};
use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Manages a single WebSocket connection and the set of board rooms it
/// has joined. The socket is read-only for data: clients only send
/// join/leave frames, all mutations arrive via the REST API.
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    /// Authenticated user, if the server runs with auth enabled.
    user_id: Option<Uuid>,
    config: ConnectionConfig,
    metrics: Metrics,
    broadcaster: BoardBroadcaster,
    pool: SqlitePool,
    /// One forwarding task per joined board.
    joined: HashMap<Uuid, JoinHandle<()>>,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        user_id: Option<Uuid>,
        config: ConnectionConfig,
        metrics: Metrics,
        broadcaster: BoardBroadcaster,
        pool: SqlitePool,
    ) -> Self {
        Self {
            connection_id,
            user_id,
            config,
            metrics,
            broadcaster,
            pool,
            joined: HashMap::new(),
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(mut self, socket: WebSocket) -> WsErrorResult<()> {
        log::info!(
            "WebSocket connection {} established (user {:?})",
            self.connection_id,
            self.user_id
        );

        self.metrics.connection_established();

        // Split socket into sender and receiver
        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Create bounded channel for outgoing messages (backpressure handling)
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        // Spawn send task
        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let result = loop {
            match ws_receiver.next().await {
                Some(Ok(msg)) => {
                    if let Err(e) = self.handle_client_message(msg, &tx).await {
                        log::error!(
                            "Error handling message from connection {}: {}",
                            self.connection_id,
                            e
                        );
                        self.metrics.error_occurred("message_handling");
                        break Err(e);
                    }
                }
                Some(Err(e)) => {
                    log::error!("WebSocket error on connection {}: {}", self.connection_id, e);
                    break Err(WsError::ConnectionClosed {
                        reason: format!("WebSocket error: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                None => {
                    log::info!("Connection {} closed by client", self.connection_id);
                    break Ok(());
                }
            }
        };

        // Cleanup: leave every room and terminate the send task
        for (board_id, forward_task) in self.joined.drain() {
            forward_task.abort();
            self.broadcaster.unsubscribe(board_id).await;
        }
        drop(tx);
        let _ = send_task.await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });

        log::info!("WebSocket connection {} closed", self.connection_id);

        result
    }

    /// Handle a message from the client
    async fn handle_client_message(
        &mut self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        match msg {
            Message::Text(text) => self.handle_text_message(&text, tx).await,
            Message::Binary(data) => {
                log::debug!(
                    "Ignoring binary message ({} bytes) from connection {}",
                    data.len(),
                    self.connection_id
                );
                Ok(())
            }
            Message::Ping(data) => {
                tx.send(Message::Pong(data))
                    .await
                    .map_err(|_| WsError::SendBufferFull {
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                Ok(())
            }
            Message::Pong(_) => Ok(()),
            Message::Close(_) => {
                log::info!("Received close frame from connection {}", self.connection_id);
                Ok(())
            }
        }
    }

    async fn handle_text_message(
        &mut self,
        text: &str,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        let parsed: ClientMessage = match serde_json::from_str(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Unknown frames are dropped, not fatal
                log::warn!(
                    "Unparseable frame from connection {}: {}",
                    self.connection_id,
                    e
                );
                self.metrics.error_occurred("invalid_message");
                return Ok(());
            }
        };

        match parsed {
            ClientMessage::JoinBoard { board_id } => {
                self.metrics.message_received("joinBoard");
                self.join_board(board_id, tx).await
            }
            ClientMessage::LeaveBoard { board_id } => {
                self.metrics.message_received("leaveBoard");
                self.leave_board(board_id).await;
                Ok(())
            }
        }
    }

    async fn join_board(&mut self, board_id: Uuid, tx: &mpsc::Sender<Message>) -> WsErrorResult<()> {
        if self.joined.contains_key(&board_id) {
            return Ok(());
        }

        if !self.may_access(board_id).await? {
            log::warn!(
                "Connection {} denied join for board {}",
                self.connection_id,
                board_id
            );
            self.metrics.error_occurred("join_denied");
            return Ok(());
        }

        let mut broadcast_rx = self.broadcaster.subscribe(board_id).await;
        let tx = tx.clone();
        let metrics = self.metrics.clone();
        let connection_id = self.connection_id;

        let forward_task = tokio::spawn(async move {
            loop {
                match broadcast_rx.recv().await {
                    Ok(msg) => {
                        let text = match Utf8Bytes::try_from(msg.payload) {
                            Ok(text) => text,
                            Err(_) => continue,
                        };
                        if tx.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                        metrics.message_sent(&msg.message_type);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                        log::warn!(
                            "Connection {} lagged on board {}, missed {} messages",
                            connection_id,
                            board_id,
                            missed
                        );
                        metrics.error_occurred("broadcast_lagged");
                    }
                    Err(_) => break,
                }
            }
        });

        self.joined.insert(board_id, forward_task);
        log::debug!("Connection {} joined board {}", self.connection_id, board_id);
        Ok(())
    }

    async fn leave_board(&mut self, board_id: Uuid) {
        if let Some(forward_task) = self.joined.remove(&board_id) {
            forward_task.abort();
            self.broadcaster.unsubscribe(board_id).await;
            log::debug!("Connection {} left board {}", self.connection_id, board_id);
        }
    }

    /// Board membership check. Without an authenticated user (auth disabled)
    /// any existing board can be joined.
    async fn may_access(&self, board_id: Uuid) -> WsErrorResult<bool> {
        let found = match self.user_id {
            Some(user_id) => BoardRepository::find_accessible(&self.pool, board_id, user_id).await,
            None => BoardRepository::find_by_id(&self.pool, board_id).await,
        }
        .map_err(|e| WsError::Internal {
            message: format!("Board lookup failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(found.is_some())
    }
}
