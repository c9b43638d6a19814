//! Post-commit event publication.
//!
//! Broadcasts are best-effort: the database is already committed when these
//! run, so failures are logged and swallowed rather than surfaced to the
//! caller. Clients that miss an event converge on their next refetch.

use td_ws::{AppState, ServerEvent};

use uuid::Uuid;

/// Push one event to every subscriber of a board.
pub async fn publish(state: &AppState, board_id: Uuid, event: &ServerEvent) {
    let message = match event.to_broadcast() {
        Ok(message) => message,
        Err(e) => {
            log::warn!("Failed to encode {} event: {}", event.name(), e);
            return;
        }
    };

    match state.broadcaster.broadcast(board_id, message).await {
        Ok(receivers) => {
            log::debug!(
                "Published {} to board {} ({} receivers)",
                event.name(),
                board_id,
                receivers
            );
        }
        Err(e) => {
            log::warn!(
                "Failed to publish {} to board {}: {}",
                event.name(),
                board_id,
                e
            );
        }
    }
}
