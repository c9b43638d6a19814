//! Post-commit history writes.
//!
//! Every mutating operation appends one structured audit record and one
//! human-readable activity row after its transaction commits. Both writes
//! are best-effort: a history failure never aborts the operation it
//! describes, it only logs a warning.

use crate::api::publish::publish;

use td_core::{Activity, ActivityLog};
use td_db::{ActivityLogRepository, ActivityRepository};
use td_ws::{AppState, ServerEvent};

/// Append audit + activity rows and fan the activity out to subscribers.
pub async fn record(state: &AppState, log: ActivityLog, activity: Activity) {
    if let Err(e) = ActivityLogRepository::create(&state.pool, &log).await {
        log::warn!("Failed to write audit record {}: {}", log.action, e);
    }

    let board_id = activity.board_id;
    if let Err(e) = ActivityRepository::create(&state.pool, &activity).await {
        log::warn!("Failed to write activity row: {}", e);
        return;
    }

    publish(state, board_id, &ServerEvent::ActivityLog(activity)).await;
}

/// Activity rows that have no structured audit counterpart (list and board
/// operations).
pub async fn record_activity(state: &AppState, activity: Activity) {
    let board_id = activity.board_id;
    if let Err(e) = ActivityRepository::create(&state.pool, &activity).await {
        log::warn!("Failed to write activity row: {}", e);
        return;
    }

    publish(state, board_id, &ServerEvent::ActivityLog(activity)).await;
}
