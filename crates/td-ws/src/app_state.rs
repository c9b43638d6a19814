use crate::{
    BoardBroadcaster, ConnectionConfig, ConnectionId, Metrics, WebSocketConnection,
};

use td_auth::{JwtValidator, Principal};

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::Response,
};
use log::{debug, error, info, warn};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Shared application state for the HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub broadcaster: BoardBroadcaster,
    /// `None` when the server runs with auth disabled.
    pub jwt_validator: Option<Arc<JwtValidator>>,
    pub metrics: Metrics,
    pub connection_config: ConnectionConfig,
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let user_id = match &state.jwt_validator {
        Some(validator) => Some(extract_user_id(&headers, validator)?),
        None => None,
    };
    debug!("WebSocket upgrade request from user {:?}", user_id);

    let connection_id = ConnectionId::new();
    info!("Accepted connection {}", connection_id);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, connection_id, user_id, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: WebSocket,
    connection_id: ConnectionId,
    user_id: Option<Uuid>,
    state: AppState,
) {
    let connection = WebSocketConnection::new(
        connection_id,
        user_id,
        state.connection_config,
        state.metrics.clone(),
        state.broadcaster.clone(),
        state.pool.clone(),
    );

    if let Err(e) = connection.handle(socket).await {
        error!("Connection {connection_id} error: {e}");
    }
}

/// Extract and validate the user from the JWT in the Authorization header
fn extract_user_id(headers: &HeaderMap, validator: &JwtValidator) -> Result<Uuid, StatusCode> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid authorization scheme: expected 'Bearer'");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = validator.validate(token).map_err(|e| {
        warn!("JWT validation failed: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    let principal = Principal::try_from(claims).map_err(|e| {
        warn!("JWT claims rejected: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    Ok(principal.id)
}
