pub mod app_state;
pub mod board_broadcaster;
pub mod broadcast_config;
pub mod broadcast_message;
pub mod connection_config;
pub mod connection_id;
pub mod error;
pub mod events;
pub mod metrics;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use board_broadcaster::BoardBroadcaster;
pub use broadcast_config::BroadcastConfig;
pub use broadcast_message::BroadcastMessage;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use error::{Result, WsError};
pub use events::{ClientMessage, DeletedId, ServerEvent};
pub use metrics::Metrics;
pub use web_socket_connection::WebSocketConnection;
