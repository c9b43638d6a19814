pub mod api;
pub mod drag;
pub mod error;
pub mod http;
pub mod projection;
pub mod projector;

pub use api::BoardApi;
pub use drag::{DragPhase, DropOutcome, MoveRequest};
pub use error::{ClientError, Result};
pub use http::HttpBoardApi;
pub use projection::BoardProjection;
pub use projector::{BoardProjector, ReconcileOutcome};

#[cfg(test)]
mod tests;
