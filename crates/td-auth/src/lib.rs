pub mod claims;
pub mod error;
pub mod jwt_validator;
pub mod principal;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
pub use principal::Principal;
