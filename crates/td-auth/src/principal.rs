use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use uuid::Uuid;

/// Resolved identity of the requesting user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
}

impl TryFrom<Claims> for Principal {
    type Error = AuthError;

    #[track_caller]
    fn try_from(claims: Claims) -> AuthErrorResult<Self> {
        let id = Uuid::parse_str(&claims.sub).map_err(|e| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: format!("sub is not a valid UUID: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            id,
            username: claims.username,
        })
    }
}
