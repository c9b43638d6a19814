use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// JWT Claims structure issued by the credential service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,
    /// Display username, cached so activity records need no user lookup
    pub username: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user_id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.username.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "username".to_string(),
                message: "username cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.username.len() > 64 {
            return Err(AuthError::InvalidClaim {
                claim: "username".to_string(),
                message: "username exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
