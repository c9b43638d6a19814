use crate::{ConfigError, ConfigErrorResult, DEFAULT_AUTH_ENABLED};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    /// HS256 shared secret. Required when auth is enabled and no public key
    /// path is set.
    pub jwt_secret: Option<String>,
    /// RS256 public key path (PEM), resolved relative to the config directory.
    pub jwt_public_key_path: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_AUTH_ENABLED,
            jwt_secret: None,
            jwt_public_key_path: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.enabled && self.jwt_secret.is_none() && self.jwt_public_key_path.is_none() {
            return Err(ConfigError::auth(
                "auth.enabled requires auth.jwt_secret or auth.jwt_public_key_path",
            ));
        }
        Ok(())
    }
}
