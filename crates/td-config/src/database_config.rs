use crate::DEFAULT_DATABASE_FILE;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database filename, resolved relative to the config directory.
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_DATABASE_FILE),
        }
    }
}
