use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LogLevel, LoggingConfig,
    ServerConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for TD_CONFIG_DIR env var, else use ./.td/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply TD_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TD_CONFIG_DIR env var > ./.td/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("TD_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".td"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("TD_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TD_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(file) = std::env::var("TD_DATABASE_FILE") {
            self.database.file = file;
        }
        if let Ok(secret) = std::env::var("TD_AUTH_JWT_SECRET") {
            self.auth.enabled = true;
            self.auth.jwt_secret = Some(secret);
        }
        if let Ok(level) = std::env::var("TD_LOG_LEVEL") {
            // Never fails, invalid values fall back to Info
            self.logging.level = LogLevel::from_str(&level).unwrap();
        }
    }

    /// Validate all configuration. Call after load() to catch errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Absolute path of the SQLite database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.file))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_summary(&self) {
        info!(
            "Config: host={} port={} max_connections={} auth={} db={}",
            self.server.host,
            self.server.port,
            self.server.max_connections,
            if self.auth.enabled { "enabled" } else { "disabled" },
            self.database.file,
        );
    }
}
