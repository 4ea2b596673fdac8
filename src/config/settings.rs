//! Process settings from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE_URL: &str = "mysql://root@localhost/biblioteca";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    pub port: u16,
    pub database_url: String,
    pub cors_origin: String,
    pub max_connections: u32,
    /// JSON file replacing the built-in catalogue.
    pub config_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match get("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| ConfigError::Settings(format!("PORT must be a port number, got '{}'", p)))?,
            None => DEFAULT_PORT,
        };
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(n) => n
                .parse()
                .map_err(|_| ConfigError::Settings(format!("DB_MAX_CONNECTIONS must be a number, got '{}'", n)))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        Ok(Settings {
            port,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            cors_origin: get("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into()),
            max_connections,
            config_path: get("CONSOLE_CONFIG").filter(|s| !s.is_empty()).map(PathBuf::from),
        })
    }
}
