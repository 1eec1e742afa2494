//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL. The literal value `memory` selects the in-memory store.
    pub database_url: String,
    /// Secret used to sign session tokens.
    pub session_secret: String,
    /// Session expiration in hours.
    pub session_expiration_hours: u64,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let session_secret = env::var("STAFFBOOK_SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("STAFFBOOK_SESSION_SECRET is required"))?;

        Ok(Self {
            host: env::var("STAFFBOOK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("STAFFBOOK_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:staffbook.db?mode=rwc".to_string()),
            session_secret,
            session_expiration_hours: env::var("STAFFBOOK_SESSION_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            log_level: env::var("STAFFBOOK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if the in-memory store was requested.
    pub fn use_memory_store(&self) -> bool {
        self.database_url == "memory"
    }
}
