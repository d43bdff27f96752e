use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub error_handler: ErrorHandlerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ErrorHandlerConfig {
    /// Emit the reason-phrase annotation for the legacy 520 status
    pub legacy_reason_phrase: bool,
}

impl Default for ErrorHandlerConfig {
    fn default() -> Self {
        Self {
            legacy_reason_phrase: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
            },
            error_handler: ErrorHandlerConfig {
                legacy_reason_phrase: env::var("ERROR_HANDLER_LEGACY_REASON_PHRASE")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .context("ERROR_HANDLER_LEGACY_REASON_PHRASE must be true or false")?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
