use std::env;

use crate::errors::CustomError;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub buy_allowed_chain_ids: Vec<u64>,
    pub default_currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self, CustomError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CustomError> {
        let port: u16 = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| CustomError::ConfigError(format!("PORT must be a port number, got {}", port)))?,
            None => 8080,
        };

        let buy_allowed_chain_ids = lookup("BUY_ALLOWED_CHAIN_IDS")
            .unwrap_or_else(|| "1".to_string())
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse()
                    .map_err(|_| CustomError::ConfigError(format!("invalid chain id in BUY_ALLOWED_CHAIN_IDS: {}", id)))
            })
            .collect::<Result<Vec<u64>, _>>()?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8080,http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            cors_origins,
            buy_allowed_chain_ids,
            default_currency: lookup("DEFAULT_CURRENCY").unwrap_or_else(|| "usd".to_string()),
        })
    }
}
