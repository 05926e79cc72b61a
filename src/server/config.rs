use std::str::FromStr;

use crate::server::{
    error::{config::ConfigError, AppError},
    service::{
        commission::CommissionSchedule,
        purchase::{PurchaseSettings, DEFAULT_MAX_ATTEMPTS},
    },
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Origins allowed to call the API with credentials; empty disables CORS.
    pub cors_allowed_origins: Vec<String>,

    pub purchase_max_attempts: u32,
    pub purchase_requires_fulfillment: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let purchase_max_attempts: u32 =
            parse_optional("PURCHASE_MAX_ATTEMPTS")?.unwrap_or(DEFAULT_MAX_ATTEMPTS);

        if purchase_max_attempts == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "PURCHASE_MAX_ATTEMPTS".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            purchase_max_attempts,
            purchase_requires_fulfillment: parse_optional("PURCHASE_REQUIRES_FULFILLMENT")?
                .unwrap_or(false),
        })
    }

    pub fn purchase_settings(&self) -> PurchaseSettings {
        PurchaseSettings {
            max_attempts: self.purchase_max_attempts,
            requires_fulfillment: self.purchase_requires_fulfillment,
            schedule: CommissionSchedule::default(),
        }
    }
}

/// Reads and parses an optional environment variable.
fn parse_optional<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    let Ok(value) = std::env::var(name) else {
        return Ok(None);
    };

    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        })
}
