//! Environment-driven configuration.
//!
//! The checkout simulation knobs live here rather than in control flow so a
//! deployment (or a test) can dial them without touching the orchestrator.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::checkout::orchestrator::CheckoutConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be within [0, 1], got {value}")]
    OutOfRange { key: &'static str, value: f64 },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub checkout: CheckoutConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = CheckoutConfig::default();
        let primary_failure_rate = env_parse(
            "CHECKOUT_PRIMARY_FAILURE_RATE",
            defaults.primary_failure_rate,
        )?;
        if !(0.0..=1.0).contains(&primary_failure_rate) {
            return Err(ConfigError::OutOfRange {
                key: "CHECKOUT_PRIMARY_FAILURE_RATE",
                value: primary_failure_rate,
            });
        }

        let checkout = CheckoutConfig {
            primary_failure_rate,
            primary_delay: Duration::from_millis(env_parse(
                "CHECKOUT_PRIMARY_DELAY_MS",
                defaults.primary_delay.as_millis() as u64,
            )?),
            fallback_delay: Duration::from_millis(env_parse(
                "CHECKOUT_FALLBACK_DELAY_MS",
                defaults.fallback_delay.as_millis() as u64,
            )?),
            tax_rate: env_parse("CHECKOUT_TAX_RATE", defaults.tax_rate)?,
            ..defaults
        };

        Ok(Self {
            port: env_parse("PORT", 3001)?,
            checkout,
        })
    }
}

fn env_parse<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}
