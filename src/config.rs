//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before use.
//!
//! ```bash
//! export SUBSCRIPTION_TTL_DAYS="30"   # fixed subscription length
//! export RUST_LOG="debug"
//! export LOG_FORMAT="json"
//! ```
//!
//! ## Optional Variables
//!
//! - `SUBSCRIPTION_TTL_DAYS` - Subscription length in days. When unset, the
//!   renewal date is one calendar year's worth of days (365 or 366) after
//!   the subscription date.
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;

use crate::domain::RenewalPolicy;

/// Upper bound accepted for `SUBSCRIPTION_TTL_DAYS` (ten years).
pub const MAX_TTL_DAYS: u32 = 3660;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed subscription length overriding the calendar computation.
    pub subscription_ttl_days: Option<u32>,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subscription_ttl_days: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SUBSCRIPTION_TTL_DAYS` is set but is not a
    /// non-negative integer.
    pub fn from_env() -> Result<Self> {
        let subscription_ttl_days = Self::load_ttl_days()?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            subscription_ttl_days,
            log_level,
            log_format,
        })
    }

    /// Reads `SUBSCRIPTION_TTL_DAYS`. An unset or blank value means "no
    /// override".
    fn load_ttl_days() -> Result<Option<u32>> {
        let Ok(raw) = env::var("SUBSCRIPTION_TTL_DAYS") else {
            return Ok(None);
        };

        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let days = raw
            .parse::<u32>()
            .with_context(|| format!("SUBSCRIPTION_TTL_DAYS must be a whole number, got '{raw}'"))?;

        Ok(Some(days))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `subscription_ttl_days` is 0 or above [`MAX_TTL_DAYS`]
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if let Some(days) = self.subscription_ttl_days {
            if days == 0 {
                anyhow::bail!("SUBSCRIPTION_TTL_DAYS must be greater than 0");
            }
            if days > MAX_TTL_DAYS {
                anyhow::bail!(
                    "SUBSCRIPTION_TTL_DAYS is too large (max: {MAX_TTL_DAYS}), got {days}"
                );
            }
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Renewal policy described by this configuration.
    pub fn renewal_policy(&self) -> RenewalPolicy {
        RenewalPolicy {
            override_ttl_days: self.subscription_ttl_days,
        }
    }

    /// Logs a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        match self.subscription_ttl_days {
            Some(days) => tracing::info!("  Subscription TTL: {} days (override)", days),
            None => tracing::info!("  Subscription TTL: calendar year"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
