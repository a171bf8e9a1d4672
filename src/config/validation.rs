//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{FestBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_payment_config(&settings.payment)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(FestBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(FestBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(FestBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate auth configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.secret_key.is_empty() {
        return Err(FestBuddyError::Config(
            "Auth secret key is required".to_string()
        ));
    }

    if config.secret_key.len() < 16 {
        return Err(FestBuddyError::Config(
            "Auth secret key must be at least 16 characters".to_string()
        ));
    }

    if config.token_ttl_days <= 0 {
        return Err(FestBuddyError::Config(
            "Token TTL must be greater than 0 days".to_string()
        ));
    }

    Ok(())
}

/// Validate payment gateway configuration
fn validate_payment_config(config: &super::PaymentConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(FestBuddyError::Config(
            "Payment gateway API URL is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url).map_err(|e| {
        FestBuddyError::Config(format!("Invalid payment gateway API URL: {}", e))
    })?;

    if config.key_id.is_empty() {
        return Err(FestBuddyError::Config(
            "Payment gateway key id is required".to_string()
        ));
    }

    if config.key_secret.is_empty() {
        return Err(FestBuddyError::Config(
            "Payment gateway key secret is required".to_string()
        ));
    }

    if config.currency.len() != 3 || !config.currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(FestBuddyError::Config(
            format!("Invalid currency code: {}", config.currency)
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(FestBuddyError::Config(
            "Payment gateway timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FestBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(FestBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(FestBuddyError::Config(
            format!("Invalid log format: {}. Valid formats: {:?}", config.format, valid_formats)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.secret_key = "a-secret-key-long-enough".to_string();
        settings.payment.key_id = "rzp_test_key".to_string();
        settings.payment.key_secret = "rzp_test_secret".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_secret_key_fails() {
        let mut settings = valid_settings();
        settings.auth.secret_key = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_malformed_gateway_url_fails() {
        let mut settings = valid_settings();
        settings.payment.api_url = "not a url".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_lowercase_currency_fails() {
        let mut settings = valid_settings();
        settings.payment.currency = "inr".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert!(validate_settings(&settings).is_err());
    }
}
