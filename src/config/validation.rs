//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("client.nick is required")]
    MissingNick,
    #[error("client.host is required")]
    MissingClientHost,
    #[error("client.port must be non-zero")]
    InvalidClientPort,
    #[error("client.keepalive_secs must be non-zero")]
    InvalidKeepalive,
    #[error("device.host is required")]
    MissingDeviceHost,
    #[error("device.port must be non-zero")]
    InvalidDevicePort,
    #[error("device.timeout_secs must be non-zero")]
    InvalidDeviceTimeout,
    #[error("command_argument_separator is not a valid regex: {0}")]
    InvalidSeparator(String),
    #[error("command_argument_separator must not match the empty string")]
    EmptySeparatorMatch,
    #[error("command_argument_separator must not contain capture groups")]
    SeparatorCaptureGroups,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Chat session
    if config.client.nick.trim().is_empty() {
        errors.push(ValidationError::MissingNick);
    }
    if config.client.host.trim().is_empty() {
        errors.push(ValidationError::MissingClientHost);
    }
    if config.client.port == 0 {
        errors.push(ValidationError::InvalidClientPort);
    }
    if config.client.keepalive_secs == 0 {
        errors.push(ValidationError::InvalidKeepalive);
    }

    // Device endpoint
    if config.device.host.trim().is_empty() {
        errors.push(ValidationError::MissingDeviceHost);
    }
    if config.device.port == 0 {
        errors.push(ValidationError::InvalidDevicePort);
    }
    if config.device.timeout_secs == 0 {
        errors.push(ValidationError::InvalidDeviceTimeout);
    }

    // The separator splits every message body; an empty match would split
    // between every character.
    match regex::Regex::new(&config.command_argument_separator) {
        Ok(separator) => {
            if separator.is_match("") {
                errors.push(ValidationError::EmptySeparatorMatch);
            }
            if separator.captures_len() > 1 {
                errors.push(ValidationError::SeparatorCaptureGroups);
            }
        }
        Err(e) => errors.push(ValidationError::InvalidSeparator(e.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
