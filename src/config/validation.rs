//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Check routing defaults against the lowercase-name convention
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a deserialized configuration for semantic problems.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a valid socket address: {:?}", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    if config.routing.default_handler.is_empty() {
        errors.push(ValidationError::new(
            "routing.default_handler",
            "must not be empty",
        ));
    } else if config.routing.default_handler != config.routing.default_handler.to_lowercase() {
        errors.push(ValidationError::new(
            "routing.default_handler",
            "must be lowercase",
        ));
    }

    if config.routing.default_operation.is_empty() {
        errors.push(ValidationError::new(
            "routing.default_operation",
            "must not be empty",
        ));
    }

    if config.secrets.path.is_empty() {
        errors.push(ValidationError::new("secrets.path", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.timeouts.request_secs = 0;
        config.routing.default_operation = String::new();

        let errors = validate_config(&config).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "timeouts.request_secs"));
    }

    #[test]
    fn test_uppercase_default_handler_is_rejected() {
        let mut config = AppConfig::default();
        config.routing.default_handler = "Home".to_string();

        let errors = validate_config(&config).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "routing.default_handler");
    }
}
