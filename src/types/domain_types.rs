// src/types/domain_types.rs
//! Domain-specific newtypes for credentials.

use super::ValidationError;
use std::fmt;

/// Integration token for Notion API authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(10).collect();
        write!(f, "{}...", visible)
    }
}

/// API key for the generative-model service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelApiKey(String);

impl ModelApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ValidationError::EmptyField("model API key"));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}...", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notion_key_requires_known_prefix() {
        assert!(ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnopqrstuvwxyz").is_ok());
        assert!(matches!(
            ApiKey::new("sk_abcdefghijklmnopqrstuvwxyz"),
            Err(ValidationError::InvalidApiKey { .. })
        ));
        assert!(ApiKey::new("secret_short").is_err());
    }

    #[test]
    fn keys_are_redacted_in_display() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap();
        assert_eq!(key.to_string(), "secret_abc...");

        let model_key = ModelApiKey::new("AIzaSyExample").unwrap();
        assert_eq!(model_key.to_string(), "AIza...");
    }

    #[test]
    fn redaction_counts_characters_not_bytes() {
        let key = ApiKey::new("ntn_ééééééééééééééééé").unwrap();
        assert_eq!(key.to_string(), "ntn_éééééé...");
    }

    #[test]
    fn model_key_rejects_blank_input() {
        assert_eq!(
            ModelApiKey::new("   "),
            Err(ValidationError::EmptyField("model API key"))
        );
    }
}
