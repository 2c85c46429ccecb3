//! AI provider configuration

use serde::Deserialize;

use super::error::ValidationError;

/// AI provider configuration (Anthropic)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    #[serde(default)]
    pub anthropic_api_key: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Completion token ceiling, bounds cost and latency per turn
    #[serde(default = "default_max_completion_tokens")]
    pub max_completion_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl AiConfig {
    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.anthropic_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        if !self.anthropic_api_key.starts_with("sk-ant-") {
            return Err(ValidationError::InvalidAnthropicKey);
        }
        if self.max_completion_tokens == 0 || self.max_completion_tokens > 4096 {
            return Err(ValidationError::InvalidTokenCeiling);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            max_completion_tokens: default_max_completion_tokens(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_max_completion_tokens() -> u32 {
    300
}

fn default_request_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.max_completion_tokens, 300);
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        let config = AiConfig {
            anthropic_api_key: "re_xxx".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_token_ceiling_bounds() {
        let config = AiConfig {
            anthropic_api_key: "sk-ant-xxx".to_string(),
            max_completion_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            anthropic_api_key: "sk-ant-xxx".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
