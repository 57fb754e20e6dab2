//! Configuration management for Parley
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/parley/config.toml

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{ParleyError, Result};

/// Main configuration for Parley
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Completion provider configuration
    pub provider: ProviderConfig,
    /// Conversation loop configuration
    pub session: SessionConfig,
    /// Weather tool configuration
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the chat-completions endpoint
    pub endpoint: String,
    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model to query
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Conversation loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Maximum provider round-trips before the loop gives up
    /// Default: 10
    pub max_turns: usize,
    /// Whether to show debug output
    pub debug: bool,
}

/// Weather tool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// API key for the live weather service; canned results when absent
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            session: SessionConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: env::var("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: env::var("OPENAI_API_KEY").ok(),
            model: env::var("PARLEY_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo-16k".to_string()),
            timeout_secs: 120,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: env::var("PARLEY_MAX_TURNS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            debug: env::var("PARLEY_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("WEATHER_API_KEY").ok(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parley")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(ParleyError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ParleyError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ParleyError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Validate the endpoint URL, returning a config error with context
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.provider.endpoint).map_err(|e| {
            ParleyError::config(format!(
                "Invalid endpoint URL '{}': {}",
                self.provider.endpoint, e
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.max_turns, 10);
        assert!(!config.provider.model.is_empty());
    }

    #[test]
    fn test_validate_endpoint() {
        let mut config = Config::default();
        config.provider.endpoint = "https://api.openai.com/v1".to_string();
        assert!(config.validate().is_ok());

        config.provider.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_config_file() {
        let toml_str = r#"
            [provider]
            endpoint = "http://localhost:8080/v1"
            model = "gpt-3.5-turbo-16k"
            timeout_secs = 60

            [session]
            max_turns = 5
            debug = false
        "#;
        let parsed: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.provider.endpoint, "http://localhost:8080/v1");
        assert_eq!(parsed.provider.api_key, None);
        assert_eq!(parsed.session.max_turns, 5);
        assert!(parsed.weather.api_key.is_none());
    }
}
