//! Current-weather tool
//!
//! Sample tool with a typed argument struct. Without an API key it returns a
//! canned report; with one it queries a live weather service and substitutes
//! a sentinel string on failure rather than failing the conversation turn.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::{Config, ParleyError, Result, ToolDeclaration};
use crate::tools::registry::Tool;

const LIVE_API_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Tool reporting the current weather for a location
pub struct WeatherTool {
    client: Client,
    api_key: Option<String>,
}

/// Arguments decoded from the provider's raw JSON
#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
    format: TemperatureFormat,
}

/// Temperature unit requested by the model
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TemperatureFormat {
    Celsius,
    Fahrenheit,
}

impl std::fmt::Display for TemperatureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureFormat::Celsius => write!(f, "celsius"),
            TemperatureFormat::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

/// Subset of the live service's response
#[derive(Debug, Deserialize)]
struct LiveWeatherResponse {
    current: LiveCurrent,
}

#[derive(Debug, Deserialize)]
struct LiveCurrent {
    temp_c: f64,
    temp_f: f64,
    condition: LiveCondition,
}

#[derive(Debug, Deserialize)]
struct LiveCondition {
    text: String,
}

impl WeatherTool {
    /// Create a weather tool with canned results
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_key: None,
        }
    }

    /// Create a weather tool from configuration
    ///
    /// Live lookups are enabled when a weather API key is configured.
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: config.weather.api_key.clone(),
        }
    }

    /// Canned report matching the live format
    fn canned_report(args: &WeatherArgs) -> String {
        format!("the {} is 75 {} and sunny", args.location, args.format)
    }

    /// Query the live weather service
    ///
    /// Failures here are this tool's own responsibility: any error is
    /// swallowed and the caller receives `None`, which the invoke path turns
    /// into a "No weather data found" result.
    async fn live_report(&self, api_key: &str, args: &WeatherArgs) -> Option<String> {
        let response = self
            .client
            .get(LIVE_API_URL)
            .query(&[("key", api_key), ("q", args.location.as_str())])
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;

        let weather: LiveWeatherResponse = response.json().await.ok()?;
        let temperature = match args.format {
            TemperatureFormat::Celsius => weather.current.temp_c,
            TemperatureFormat::Fahrenheit => weather.current.temp_f,
        };

        Some(format!(
            "the {} is {} {} and {}",
            args.location,
            temperature,
            args.format,
            weather.current.condition.text.to_lowercase()
        ))
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration::new(
            "get_current_weather",
            "Get the current weather",
            json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "The city and state, e.g. San Francisco, CA"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["celsius", "fahrenheit"],
                        "description": "The temperature unit to use. Infer this from the users location."
                    }
                },
                "required": ["location", "format"]
            }),
        )
    }

    async fn invoke(&self, args: Value) -> Result<Value> {
        let args: WeatherArgs = serde_json::from_value(args).map_err(|e| {
            ParleyError::tool(
                "get_current_weather",
                format!("Invalid arguments: {}", e),
            )
        })?;

        let report = match self.api_key {
            Some(ref key) => self
                .live_report(key, &args)
                .await
                .unwrap_or_else(|| "No weather data found".to_string()),
            None => Self::canned_report(&args),
        };

        Ok(Value::String(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_report() {
        let tool = WeatherTool::new();
        let result = tool
            .invoke(json!({"location": "San Francisco, CA", "format": "fahrenheit"}))
            .await
            .unwrap();

        assert_eq!(
            result,
            Value::String("the San Francisco, CA is 75 fahrenheit and sunny".to_string())
        );
    }

    #[tokio::test]
    async fn test_wrong_argument_shape_is_a_tool_error() {
        let tool = WeatherTool::new();
        let err = tool
            .invoke(json!({"location": "San Francisco, CA"}))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ParleyError::ToolExecution { ref tool, .. } if tool == "get_current_weather"
        ));
    }

    #[tokio::test]
    async fn test_unknown_format_rejected() {
        let tool = WeatherTool::new();
        let result = tool
            .invoke(json!({"location": "Paris", "format": "kelvin"}))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_declaration_matches_registry_name() {
        let tool = WeatherTool::new();
        assert_eq!(tool.declaration().name, tool.name());
    }
}
