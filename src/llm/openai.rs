//! OpenAI-compatible chat-completions client
//!
//! Async HTTP client for `/chat/completions` endpoints speaking the legacy
//! `functions` tool-calling protocol.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{
    Config, FinishReason, ParleyError, ProviderTurn, Result, ToolDeclaration, ToolRequest, Turn,
};
use crate::llm::traits::CompletionProvider;

/// OpenAI-compatible API client
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    debug: bool,
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<&'a [ToolDeclaration]>,
    temperature: f32,
}

/// Wire message format
///
/// `content` is always serialized; an assistant turn carrying a function
/// call sends `content: null`, matching the endpoint's expectations.
#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
}

/// Function call payload inside a wire message
#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// One choice in a completion response
#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    message: Option<ResponseMessage>,
}

/// Assistant message in a completion response
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    function_call: Option<WireFunctionCall>,
}

impl OpenAiProvider {
    /// Create a new provider from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.provider.timeout_secs))
            .build()
            .map_err(|e| ParleyError::provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.provider.endpoint.trim_end_matches('/').to_string(),
            api_key: config.provider.api_key.clone(),
            model: config.provider.model.clone(),
            debug: config.session.debug,
        })
    }

    /// Convert a transcript turn to the wire format
    fn to_wire_message(turn: &Turn) -> WireMessage {
        match turn {
            Turn::User { text } => WireMessage {
                role: "user",
                content: Some(text.clone()),
                name: None,
                function_call: None,
            },
            Turn::AssistantFinal { text } => WireMessage {
                role: "assistant",
                content: Some(text.clone()),
                name: None,
                function_call: None,
            },
            Turn::AssistantToolRequest {
                tool_name,
                raw_arguments,
            } => WireMessage {
                role: "assistant",
                content: None,
                name: None,
                function_call: Some(WireFunctionCall {
                    name: Some(tool_name.clone()),
                    arguments: Some(raw_arguments.clone()),
                }),
            },
            Turn::ToolResult { tool_name, payload } => WireMessage {
                role: "function",
                content: Some(payload.clone()),
                name: Some(tool_name.clone()),
                function_call: None,
            },
        }
    }

    /// Convert a completion response into a provider turn
    ///
    /// Only the first choice is inspected. A missing function-call name
    /// defaults to an empty string and missing arguments to `"{}"`, so a
    /// malformed response fails registry lookup instead of panicking.
    fn to_provider_turn(response: ChatResponse) -> Result<ProviderTurn> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ParleyError::provider("Response contained no choices"))?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some(reason) => FinishReason::from_wire(reason),
            None => FinishReason::Other("(missing)".to_string()),
        };

        let (content, tool_request) = match choice.message {
            Some(message) => {
                let tool_request = message.function_call.map(|fc| ToolRequest {
                    name: fc.name.unwrap_or_default(),
                    raw_arguments: fc.arguments.unwrap_or_else(|| "{}".to_string()),
                });
                (message.content, tool_request)
            }
            None => (None, None),
        };

        Ok(ProviderTurn {
            finish_reason,
            content,
            tool_request,
        })
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.len() > 500 {
                eprintln!("DEBUG {}: {}...", label, truncate_at_boundary(content, 500));
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

/// Truncate to at most `limit` bytes, backing up to a UTF-8 char boundary
/// so multibyte content (e.g. `°` in weather reports) cannot split a slice.
fn truncate_at_boundary(content: &str, limit: usize) -> &str {
    if content.len() <= limit {
        return content;
    }
    let mut end = limit;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        transcript: &[Turn],
        tools: &[ToolDeclaration],
    ) -> Result<ProviderTurn> {
        let messages: Vec<WireMessage> = transcript.iter().map(Self::to_wire_message).collect();

        let request = ChatRequest {
            model: &self.model,
            messages,
            functions: if tools.is_empty() { None } else { Some(tools) },
            // Pinned so tool selection is reproducible
            temperature: 0.0,
        };

        let request_json = serde_json::to_string(&request)?;
        self.debug_print("Request", &request_json);

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .json(&request);

        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                ParleyError::provider(format!(
                    "Cannot connect to completion endpoint at {}",
                    self.endpoint
                ))
            } else {
                ParleyError::from(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ParleyError::provider(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        self.debug_print("Response", &response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| ParleyError::provider(format!("Failed to parse response: {}", e)))?;

        Self::to_provider_turn(chat_response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_conversion() {
        let msg = OpenAiProvider::to_wire_message(&Turn::user("Hello"));
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content.as_deref(), Some("Hello"));
        assert!(msg.function_call.is_none());
    }

    #[test]
    fn test_tool_request_conversion_sends_null_content() {
        let raw = r#"{"location":"San Francisco, CA","format":"fahrenheit"}"#;
        let msg = OpenAiProvider::to_wire_message(&Turn::tool_request("get_current_weather", raw));

        assert_eq!(msg.role, "assistant");
        assert!(msg.content.is_none());

        let serialized = serde_json::to_value(&msg).unwrap();
        assert!(serialized["content"].is_null());
        assert_eq!(serialized["function_call"]["arguments"], raw);
    }

    #[test]
    fn test_tool_result_conversion() {
        let msg = OpenAiProvider::to_wire_message(&Turn::tool_result(
            "get_current_weather",
            r#"{"result":"sunny"}"#,
        ));
        assert_eq!(msg.role, "function");
        assert_eq!(msg.name.as_deref(), Some("get_current_weather"));
        assert_eq!(msg.content.as_deref(), Some(r#"{"result":"sunny"}"#));
    }

    #[test]
    fn test_parse_stop_response() {
        let body = r#"{
            "choices": [{
                "finish_reason": "stop",
                "message": {"content": "Hello!"}
            }]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let turn = OpenAiProvider::to_provider_turn(response).unwrap();

        assert_eq!(turn.finish_reason, FinishReason::Stop);
        assert_eq!(turn.content.as_deref(), Some("Hello!"));
        assert!(turn.tool_request.is_none());
    }

    #[test]
    fn test_parse_function_call_response() {
        let body = r#"{
            "choices": [{
                "finish_reason": "function_call",
                "message": {
                    "content": null,
                    "function_call": {
                        "name": "get_current_weather",
                        "arguments": "{\"location\":\"San Francisco, CA\"}"
                    }
                }
            }]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let turn = OpenAiProvider::to_provider_turn(response).unwrap();

        assert_eq!(turn.finish_reason, FinishReason::FunctionCall);
        let request = turn.tool_request.unwrap();
        assert_eq!(request.name, "get_current_weather");
        assert_eq!(request.raw_arguments, r#"{"location":"San Francisco, CA"}"#);
    }

    #[test]
    fn test_parse_function_call_with_missing_fields() {
        let body = r#"{
            "choices": [{
                "finish_reason": "function_call",
                "message": {"function_call": {}}
            }]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let turn = OpenAiProvider::to_provider_turn(response).unwrap();

        let request = turn.tool_request.unwrap();
        assert_eq!(request.name, "");
        assert_eq!(request.raw_arguments, "{}");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 250 degree signs: 500 bytes, byte 499 is mid-character
        let long = "x".to_string() + &"°".repeat(250);
        assert!(long.len() > 500);

        let truncated = truncate_at_boundary(&long, 500);
        assert!(truncated.len() <= 500);
        assert!(long.starts_with(truncated));
        assert!(truncated.ends_with('°'));

        let short = "short";
        assert_eq!(truncate_at_boundary(short, 500), short);
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(OpenAiProvider::to_provider_turn(response).is_err());
    }
}
