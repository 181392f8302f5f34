//! JSON wire format of the completion proxy.
//!
//! Request: `{model, system?, messages[{role, content}], temperature,
//! max_tokens, top_p, frequency_penalty, presence_penalty}`.
//!
//! The proxy relays whatever the upstream API returned, so three response
//! shapes are accepted:
//!
//! | Shape | Text location |
//! |-------|---------------|
//! | Anthropic | `content[].text` (text blocks concatenated) |
//! | OpenAI | `choices[0].message.content` or `choices[0].text` |
//! | Plain | top-level `text` or `completion` |

use cod_application::{CompletionRequest, GatewayError};
use cod_domain::Role;
use serde::Serialize;
use serde_json::Value;

/// Body POSTed to the proxy
#[derive(Debug, Clone, Serialize)]
pub struct ProxyRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<WireMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

/// Build the proxy body, clamping the temperature to `[0, max_temperature]`.
///
/// The system prompt travels in the top-level `system` field; the message
/// list only carries the conversation.
pub fn build_request_body(request: &CompletionRequest, max_temperature: f64) -> ProxyRequest {
    let params = request.params;
    ProxyRequest {
        model: request.model.to_string(),
        system: request.prompt.system().map(str::to_string),
        messages: request
            .prompt
            .conversation()
            .iter()
            .map(|m| WireMessage {
                role: m.role,
                content: m.content.clone(),
            })
            .collect(),
        temperature: params.temperature.clamp(0.0, max_temperature.max(0.0)),
        max_tokens: params.max_tokens,
        top_p: params.top_p,
        frequency_penalty: params.frequency_penalty,
        presence_penalty: params.presence_penalty,
    }
}

/// Extract the completion text from a proxy response body.
pub fn parse_completion_body(body: &str) -> Result<String, GatewayError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        GatewayError::MalformedResponse(format!("response is not JSON: {}", e))
    })?;

    // Some proxies always send the field and null it on success.
    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(GatewayError::Other(format!("proxy reported an error: {}", message)));
    }

    anthropic_text(&value)
        .or_else(|| openai_text(&value))
        .or_else(|| plain_text(&value))
        .ok_or_else(|| {
            GatewayError::MalformedResponse("no completion text in response".to_string())
        })
}

fn anthropic_text(value: &Value) -> Option<String> {
    let blocks = value.get("content")?.as_array()?;
    let text: String = blocks
        .iter()
        .filter(|b| b.get("type").and_then(Value::as_str).is_none_or(|t| t == "text"))
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect();
    if blocks.is_empty() { None } else { Some(text) }
}

fn openai_text(value: &Value) -> Option<String> {
    let choice = value.get("choices")?.as_array()?.first()?;
    choice
        .get("message")
        .and_then(|m| m.get("content"))
        .or_else(|| choice.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn plain_text(value: &Value) -> Option<String> {
    value
        .get("text")
        .or_else(|| value.get("completion"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
