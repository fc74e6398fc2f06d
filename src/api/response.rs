use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::{AssistantError, Result};
use crate::models::{Message, ToolCall};

fn first_message(response_json: &Value) -> Result<&Value> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| AssistantError::ResponseError("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| AssistantError::ResponseError("Empty choices array".to_string()))?;

    first_choice
        .get("message")
        .ok_or_else(|| AssistantError::ResponseError("No message in response".to_string()))
}

/// Parse the tool calls of a non-streaming response, if any.
pub fn parse_tool_calls(response_json: &Value) -> Result<Option<Vec<ToolCall>>> {
    let message = first_message(response_json)?;

    let Some(raw_calls) = message.get("tool_calls").and_then(|tc| tc.as_array()) else {
        return Ok(None);
    };
    if raw_calls.is_empty() {
        return Ok(None);
    }

    let calls = raw_calls
        .iter()
        .map(|raw| {
            serde_json::from_value::<ToolCall>(raw.clone()).map_err(|e| {
                AssistantError::ResponseError(format!("Malformed tool call {}: {}", raw, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(calls))
}

/// Extract content from a non-streaming response
pub fn extract_content(response_json: &Value) -> Result<Option<String>> {
    let message = first_message(response_json)?;
    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string()))
}

/// Extract a separately reported reasoning trace, if the provider sends one.
pub fn extract_reasoning(response_json: &Value) -> Result<Option<String>> {
    let message = first_message(response_json)?;
    Ok(message
        .get("reasoning")
        .or_else(|| message.get("reasoning_content"))
        .and_then(|r| r.as_str())
        .map(|s| s.to_string()))
}

fn think_block() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<think>.*?</think>|^\s*<think>.*$").expect("valid think pattern"))
}

/// Remove inline `<think>...</think>` reasoning that some models prepend
/// to their reply. An unclosed tag only counts when it opens the reply.
pub fn strip_think_blocks(content: &str) -> String {
    think_block().replace_all(content, "").trim().to_string()
}

/// Turn a chat-completion response into the assistant message that is
/// appended to the conversation.
pub fn parse_assistant_message(response_json: &Value) -> Result<Message> {
    if let Some(reasoning) = extract_reasoning(response_json)? {
        tracing::debug!(reasoning = %reasoning, "model reasoning");
    }

    let content = extract_content(response_json)?
        .map(|c| strip_think_blocks(&c))
        .filter(|c| !c.is_empty());
    let tool_calls = parse_tool_calls(response_json)?.unwrap_or_default();

    Ok(Message::assistant_with_tools(content, tool_calls))
}
