use async_trait::async_trait;

use crate::api::client::build_client;
use crate::api::response::parse_assistant_message;
use crate::api::{make_api_request, RequestBody};
use crate::config::Config;
use crate::error::Result;
use crate::models::Message;

use super::{ChatModel, ChatRequest};

/// Chat-completions client for OpenAI-compatible endpoints (Groq,
/// OpenRouter, Ollama, ...).
pub struct OpenAiCompatibleModel {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    timeout_secs: u64,
}

impl OpenAiCompatibleModel {
    pub fn new(
        api_key: &str,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(api_key, timeout_secs)?,
            endpoint: endpoint.into(),
            model: model.into(),
            temperature,
            timeout_secs,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_key,
            config.api_endpoint.clone(),
            config.model.clone(),
            config.temperature,
            config.request_timeout,
        )
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatibleModel {
    async fn complete(&self, request: &ChatRequest) -> Result<Message> {
        let has_tools = !request.tools.is_empty();
        let body = RequestBody {
            model: self.model.clone(),
            messages: request.messages.clone(),
            stream: false,
            temperature: self.temperature,
            tools: has_tools.then(|| request.tools.clone()),
            tool_choice: has_tools.then(|| "auto".to_string()),
        };

        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            tools = request.tools.len(),
            "requesting chat completion"
        );

        let response = make_api_request(&self.client, &self.endpoint, &body, self.timeout_secs).await?;
        parse_assistant_message(&response)
    }
}
