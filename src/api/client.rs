use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use crate::api::RequestBody;
use crate::error::{AssistantError, Result};

pub fn build_client(api_key: &str, timeout_secs: u64) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| AssistantError::ConfigError(format!("Invalid authorization header: {}", e)))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// POST a chat-completion request and return the decoded JSON body.
/// Non-2xx statuses become `ApiError` carrying the response text.
pub async fn make_api_request(
    client: &reqwest::Client,
    api_endpoint: &str,
    request_body: &RequestBody,
    timeout_secs: u64,
) -> Result<serde_json::Value> {
    let response = client
        .post(api_endpoint)
        .json(request_body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AssistantError::Timeout(timeout_secs)
            } else {
                AssistantError::NetworkError(e)
            }
        })?;

    let status = response.status();
    tracing::debug!(status = %status, "chat completion response");

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AssistantError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    let text = response.text().await?;
    tracing::trace!(body = %text, "raw response");
    Ok(serde_json::from_str(&text)?)
}
