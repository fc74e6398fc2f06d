//! Language-model capability: send a transcript, get back an assistant
//! message that is either a reply or a set of tool-call requests.

pub mod openai;
pub mod scripted;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::Message;

pub use openai::OpenAiCompatibleModel;
pub use scripted::ScriptedModel;

/// One model invocation: the full transcript plus the function-calling
/// schemas the assistant is bound to.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<Value>,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<Message>;
}
