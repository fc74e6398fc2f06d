use crate::config::Config;
use crate::error::Result;
use crate::llm::{ChatModel, ChatRequest};
use crate::models::{AssistantId, Message, Role};
use crate::tools::{ToolName, ToolRegistry};

const GENERAL_PROMPT: &str = "You are a helpful and friendly AI assistant. \
When the user wants the structure of a directory mapped, listed or saved to a file, \
call transfer_to_directory_mapper; the user will not see the transfer, so do not mention it. \
Answer everything else yourself.";

const DIRECTORY_MAPPER_PROMPT: &str = "You are a specialized assistant for mapping directory \
structures. The primary assistant delegates work to you whenever the user needs a directory \
tree. Use get_resolved_path when the location is unclear, get_directory_tree to build the \
tree, and save_json_to_file or save_json_structure_as_txt only when the user asked for a \
file, passing the exact JSON returned by get_directory_tree. When the task is done, or if \
the user changes topic, call complete_or_escalate.";

/// A language model bound to a prompt and a fixed set of tools.
#[derive(Debug, Clone)]
pub struct Assistant {
    pub id: AssistantId,
    pub prompt: String,
    pub tools: Vec<ToolName>,
}

impl Assistant {
    pub fn general(prompt: Option<String>) -> Self {
        Self {
            id: AssistantId::General,
            prompt: prompt.unwrap_or_else(|| GENERAL_PROMPT.to_string()),
            tools: vec![ToolName::TransferToDirectoryMapper],
        }
    }

    pub fn directory_mapper(prompt: Option<String>) -> Self {
        Self {
            id: AssistantId::DirectoryMapper,
            prompt: prompt.unwrap_or_else(|| DIRECTORY_MAPPER_PROMPT.to_string()),
            tools: vec![
                ToolName::GetResolvedPath,
                ToolName::GetDirectoryTree,
                ToolName::SaveJsonToFile,
                ToolName::SaveJsonStructureAsTxt,
                ToolName::CompleteOrEscalate,
            ],
        }
    }

    pub fn system_message(&self) -> Message {
        Message::system(format!(
            "Today's date is {}.\n\n{}",
            Config::get_current_date(),
            self.prompt
        ))
    }

    /// Call the model with this assistant's prompt and tools in front of
    /// `history`. Model errors are returned unchanged.
    pub async fn invoke(
        &self,
        model: &dyn ChatModel,
        history: &[Message],
        registry: &ToolRegistry,
    ) -> Result<Message> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(self.system_message());
        messages.extend(history.iter().filter(|m| m.role != Role::System).cloned());

        let request = ChatRequest {
            messages,
            tools: registry.schemas_for(&self.tools),
        };

        let mut reply = model.complete(&request).await?;
        reply.role = Role::Assistant;
        Ok(reply)
    }
}

/// The assistants a dialog can route between.
#[derive(Debug, Clone)]
pub struct AssistantSet {
    general: Assistant,
    directory_mapper: Assistant,
}

impl AssistantSet {
    pub fn new(general_prompt: Option<String>, directory_mapper_prompt: Option<String>) -> Self {
        Self {
            general: Assistant::general(general_prompt),
            directory_mapper: Assistant::directory_mapper(directory_mapper_prompt),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.general_prompt.clone(),
            config.directory_mapper_prompt.clone(),
        )
    }

    pub fn get(&self, id: AssistantId) -> &Assistant {
        match id {
            AssistantId::General => &self.general,
            AssistantId::DirectoryMapper => &self.directory_mapper,
        }
    }
}

impl Default for AssistantSet {
    fn default() -> Self {
        Self::new(None, None)
    }
}
