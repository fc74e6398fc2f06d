use serde::{Deserialize, Serialize};
use std::fmt;

/// Assistants that can own a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantId {
    General,
    DirectoryMapper,
}

impl AssistantId {
    pub const ALL: [AssistantId; 2] = [AssistantId::General, AssistantId::DirectoryMapper];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantId::General => "general",
            AssistantId::DirectoryMapper => "directory_mapper",
        }
    }

    /// Name used when briefing the model about who owns the conversation.
    pub fn display_name(&self) -> &'static str {
        match self {
            AssistantId::General => "primary assistant",
            AssistantId::DirectoryMapper => "directory mapping assistant",
        }
    }

    pub fn is_specialized(&self) -> bool {
        !matches!(self, AssistantId::General)
    }
}

impl fmt::Display for AssistantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stack of specialized assistants entered during a conversation.
///
/// The general assistant is the implicit base: it is never stored, and an
/// empty stack means it is active. At most one specialized assistant is on
/// the stack at any time. A stored list is normalized on load: general
/// entries are dropped and only the last specialized one is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AssistantId>", into = "Vec<AssistantId>")]
pub struct DialogState {
    stack: Vec<AssistantId>,
}

impl From<Vec<AssistantId>> for DialogState {
    fn from(stored: Vec<AssistantId>) -> Self {
        let mut dialog = Self::new();
        if let Some(active) = stored.into_iter().rev().find(AssistantId::is_specialized) {
            dialog.stack.push(active);
        }
        dialog
    }
}

impl From<DialogState> for Vec<AssistantId> {
    fn from(dialog: DialogState) -> Self {
        dialog.stack
    }
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> AssistantId {
        self.stack.last().copied().unwrap_or(AssistantId::General)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn stack(&self) -> &[AssistantId] {
        &self.stack
    }

    /// Enter `assistant`. Returns false when nothing changed: entering the
    /// general assistant or the one already active. Entering a different
    /// specialized assistant replaces the active one.
    pub fn push(&mut self, assistant: AssistantId) -> bool {
        if !assistant.is_specialized() || self.current() == assistant {
            return false;
        }
        self.stack.clear();
        self.stack.push(assistant);
        true
    }

    /// Leave the active specialized assistant and return the assistant that
    /// now owns the conversation. On an empty stack this is a no-op.
    pub fn pop(&mut self) -> AssistantId {
        self.stack.pop();
        self.current()
    }
}
