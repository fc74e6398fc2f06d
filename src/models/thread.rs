use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::dialog::DialogState;
use super::message::Message;

/// Everything persisted for one conversation thread.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThreadState {
    pub thread_id: String,
    pub last_updated: DateTime<Local>,
    #[serde(default)]
    pub dialog: DialogState,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ThreadState {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            last_updated: Local::now(),
            dialog: DialogState::new(),
            messages: Vec::new(),
        }
    }

    pub fn touch(&mut self) {
        self.last_updated = Local::now();
    }
}
