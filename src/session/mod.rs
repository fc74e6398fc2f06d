mod filesystem;
mod memory;
mod storage;

pub use filesystem::FilesystemThreadStore;
pub use memory::MemoryThreadStore;
pub use storage::ThreadStore;

use uuid::Uuid;

use crate::models::{Message, Role};

/// Keep only the last `max_turns` user turns. Cuts happen just before a
/// user message, so a tool result is never separated from the call that
/// produced it. `0` keeps everything.
pub fn trim_conversation_history(messages: &mut Vec<Message>, max_turns: usize) {
    if max_turns == 0 {
        return;
    }

    let turn_starts: Vec<usize> = messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.role == Role::User)
        .map(|(i, _)| i)
        .collect();

    if turn_starts.len() <= max_turns {
        return;
    }

    let cut = turn_starts[turn_starts.len() - max_turns];
    messages.drain(..cut);
}

pub fn new_thread_id() -> String {
    Uuid::new_v4().to_string()
}
