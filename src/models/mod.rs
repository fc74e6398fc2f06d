mod dialog;
mod message;
mod thread;
mod tool;

pub use dialog::{AssistantId, DialogState};
pub use message::{Message, Role};
pub use thread::ThreadState;
pub use tool::{FunctionCall, ToolCall};
