use crate::models::AssistantId;

/// Something that happened while a turn was running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Invoked {
        assistant: AssistantId,
    },
    ToolCalled {
        assistant: AssistantId,
        tool: String,
        arguments: String,
    },
    ToolFinished {
        tool: String,
        output: String,
        is_error: bool,
    },
    HandedOff {
        from: AssistantId,
        to: AssistantId,
    },
    Returned {
        from: AssistantId,
        to: AssistantId,
    },
    RetriedEmpty {
        assistant: AssistantId,
        attempt: usize,
    },
}

/// Receives turn events as they happen. Observers only watch; they cannot
/// change routing.
pub trait TurnObserver {
    fn on_event(&self, event: &TurnEvent);
}

pub struct NoopObserver;

impl TurnObserver for NoopObserver {
    fn on_event(&self, _event: &TurnEvent) {}
}
