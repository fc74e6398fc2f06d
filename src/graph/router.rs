use thiserror::Error;

use crate::models::{AssistantId, DialogState, Message, Role};
use crate::tools::{ToolKind, ToolName};

/// Next step of a turn after an assistant invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Plain reply; the turn is over.
    Terminate,
    /// Neither text nor tool calls; ask the same assistant again.
    RetryEmpty(AssistantId),
    /// Execute regular tools, then hand back to the same assistant.
    RunTools(AssistantId),
    /// Push `target` and brief it through the answer to `call_id`.
    EnterSkill { target: AssistantId, call_id: String },
    /// Pop the active specialized assistant; `call_id` gets the
    /// acknowledgement.
    LeaveSkill { call_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("tool '{0}' matches no known tool or handoff")]
    UnknownTool(String),
    #[error("expected an assistant message, got {0:?}")]
    NotAssistantMessage(Role),
}

/// Decide what follows `message`, the latest assistant output.
///
/// Every requested name must resolve to a [`ToolName`]. The first
/// control-transfer call in request order wins over regular calls in the
/// same message.
pub fn route(dialog: &DialogState, message: &Message) -> Result<Route, RouteError> {
    if message.role != Role::Assistant {
        return Err(RouteError::NotAssistantMessage(message.role));
    }

    if !message.has_tool_calls() {
        return Ok(if message.is_blank_reply() {
            Route::RetryEmpty(dialog.current())
        } else {
            Route::Terminate
        });
    }

    let mut control = None;
    for call in message.tool_calls() {
        let name = ToolName::resolve(call.name())
            .ok_or_else(|| RouteError::UnknownTool(call.name().to_string()))?;

        if control.is_none() {
            match name.kind() {
                ToolKind::Regular => {}
                ToolKind::Handoff(target) => {
                    control = Some(Route::EnterSkill {
                        target,
                        call_id: call.id.clone(),
                    })
                }
                ToolKind::LeaveSkill => {
                    control = Some(Route::LeaveSkill {
                        call_id: call.id.clone(),
                    })
                }
            }
        }
    }

    Ok(control.unwrap_or(Route::RunTools(dialog.current())))
}
