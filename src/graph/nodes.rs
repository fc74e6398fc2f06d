//! Synthetic messages written by the graph itself.

use crate::models::{AssistantId, Message};

/// Appended to the transcript for the retry after an empty reply.
pub const RETRY_DIRECTIVE: &str = "Respond with a real output.";

pub fn retry_directive() -> Message {
    Message::user(RETRY_DIRECTIVE)
}

/// Tool result answering a handoff call; briefs the assistant taking over.
pub fn entry_message(tool_call_id: &str, assistant: AssistantId) -> Message {
    let name = assistant.display_name();
    Message::tool(
        tool_call_id,
        format!(
            "The assistant is now the {name}. Reflect on the above conversation between the \
             host assistant and the user. The user's intent is unsatisfied. Use the provided \
             tools to assist the user. Remember, you are the {name}, and the task is not \
             complete until after you have successfully invoked the appropriate tool. If the \
             user changes their mind or needs help with other tasks, call the \
             complete_or_escalate function to let the host assistant take control. Do not \
             mention who you are - just act as the proxy for the assistant."
        ),
    )
}

/// Tool result answering `complete_or_escalate`.
pub fn exit_message(tool_call_id: &str) -> Message {
    Message::tool(
        tool_call_id,
        "Resuming dialog with the host assistant. Please reflect on the past conversation \
         and assist the user as needed.",
    )
}

/// Tool result for a call that was dropped because another call in the
/// same message transferred control.
pub fn skipped_message(tool_call_id: &str, tool: &str) -> Message {
    Message::tool(
        tool_call_id,
        format!(
            "Error: '{}' was not executed because control was transferred in the same step. \
             Call it again if it is still needed.",
            tool
        ),
    )
}

/// Answers for every call of `reply`: `answer` for the control call
/// `call_id`, a skip notice for the rest.
pub fn answer_control_call(reply: &Message, call_id: &str, answer: Message) -> Vec<Message> {
    let mut answer = Some(answer);
    reply
        .tool_calls()
        .iter()
        .map(|call| {
            if call.id == call_id {
                answer
                    .take()
                    .unwrap_or_else(|| skipped_message(&call.id, call.name()))
            } else {
                skipped_message(&call.id, call.name())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, ToolCall};

    #[test]
    fn entry_message_answers_the_handoff_call() {
        let message = entry_message("call_7", AssistantId::DirectoryMapper);
        assert_eq!(message.role, Role::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("call_7"));
        assert!(message.text().contains("directory mapping assistant"));
        assert!(message.text().contains("complete_or_escalate"));
    }

    #[test]
    fn every_call_gets_exactly_one_answer() {
        let reply = Message::assistant_with_tools(
            None,
            vec![
                ToolCall::function("a", "get_directory_tree", "{}"),
                ToolCall::function("b", "complete_or_escalate", "{}"),
            ],
        );
        let answers = answer_control_call(&reply, "b", exit_message("b"));
        let ids: Vec<_> = answers
            .iter()
            .map(|m| m.tool_call_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(answers[0].text().starts_with("Error:"));
        assert!(answers[1].text().starts_with("Resuming dialog"));
    }
}
