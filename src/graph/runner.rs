use std::sync::Arc;

use crate::config::GraphConfig;
use crate::error::{AssistantError, Result};
use crate::llm::ChatModel;
use crate::models::{Message, ThreadState};
use crate::tools::ToolRegistry;

use super::assistant::AssistantSet;
use super::nodes;
use super::observer::{TurnEvent, TurnObserver};
use super::router::{route, Route};

#[derive(Debug, Clone, Default)]
pub struct TurnOutcome {
    /// Text of the final assistant reply (empty if the model never produced one).
    pub reply: String,
    pub events: Vec<TurnEvent>,
    /// Number of assistant invocations, retries included.
    pub invocations: usize,
}

/// Drives one user turn through the dialog graph: invoke the active
/// assistant, route its output, act, repeat until a plain reply.
pub struct TurnRunner {
    model: Arc<dyn ChatModel>,
    registry: ToolRegistry,
    assistants: AssistantSet,
    limits: GraphConfig,
}

impl TurnRunner {
    pub fn new(
        model: Arc<dyn ChatModel>,
        registry: ToolRegistry,
        assistants: AssistantSet,
        limits: GraphConfig,
    ) -> Self {
        Self {
            model,
            registry,
            assistants,
            limits,
        }
    }

    /// Run one turn against `thread`. The thread is mutated in place; on
    /// error it may hold a partial turn, so callers commit it only on `Ok`.
    pub async fn run_turn(
        &self,
        thread: &mut ThreadState,
        user_input: &str,
        observer: &dyn TurnObserver,
    ) -> Result<TurnOutcome> {
        let mut outcome = TurnOutcome::default();

        thread.messages.push(Message::user(user_input));

        let mut empty_retries = 0;
        let mut retry_pending = false;

        loop {
            if outcome.invocations >= self.limits.max_steps {
                tracing::warn!(thread = %thread.thread_id, steps = outcome.invocations, "step limit reached");
                return Err(AssistantError::StepLimit(self.limits.max_steps));
            }
            outcome.invocations += 1;

            let active = thread.dialog.current();
            let assistant = self.assistants.get(active);
            emit(observer, &mut outcome, TurnEvent::Invoked { assistant: active });
            tracing::debug!(assistant = %active, step = outcome.invocations, "invoking assistant");

            let reply = if retry_pending {
                // The directive is transient and never reaches the history
                let mut transcript = thread.messages.clone();
                transcript.push(nodes::retry_directive());
                assistant
                    .invoke(self.model.as_ref(), &transcript, &self.registry)
                    .await?
            } else {
                assistant
                    .invoke(self.model.as_ref(), &thread.messages, &self.registry)
                    .await?
            };
            retry_pending = false;

            let next = route(&thread.dialog, &reply)?;
            tracing::debug!(assistant = %active, route = ?next, "routed");

            match next {
                Route::RetryEmpty(assistant_id) if empty_retries < self.limits.empty_reply_retries => {
                    empty_retries += 1;
                    retry_pending = true;
                    emit(
                        observer,
                        &mut outcome,
                        TurnEvent::RetriedEmpty {
                            assistant: assistant_id,
                            attempt: empty_retries,
                        },
                    );
                }
                Route::RetryEmpty(_) | Route::Terminate => {
                    outcome.reply = if reply.is_blank_reply() {
                        String::new()
                    } else {
                        reply.text().to_string()
                    };
                    thread.messages.push(Message::assistant(outcome.reply.clone()));
                    thread.touch();
                    return Ok(outcome);
                }
                Route::RunTools(_) => {
                    empty_retries = 0;
                    thread.messages.push(reply.clone());
                    for call in reply.tool_calls() {
                        emit(
                            observer,
                            &mut outcome,
                            TurnEvent::ToolCalled {
                                assistant: active,
                                tool: call.name().to_string(),
                                arguments: call.function.arguments.clone(),
                            },
                        );
                        let result = self.registry.execute(call, &assistant.tools);
                        emit(
                            observer,
                            &mut outcome,
                            TurnEvent::ToolFinished {
                                tool: result.tool.clone(),
                                output: result.message.text().to_string(),
                                is_error: result.is_error,
                            },
                        );
                        thread.messages.push(result.message);
                    }
                }
                Route::EnterSkill { target, call_id } => {
                    empty_retries = 0;
                    thread.dialog.push(target);
                    let answers =
                        nodes::answer_control_call(&reply, &call_id, nodes::entry_message(&call_id, target));
                    thread.messages.push(reply);
                    thread.messages.extend(answers);
                    emit(observer, &mut outcome, TurnEvent::HandedOff { from: active, to: target });
                }
                Route::LeaveSkill { call_id } => {
                    empty_retries = 0;
                    let resumed = thread.dialog.pop();
                    let answers = nodes::answer_control_call(&reply, &call_id, nodes::exit_message(&call_id));
                    thread.messages.push(reply);
                    thread.messages.extend(answers);
                    emit(observer, &mut outcome, TurnEvent::Returned { from: active, to: resumed });
                }
            }
        }
    }
}

fn emit(observer: &dyn TurnObserver, outcome: &mut TurnOutcome, event: TurnEvent) {
    observer.on_event(&event);
    outcome.events.push(event);
}
