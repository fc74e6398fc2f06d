use crate::error::Result;
use crate::graph::{TurnObserver, TurnOutcome, TurnRunner};
use crate::models::ThreadState;
use crate::session::{trim_conversation_history, ThreadStore};

/// Ties the dialog graph to persistent threads. Each call to [`send`]
/// is one transaction: load, run on a working copy, save only on success.
///
/// [`send`]: Orchestrator::send
pub struct Orchestrator {
    runner: TurnRunner,
    store: Box<dyn ThreadStore>,
    max_history_turns: usize,
}

impl Orchestrator {
    pub fn new(runner: TurnRunner, store: Box<dyn ThreadStore>, max_history_turns: usize) -> Self {
        Self {
            runner,
            store,
            max_history_turns,
        }
    }

    pub fn store(&self) -> &dyn ThreadStore {
        self.store.as_ref()
    }

    /// Load `thread_id`, or start it fresh if it has never been saved.
    pub fn load_thread(&self, thread_id: &str) -> Result<ThreadState> {
        Ok(self
            .store
            .load(thread_id)?
            .unwrap_or_else(|| ThreadState::new(thread_id)))
    }

    /// Run one user turn on `thread_id`. On any error the stored thread is
    /// left exactly as it was before the call.
    pub async fn send(
        &self,
        thread_id: &str,
        user_input: &str,
        observer: &dyn TurnObserver,
    ) -> Result<TurnOutcome> {
        let stored = self.load_thread(thread_id)?;
        let mut working = stored.clone();

        let outcome = match self.runner.run_turn(&mut working, user_input, observer).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(thread = thread_id, error = %e, "turn failed; thread not saved");
                return Err(e);
            }
        };

        trim_conversation_history(&mut working.messages, self.max_history_turns);
        self.store.save(&working)?;

        tracing::info!(
            thread = thread_id,
            active = %working.dialog.current(),
            messages = working.messages.len(),
            invocations = outcome.invocations,
            "turn committed"
        );
        Ok(outcome)
    }
}
