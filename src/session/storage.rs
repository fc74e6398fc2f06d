use crate::error::Result;
use crate::models::ThreadState;

/// Persistence for conversation threads, keyed by thread id.
pub trait ThreadStore: Send + Sync {
    /// Load a thread, or `None` if it was never saved.
    fn load(&self, thread_id: &str) -> Result<Option<ThreadState>>;

    /// Replace the stored copy of `thread` as a single atomic write.
    fn save(&self, thread: &ThreadState) -> Result<()>;

    /// Delete every stored thread and return how many were removed.
    fn clear_all(&self) -> Result<usize>;
}
