use std::collections::HashMap;
use std::sync::Mutex;

use super::storage::ThreadStore;
use crate::error::Result;
use crate::models::ThreadState;

/// Process-local store; threads vanish when the process exits.
#[derive(Default)]
pub struct MemoryThreadStore {
    threads: Mutex<HashMap<String, ThreadState>>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThreadStore for MemoryThreadStore {
    fn load(&self, thread_id: &str) -> Result<Option<ThreadState>> {
        let threads = self.threads.lock().unwrap_or_else(|e| e.into_inner());
        Ok(threads.get(thread_id).cloned())
    }

    fn save(&self, thread: &ThreadState) -> Result<()> {
        let mut threads = self.threads.lock().unwrap_or_else(|e| e.into_inner());
        threads.insert(thread.thread_id.clone(), thread.clone());
        Ok(())
    }

    fn clear_all(&self) -> Result<usize> {
        let mut threads = self.threads.lock().unwrap_or_else(|e| e.into_inner());
        let count = threads.len();
        threads.clear();
        Ok(count)
    }
}
