use std::fs;
use std::path::{Path, PathBuf};

use super::storage::ThreadStore;
use crate::error::{AssistantError, Result};
use crate::models::ThreadState;

const FILE_PREFIX: &str = "thread-";

/// Stores each thread as `thread-<id>.json` in one directory.
pub struct FilesystemThreadStore {
    dir: PathBuf,
}

impl FilesystemThreadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.cache/ai-assistant` (or the platform cache dir).
    pub fn default_location() -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .ok_or_else(|| AssistantError::StoreError("no cache directory available".to_string()))?;
        Ok(Self::new(cache_dir.join("ai-assistant")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn thread_path(&self, thread_id: &str) -> Result<PathBuf> {
        let valid = !thread_id.is_empty()
            && thread_id.len() <= 128
            && thread_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !thread_id.starts_with('.');
        if !valid {
            return Err(AssistantError::StoreError(format!(
                "invalid thread id '{}': use letters, digits, '-', '_' or '.'",
                thread_id
            )));
        }
        Ok(self.dir.join(format!("{}{}.json", FILE_PREFIX, thread_id)))
    }

    fn is_thread_file(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some("json")
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(FILE_PREFIX))
    }
}

impl ThreadStore for FilesystemThreadStore {
    fn load(&self, thread_id: &str) -> Result<Option<ThreadState>> {
        let path = self.thread_path(thread_id)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let thread: ThreadState = serde_json::from_str(&content).map_err(|e| {
            AssistantError::StoreError(format!("corrupt thread file {}: {}", path.display(), e))
        })?;
        tracing::debug!(thread = thread_id, messages = thread.messages.len(), "loaded thread");
        Ok(Some(thread))
    }

    fn save(&self, thread: &ThreadState) -> Result<()> {
        let path = self.thread_path(&thread.thread_id)?;
        fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written thread
        let tmp = self.dir.join(format!(".{}{}.json.tmp", FILE_PREFIX, thread.thread_id));
        let content = serde_json::to_string_pretty(thread)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(thread = %thread.thread_id, path = %path.display(), "saved thread");
        Ok(())
    }

    fn clear_all(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if Self::is_thread_file(&path) {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
