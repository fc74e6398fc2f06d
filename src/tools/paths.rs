use std::path::{Path, PathBuf};

use super::registry::ToolSettings;

const MAX_PATH_LEN: usize = 4096;

fn validate_user_path(user_path: &str) -> Result<(), String> {
    if user_path.trim().is_empty() || user_path.len() > MAX_PATH_LEN {
        return Err("Invalid path: path must be non-empty and under 4096 characters".to_string());
    }
    Ok(())
}

/// Join a user path onto the base directory. Absolute paths and `~/` paths
/// are taken as given.
pub fn join_user_path(user_path: &str, base_dir: &Path) -> PathBuf {
    if let Some(rest) = user_path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    let path = PathBuf::from(user_path);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

fn ensure_within_base(resolved: &Path, user_path: &str, settings: &ToolSettings) -> Result<(), String> {
    if !settings.restrict_to_base_dir {
        return Ok(());
    }

    let base_canonical = settings
        .base_dir
        .canonicalize()
        .map_err(|e| format!("Failed to canonicalize base directory: {}", e))?;

    if !resolved.starts_with(&base_canonical) {
        return Err(format!(
            "Path traversal detected: '{}' escapes base directory",
            user_path
        ));
    }
    Ok(())
}

/// Resolve a path that must already exist.
pub fn resolve_existing(user_path: &str, settings: &ToolSettings) -> Result<PathBuf, String> {
    validate_user_path(user_path)?;

    let resolved = join_user_path(user_path, &settings.base_dir)
        .canonicalize()
        .map_err(|e| format!("Failed to resolve path '{}': {}", user_path, e))?;

    ensure_within_base(&resolved, user_path, settings)?;
    Ok(resolved)
}

/// Resolve a file path about to be written. The parent directory must
/// exist; the file itself may not.
pub fn resolve_output(user_path: &str, settings: &ToolSettings) -> Result<PathBuf, String> {
    validate_user_path(user_path)?;

    let joined = join_user_path(user_path, &settings.base_dir);
    let file_name = joined
        .file_name()
        .ok_or_else(|| format!("Output path has no file name: {}", user_path))?
        .to_owned();

    let parent = match joined.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => settings.base_dir.clone(),
    };
    let parent = parent
        .canonicalize()
        .map_err(|e| format!("Output directory for '{}' does not exist: {}", user_path, e))?;

    let resolved = parent.join(file_name);
    ensure_within_base(&resolved, user_path, settings)?;

    if resolved.is_dir() {
        return Err(format!("Output path is a directory: {}", user_path));
    }
    Ok(resolved)
}

/// Convert a path to a String, handling non-UTF-8 paths gracefully
pub fn stringify_path(p: &Path) -> Result<String, String> {
    p.to_str()
        .ok_or_else(|| format!("Path contains invalid UTF-8: {}", p.display()))
        .map(|s| s.to_string())
}
