use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    default_ignore_dirs, default_max_file_size_mb, default_restrict_to_base_dir,
    default_tool_enabled, is_default_restrict_to_base_dir,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Directory relative paths are resolved against; `${VAR}` is expanded.
    /// Defaults to the home directory.
    #[serde(default)]
    pub base_dir: Option<String>,

    #[serde(default = "default_restrict_to_base_dir")]
    #[serde(skip_serializing_if = "is_default_restrict_to_base_dir")]
    pub restrict_to_base_dir: bool,

    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Names skipped by the directory tree when the caller gives no list.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    #[serde(default)]
    pub tools: Vec<ToolToggle>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            restrict_to_base_dir: default_restrict_to_base_dir(),
            max_file_size_mb: default_max_file_size_mb(),
            ignore_dirs: default_ignore_dirs(),
            tools: Vec::new(),
        }
    }
}

impl ToolsConfig {
    /// Tools are enabled unless listed with `enabled: false`.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.tools
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.enabled)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolToggle {
    pub name: String,
    #[serde(default = "default_tool_enabled")]
    pub enabled: bool,
}
