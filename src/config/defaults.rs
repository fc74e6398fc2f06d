pub const DEFAULT_API_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";
pub const DEFAULT_THREAD_ID: &str = "default";

pub fn default_temperature() -> f32 {
    0.0
}

pub fn default_request_timeout() -> u64 {
    60
}

pub fn default_max_steps() -> usize {
    25
}

pub fn default_empty_reply_retries() -> usize {
    1 // One directive, two attempts in total
}

pub fn default_max_history_turns() -> usize {
    20
}

pub fn default_tool_enabled() -> bool {
    true
}

pub fn default_max_file_size_mb() -> u64 {
    10
}

pub fn default_restrict_to_base_dir() -> bool {
    true // Default to true for security
}

pub fn is_default_restrict_to_base_dir(value: &bool) -> bool {
    *value == default_restrict_to_base_dir()
}

pub fn default_ignore_dirs() -> Vec<String> {
    [
        ".git",
        ".venv",
        "venv",
        "node_modules",
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
