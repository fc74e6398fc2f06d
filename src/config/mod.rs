mod api;
mod defaults;
mod tools;
mod validation;

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::{normalize_endpoint, ApiConfig};
pub use defaults::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL, DEFAULT_THREAD_ID};
pub use tools::{ToolToggle, ToolsConfig};
pub use validation::{expand_env_var_in_string, parse_bool_flag};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub max_history_turns: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub general_prompt: Option<String>,
    #[serde(default)]
    pub directory_mapper_prompt: Option<String>,
}

/// Limits applied to a single turn of the dialog graph.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    #[serde(default = "defaults::default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "defaults::default_empty_reply_retries")]
    pub empty_reply_retries: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_steps: defaults::default_max_steps(),
            empty_reply_retries: defaults::default_empty_reply_retries(),
        }
    }
}

/// Contents of `.ai-assistant.yaml` (or `.yml` / `.json`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub request_timeout: u64,
    pub verbose: bool,
    pub thread_id: String,
    pub max_history_turns: usize,
    pub general_prompt: Option<String>,
    pub directory_mapper_prompt: Option<String>,
    pub graph: GraphConfig,
    pub tools: ToolsConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        let file_config = match FileConfig::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring config file: {:#}", e);
                FileConfig::default()
            }
        };
        Self::resolve(args, file_config)
    }

    /// Merge CLI args > env vars > config file > defaults.
    pub fn resolve(args: &Args, file_config: FileConfig) -> Result<Self, String> {
        // API key only comes from the environment
        let api_key = env::var("AI_API_KEY")
            .map_err(|_| "AI_API_KEY environment variable not set".to_string())?;

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("AI_API_ENDPOINT").ok())
            .or(file_config.api.endpoint.clone())
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model = args
            .model
            .clone()
            .or_else(|| env::var("AI_MODEL").ok())
            .or(file_config.model.name.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = env::var("AI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse::<f32>().ok())
            .or(file_config.model.temperature)
            .unwrap_or_else(defaults::default_temperature);

        let request_timeout = env::var("AI_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.api.request_timeout)
            .unwrap_or_else(defaults::default_request_timeout);

        let verbose = args.verbose
            || env::var("AI_VERBOSE")
                .ok()
                .map(|v| parse_bool_flag(&v))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        let thread_id = args
            .thread
            .clone()
            .or(file_config.session.thread_id.clone())
            .unwrap_or_else(|| DEFAULT_THREAD_ID.to_string());

        let max_history_turns = file_config
            .session
            .max_history_turns
            .unwrap_or_else(defaults::default_max_history_turns);

        let mut tools = file_config.tools;
        if let Some(base_dir) = args
            .base_dir
            .clone()
            .or_else(|| env::var("AI_BASE_DIR").ok())
        {
            tools.base_dir = Some(base_dir);
        }

        if file_config.graph.max_steps == 0 {
            return Err("graph.max_steps must be at least 1".to_string());
        }

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            temperature,
            request_timeout,
            verbose,
            thread_id,
            max_history_turns,
            general_prompt: file_config.model.general_prompt,
            directory_mapper_prompt: file_config.model.directory_mapper_prompt,
            graph: file_config.graph,
            tools,
        })
    }

    pub fn get_current_date() -> String {
        chrono::Local::now().format("%A, %B %d, %Y").to_string()
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::from_path(&path);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (highest priority - local override)
        paths.push(PathBuf::from(".ai-assistant.yaml"));
        paths.push(PathBuf::from(".ai-assistant.yml"));
        paths.push(PathBuf::from(".ai-assistant.json"));

        // 2. User's config directory (global config)
        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.yml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }

    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("ai-assistant"))
    }

    /// Write an annotated example config to `path`, refusing to overwrite.
    pub fn write_example(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

pub const EXAMPLE_CONFIG: &str = r#"# ai-assistant configuration
api:
  endpoint: https://api.groq.com/openai/v1
  request_timeout: 60

model:
  name: deepseek-r1-distill-llama-70b
  temperature: 0.0
  # general_prompt: "You are a helpful and friendly AI assistant."

session:
  verbose: false
  thread_id: default
  max_history_turns: 20

graph:
  max_steps: 25
  empty_reply_retries: 1

tools:
  base_dir: ${HOME}
  max_file_size_mb: 10
  ignore_dirs: [".git", ".venv", "venv", "node_modules", "__pycache__", ".pytest_cache", ".mypy_cache"]
  tools:
    - name: save_json_to_file
      enabled: true
"#;
