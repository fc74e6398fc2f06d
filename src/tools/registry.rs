use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::{expand_env_var_in_string, ToolsConfig};
use crate::models::{Message, ToolCall};

use super::builtins;
use super::control::control_tool_schema;
use super::name::ToolName;

#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub base_dir: PathBuf,
    pub restrict_to_base_dir: bool,
    pub max_file_size_bytes: u64,
    pub ignore_dirs: Vec<String>,
}

impl ToolSettings {
    pub fn from_config(config: &ToolsConfig) -> Self {
        let base_dir = config
            .base_dir
            .as_ref()
            .map(|s| expand_env_var_in_string(s))
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            base_dir,
            restrict_to_base_dir: config.restrict_to_base_dir,
            max_file_size_bytes: config.max_file_size_mb.saturating_mul(1024 * 1024),
            ignore_dirs: config.ignore_dirs.clone(),
        }
    }
}

pub type ToolHandler = fn(&Value, &ToolSettings) -> Result<String, String>;

pub struct LocalTool {
    pub name: ToolName,
    pub description: String,
    pub input_schema: Value,
    pub handler: ToolHandler,
}

/// Result of executing one tool call.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub tool: String,
    pub message: Message,
    pub is_error: bool,
}

pub struct ToolRegistry {
    tools: HashMap<ToolName, LocalTool>,
    settings: ToolSettings,
}

impl ToolRegistry {
    pub fn new(config: &ToolsConfig, settings: ToolSettings) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
            settings,
        };
        registry.register_builtin_tools(|name| config.is_enabled(name));
        registry
    }

    /// Registry with every built-in tool enabled.
    pub fn with_settings(settings: ToolSettings) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
            settings,
        };
        registry.register_builtin_tools(|_| true);
        registry
    }

    fn register_builtin_tools(&mut self, is_enabled: impl Fn(&str) -> bool) {
        let builtins = [
            LocalTool {
                name: ToolName::GetResolvedPath,
                description: "Resolve the absolute path of a directory or file. Without a path, \
                              returns the current working directory; otherwise the path is taken \
                              relative to the user's base directory."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": ["string", "null"],
                            "description": "Directory or file path relative to the base directory"
                        }
                    },
                    "additionalProperties": false
                }),
                handler: builtins::handle_get_resolved_path,
            },
            LocalTool {
                name: ToolName::GetDirectoryTree,
                description: "Build the tree of a directory as a JSON string of {name, children} \
                              nodes. Common clutter (.git, node_modules, virtualenvs, caches) and \
                              .gitignore entries are skipped unless ignore_dirs is given."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Directory to explore"
                        },
                        "ignore_dirs": {
                            "type": ["array", "null"],
                            "items": { "type": "string" },
                            "description": "Names to skip; replaces the default list"
                        }
                    },
                    "required": ["path"],
                    "additionalProperties": false
                }),
                handler: builtins::handle_get_directory_tree,
            },
            LocalTool {
                name: ToolName::SaveJsonToFile,
                description: "Save a JSON string, such as the output of get_directory_tree, to a \
                              .json file. Only use when the user asked for a file."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "json_string": {
                            "type": "string",
                            "description": "JSON document to save"
                        },
                        "output_path": {
                            "type": "string",
                            "description": "Destination .json file"
                        }
                    },
                    "required": ["json_string", "output_path"],
                    "additionalProperties": false
                }),
                handler: builtins::handle_save_json_to_file,
            },
            LocalTool {
                name: ToolName::SaveJsonStructureAsTxt,
                description: "Convert a directory tree JSON string (from get_directory_tree) into \
                              a text drawing with branch lines and save it to a .txt file. Only \
                              use when the user asked for a file."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "json_string": {
                            "type": "string",
                            "description": "Directory tree JSON"
                        },
                        "output_path": {
                            "type": "string",
                            "description": "Destination .txt file"
                        }
                    },
                    "required": ["json_string", "output_path"],
                    "additionalProperties": false
                }),
                handler: builtins::handle_save_json_structure_as_txt,
            },
        ];

        for tool in builtins {
            if is_enabled(tool.name.as_str()) {
                self.tools.insert(tool.name, tool);
            } else {
                tracing::debug!(tool = %tool.name, "tool disabled by config");
            }
        }
    }

    pub fn get(&self, name: ToolName) -> Option<&LocalTool> {
        self.tools.get(&name)
    }

    pub fn list(&self) -> Vec<&LocalTool> {
        let mut tools: Vec<&LocalTool> = self.tools.values().collect();
        tools.sort_by_key(|t| t.name);
        tools
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Function-calling schemas for `names`, in order. Disabled tools are
    /// left out; control tools are always present.
    pub fn schemas_for(&self, names: &[ToolName]) -> Vec<Value> {
        names
            .iter()
            .filter_map(|name| {
                if name.is_control() {
                    return control_tool_schema(*name);
                }
                self.tools.get(name).map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name.as_str(),
                            "description": tool.description,
                            "parameters": tool.input_schema,
                        }
                    })
                })
            })
            .collect()
    }

    pub fn validate_arguments(&self, name: ToolName, arguments: &Value) -> Result<(), String> {
        let tool = self
            .tools
            .get(&name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&tool.input_schema)
            .map_err(|e| format!("Invalid tool schema: {}", e))?;

        if let Err(errors) = schema.validate(arguments) {
            let error_messages: Vec<String> = errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect();
            return Err(error_messages.join("; "));
        }

        Ok(())
    }

    /// Run one regular tool call on behalf of an assistant bound to
    /// `allowed`. Every failure becomes an `Error: ...` tool result so the
    /// model can correct itself on the next invocation.
    pub fn execute(&self, call: &ToolCall, allowed: &[ToolName]) -> ToolOutcome {
        let name = call.name().to_string();
        match self.run(call, allowed) {
            Ok(text) => ToolOutcome {
                tool: name,
                message: Message::tool(&call.id, text),
                is_error: false,
            },
            Err(e) => {
                tracing::debug!(tool = %name, error = %e, "tool call failed");
                ToolOutcome {
                    tool: name,
                    message: Message::tool(&call.id, format!("Error: {}", e)),
                    is_error: true,
                }
            }
        }
    }

    fn run(&self, call: &ToolCall, allowed: &[ToolName]) -> Result<String, String> {
        let name = ToolName::resolve(call.name())
            .ok_or_else(|| format!("Tool '{}' not found", call.name()))?;

        if !allowed.contains(&name) {
            return Err(format!(
                "Tool '{}' is not available to the active assistant",
                name
            ));
        }

        let tool = self
            .tools
            .get(&name)
            .ok_or_else(|| format!("Tool '{}' is disabled", name))?;

        let raw = call.function.arguments.trim();
        let arguments: Value = if raw.is_empty() {
            json!({})
        } else {
            serde_json::from_str(raw)
                .map_err(|e| format!("failed to parse arguments for tool '{}': {}", name, e))?
        };

        self.validate_arguments(name, &arguments)
            .map_err(|e| format!("invalid arguments for tool '{}': {}", name, e))?;

        (tool.handler)(&arguments, &self.settings)
    }
}
