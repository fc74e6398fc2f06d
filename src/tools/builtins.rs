use serde_json::Value;
use std::fs;

use super::paths::{join_user_path, resolve_existing, resolve_output, stringify_path};
use super::registry::ToolSettings;
use super::tree::{build_tree, render_stylized, DirectoryNode, IgnoreRules};

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing required argument: {}", key))
}

fn check_size(content: &str, settings: &ToolSettings) -> Result<(), String> {
    let len = content.len() as u64;
    if len > settings.max_file_size_bytes {
        return Err(format!(
            "Content too large: {} bytes (max: {} bytes)",
            len, settings.max_file_size_bytes
        ));
    }
    Ok(())
}

pub fn handle_get_resolved_path(args: &Value, settings: &ToolSettings) -> Result<String, String> {
    let path = args
        .get("path")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let resolved = match path {
        Some(path) => join_user_path(path, &settings.base_dir),
        None => std::env::current_dir()
            .map_err(|e| format!("Failed to read current directory: {}", e))?,
    };
    stringify_path(&resolved)
}

pub fn handle_get_directory_tree(args: &Value, settings: &ToolSettings) -> Result<String, String> {
    let path = required_str(args, "path")?;
    let root = resolve_existing(path, settings)?;
    if !root.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }

    // An explicit list replaces the defaults and .gitignore
    let rules = match args.get("ignore_dirs").and_then(|v| v.as_array()) {
        Some(list) => IgnoreRules::new(list.iter().filter_map(|v| v.as_str())),
        None => IgnoreRules::for_directory(&root, &settings.ignore_dirs),
    };

    let tree = build_tree(&root, &rules);
    serde_json::to_string(&tree).map_err(|e| format!("Failed to serialize tree: {}", e))
}

pub fn handle_save_json_to_file(args: &Value, settings: &ToolSettings) -> Result<String, String> {
    let json_string = required_str(args, "json_string")?;
    let output_path = required_str(args, "output_path")?;

    serde_json::from_str::<Value>(json_string)
        .map_err(|e| format!("json_string is not valid JSON: {}", e))?;
    check_size(json_string, settings)?;

    let resolved = resolve_output(output_path, settings)?;
    fs::write(&resolved, json_string).map_err(|e| format!("Failed to write file: {}", e))?;

    Ok(format!("JSON saved to: {}", resolved.display()))
}

pub fn handle_save_json_structure_as_txt(
    args: &Value,
    settings: &ToolSettings,
) -> Result<String, String> {
    let json_string = required_str(args, "json_string")?;
    let output_path = required_str(args, "output_path")?;

    let tree: DirectoryNode = serde_json::from_str(json_string)
        .map_err(|e| format!("json_string is not a directory tree: {}", e))?;
    let text = render_stylized(&tree);
    check_size(&text, settings)?;

    let resolved = resolve_output(output_path, settings)?;
    fs::write(&resolved, text).map_err(|e| format!("Failed to write file: {}", e))?;

    Ok(format!("Directory structure saved to: {}", resolved.display()))
}
