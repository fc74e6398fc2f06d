//! Directory tree model, builder and text renderer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One entry of a directory tree. Directories always carry `children`
/// (possibly empty); files never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DirectoryNode>>,
}

impl DirectoryNode {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<DirectoryNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }
}

/// Entry names excluded from a tree. Plain names match exactly; entries
/// with `*`, `?` or `[` are glob patterns matched against the entry name.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    names: HashSet<String>,
    patterns: Vec<glob::Pattern>,
}

impl IgnoreRules {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::default();
        for entry in entries {
            rules.add(entry.as_ref());
        }
        rules
    }

    /// `defaults` plus the entries of `root/.gitignore`, if there is one.
    pub fn for_directory(root: &Path, defaults: &[String]) -> Self {
        let mut rules = Self::new(defaults);
        let gitignore = root.join(".gitignore");
        if let Ok(contents) = fs::read_to_string(&gitignore) {
            for line in contents.lines() {
                rules.add(line);
            }
            tracing::debug!(path = %gitignore.display(), "applied .gitignore entries");
        }
        rules
    }

    fn add(&mut self, raw: &str) {
        let entry = raw.trim();
        // Negations can't un-ignore anything here since matching is by name only
        if entry.is_empty() || entry.starts_with('#') || entry.starts_with('!') {
            return;
        }
        let entry = entry.trim_start_matches('/').trim_end_matches('/');
        if entry.is_empty() {
            return;
        }

        if entry.contains(['*', '?', '[']) {
            match glob::Pattern::new(entry) {
                Ok(pattern) => self.patterns.push(pattern),
                Err(e) => tracing::debug!(entry, error = %e, "skipping invalid ignore pattern"),
            }
        } else {
            self.names.insert(entry.to_string());
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.names.contains(name) || self.patterns.iter().any(|p| p.matches(name))
    }
}

/// Build the tree rooted at `root`: directories first, then files, each
/// group sorted by name. Unreadable directories get empty children;
/// symlinked directories are listed but not descended into.
pub fn build_tree(root: &Path, rules: &IgnoreRules) -> DirectoryNode {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    walk(root, name, rules)
}

fn walk(path: &Path, name: String, rules: &IgnoreRules) -> DirectoryNode {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable directory");
            return DirectoryNode::directory(name, Vec::new());
        }
    };

    let mut directories: Vec<(String, bool)> = Vec::new();
    let mut files: Vec<String> = Vec::new();

    for entry in entries.flatten() {
        let entry_name = entry.file_name().to_string_lossy().into_owned();
        if rules.is_ignored(&entry_name) {
            continue;
        }
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_symlink() {
            // Follow the link only to classify it
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => directories.push((entry_name, false)),
                Ok(meta) if meta.is_file() => files.push(entry_name),
                _ => {}
            }
        } else if file_type.is_dir() {
            directories.push((entry_name, true));
        } else if file_type.is_file() {
            files.push(entry_name);
        }
    }

    directories.sort();
    files.sort();

    let mut children = Vec::with_capacity(directories.len() + files.len());
    for (dir_name, descend) in directories {
        if descend {
            let child_path = path.join(&dir_name);
            children.push(walk(&child_path, dir_name, rules));
        } else {
            children.push(DirectoryNode::directory(dir_name, Vec::new()));
        }
    }
    children.extend(files.into_iter().map(DirectoryNode::file));

    DirectoryNode::directory(name, children)
}

/// Render a tree with box-drawing branches, one entry per line:
///
/// ```text
/// project/
/// ├── src/
/// │   └── main.rs
/// └── Cargo.toml
/// ```
pub fn render_stylized(root: &DirectoryNode) -> String {
    let mut lines = Vec::new();
    render_node(root, true, "", true, &mut lines);
    lines.join("\n")
}

fn render_node(node: &DirectoryNode, is_last: bool, prefix: &str, is_root: bool, lines: &mut Vec<String>) {
    let label = if node.is_directory() {
        format!("{}/", node.name)
    } else {
        node.name.clone()
    };

    if is_root {
        lines.push(label);
    } else {
        let branch = if is_last { "└──" } else { "├──" };
        lines.push(format!("{}{} {}", prefix, branch, label));
    }

    let Some(children) = &node.children else {
        return;
    };

    let child_prefix = if is_root {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    for (index, child) in children.iter().enumerate() {
        render_node(child, index + 1 == children.len(), &child_prefix, false, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_branches() {
        let tree = DirectoryNode::directory(
            "project",
            vec![
                DirectoryNode::directory(
                    "src",
                    vec![
                        DirectoryNode::directory("bin", vec![DirectoryNode::file("cli.rs")]),
                        DirectoryNode::file("lib.rs"),
                    ],
                ),
                DirectoryNode::directory("empty", vec![]),
                DirectoryNode::file("Cargo.toml"),
            ],
        );

        let expected = "\
project/
├── src/
│   ├── bin/
│   │   └── cli.rs
│   └── lib.rs
├── empty/
└── Cargo.toml";
        assert_eq!(render_stylized(&tree), expected);
    }

    #[test]
    fn renders_last_directory_with_blank_prefix() {
        let tree = DirectoryNode::directory(
            "root",
            vec![DirectoryNode::directory("only", vec![DirectoryNode::file("a.txt")])],
        );
        assert_eq!(render_stylized(&tree), "root/\n└── only/\n    └── a.txt");
    }

    #[test]
    fn ignore_rules_match_names_and_globs() {
        let rules = IgnoreRules::new(["node_modules", "/target/", "*.log", "# comment", "!keep.log", ""]);
        assert!(rules.is_ignored("node_modules"));
        assert!(rules.is_ignored("target"));
        assert!(rules.is_ignored("debug.log"));
        assert!(!rules.is_ignored("keep.txt"));
        assert!(!rules.is_ignored("# comment"));
    }

    #[test]
    fn files_serialize_without_children() {
        let json = serde_json::to_string(&DirectoryNode::file("a.txt")).unwrap();
        assert_eq!(json, r#"{"name":"a.txt"}"#);
        let json = serde_json::to_string(&DirectoryNode::directory("d", vec![])).unwrap();
        assert_eq!(json, r#"{"name":"d","children":[]}"#);
    }
}
