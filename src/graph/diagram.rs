//! Mermaid rendering of the dialog graph, derived from the assistants'
//! tool bindings.

use std::collections::BTreeSet;

use crate::models::AssistantId;
use crate::tools::{ToolKind, ToolName};

use super::assistant::AssistantSet;

const LEAVE_SKILL: &str = "leave_skill";

/// `graph TD` flowchart: one node per assistant, its tool node, the
/// enter/leave skill nodes and the terminal node.
pub fn render_mermaid(assistants: &AssistantSet) -> String {
    let mut lines = vec!["graph TD".to_string(), "    start([start])".to_string()];
    let mut entered = BTreeSet::new();
    let mut leaves = false;

    for id in AssistantId::ALL {
        let node = id.as_str();
        lines.push(format!("    start -->|active| {}", node));

        let assistant = assistants.get(id);
        let regular: Vec<&str> = assistant
            .tools
            .iter()
            .filter(|tool| tool.kind() == ToolKind::Regular)
            .map(ToolName::as_str)
            .collect();
        if !regular.is_empty() {
            lines.push(format!("    {} -->|{}| {}_tools", node, regular.join(", "), node));
            lines.push(format!("    {}_tools --> {}", node, node));
        }

        for tool in &assistant.tools {
            match tool.kind() {
                ToolKind::Regular => {}
                ToolKind::Handoff(target) => {
                    lines.push(format!("    {} -->|{}| enter_{}", node, tool, target));
                    entered.insert(target.as_str());
                }
                ToolKind::LeaveSkill => {
                    lines.push(format!("    {} -->|{}| {}", node, tool, LEAVE_SKILL));
                    leaves = true;
                }
            }
        }

        lines.push(format!("    {} -->|empty reply| {}", node, node));
        lines.push(format!("    {} -->|reply| finish([end])", node));
    }

    for target in entered {
        lines.push(format!("    enter_{} --> {}", target, target));
    }
    if leaves {
        lines.push(format!("    {} --> {}", LEAVE_SKILL, AssistantId::General));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_handoff_and_return_edges() {
        let diagram = render_mermaid(&AssistantSet::default());
        let lines: Vec<&str> = diagram.lines().map(str::trim).collect();

        assert_eq!(lines[0], "graph TD");
        for edge in [
            "start -->|active| general",
            "start -->|active| directory_mapper",
            "general -->|transfer_to_directory_mapper| enter_directory_mapper",
            "enter_directory_mapper --> directory_mapper",
            "directory_mapper -->|get_resolved_path, get_directory_tree, save_json_to_file, save_json_structure_as_txt| directory_mapper_tools",
            "directory_mapper_tools --> directory_mapper",
            "directory_mapper -->|complete_or_escalate| leave_skill",
            "leave_skill --> general",
            "general -->|reply| finish([end])",
            "directory_mapper -->|empty reply| directory_mapper",
        ] {
            assert!(lines.contains(&edge), "missing edge: {}", edge);
        }
        assert!(!lines.iter().any(|l| l.starts_with("general_tools")));
    }
}
