use std::fmt;

use crate::models::AssistantId;

/// Every name an assistant may put in a tool-call request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolName {
    GetResolvedPath,
    GetDirectoryTree,
    SaveJsonToFile,
    SaveJsonStructureAsTxt,
    TransferToDirectoryMapper,
    CompleteOrEscalate,
}

/// What the router does with a call to a given tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Executed by the tool registry; control stays with the caller.
    Regular,
    /// Hands the conversation to a specialized assistant.
    Handoff(AssistantId),
    /// Returns the conversation to the general assistant.
    LeaveSkill,
}

impl ToolName {
    pub const ALL: [ToolName; 6] = [
        ToolName::GetResolvedPath,
        ToolName::GetDirectoryTree,
        ToolName::SaveJsonToFile,
        ToolName::SaveJsonStructureAsTxt,
        ToolName::TransferToDirectoryMapper,
        ToolName::CompleteOrEscalate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetResolvedPath => "get_resolved_path",
            ToolName::GetDirectoryTree => "get_directory_tree",
            ToolName::SaveJsonToFile => "save_json_to_file",
            ToolName::SaveJsonStructureAsTxt => "save_json_structure_as_txt",
            ToolName::TransferToDirectoryMapper => "transfer_to_directory_mapper",
            ToolName::CompleteOrEscalate => "complete_or_escalate",
        }
    }

    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "get_resolved_path" => Some(ToolName::GetResolvedPath),
            "get_directory_tree" => Some(ToolName::GetDirectoryTree),
            "save_json_to_file" => Some(ToolName::SaveJsonToFile),
            "save_json_structure_as_txt" => Some(ToolName::SaveJsonStructureAsTxt),
            "transfer_to_directory_mapper" => Some(ToolName::TransferToDirectoryMapper),
            "complete_or_escalate" => Some(ToolName::CompleteOrEscalate),
            _ => None,
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolName::TransferToDirectoryMapper => ToolKind::Handoff(AssistantId::DirectoryMapper),
            ToolName::CompleteOrEscalate => ToolKind::LeaveSkill,
            ToolName::GetResolvedPath
            | ToolName::GetDirectoryTree
            | ToolName::SaveJsonToFile
            | ToolName::SaveJsonStructureAsTxt => ToolKind::Regular,
        }
    }

    pub fn is_control(&self) -> bool {
        !matches!(self.kind(), ToolKind::Regular)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_inverse_of_as_str() {
        for tool in ToolName::ALL {
            assert_eq!(ToolName::resolve(tool.as_str()), Some(tool));
        }
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(ToolName::resolve("rm_rf"), None);
        assert_eq!(ToolName::resolve("Get_Directory_Tree"), None);
        assert_eq!(ToolName::resolve(""), None);
    }

    #[test]
    fn control_tools() {
        assert_eq!(
            ToolName::TransferToDirectoryMapper.kind(),
            ToolKind::Handoff(AssistantId::DirectoryMapper)
        );
        assert_eq!(ToolName::CompleteOrEscalate.kind(), ToolKind::LeaveSkill);
        assert!(!ToolName::GetDirectoryTree.is_control());
    }
}
