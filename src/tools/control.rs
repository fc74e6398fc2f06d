//! Schemas of the control-transfer tools. These are never executed by the
//! registry; the router acts on them directly.

use serde_json::{json, Value};

use super::name::ToolName;

pub fn control_tool_schema(name: ToolName) -> Option<Value> {
    let (description, parameters) = match name {
        ToolName::TransferToDirectoryMapper => (
            "Transfer the conversation to the directory mapping assistant, which can build \
             the tree of a directory and save it as a JSON file or as a formatted text file.",
            json!({
                "type": "object",
                "properties": {
                    "request": {
                        "type": "string",
                        "description": "What the user wants mapped and where the result should be saved"
                    }
                },
                "required": ["request"]
            }),
        ),
        ToolName::CompleteOrEscalate => (
            "Mark the current task as completed and/or escalate control of the dialog back to \
             the primary assistant, who can reroute the dialog based on the user's needs.",
            json!({
                "type": "object",
                "properties": {
                    "cancel": {
                        "type": "boolean",
                        "description": "True when the task was abandoned rather than completed"
                    },
                    "reason": {
                        "type": "string",
                        "description": "Why control is being returned"
                    }
                },
                "required": ["reason"]
            }),
        ),
        _ => return None,
    };

    Some(json!({
        "type": "function",
        "function": {
            "name": name.as_str(),
            "description": description,
            "parameters": parameters,
        }
    }))
}
