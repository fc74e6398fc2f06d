pub mod builtins;
pub mod control;
mod name;
pub mod paths;
mod registry;
pub mod tree;

pub use name::{ToolKind, ToolName};
pub use registry::{LocalTool, ToolHandler, ToolOutcome, ToolRegistry, ToolSettings};
pub use tree::{build_tree, render_stylized, DirectoryNode, IgnoreRules};
