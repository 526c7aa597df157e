//! Tool descriptors as seen by the policy layer.
//!
//! Tool bodies live elsewhere; the policy only needs a name.

use serde::{Deserialize, Serialize};

/// Anything with a tool name.
pub trait NamedTool {
    fn tool_name(&self) -> &str;
}

/// Name and description of a tool exposed to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Machine-readable tool name (e.g. `read`, `exec`).
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl NamedTool for ToolDescriptor {
    fn tool_name(&self) -> &str {
        &self.name
    }
}

impl NamedTool for String {
    fn tool_name(&self) -> &str {
        self
    }
}

impl NamedTool for &str {
    fn tool_name(&self) -> &str {
        self
    }
}
