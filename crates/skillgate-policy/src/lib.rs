//! Tool access policies for skillgate.
//!
//! - **[`pattern`]** -- compiles one allow/deny pattern into a closed
//!   [`CompiledPattern`]: match-all, exact name, or anchored wildcard
//!   [`regex`].
//! - **[`groups`]** -- tool name aliases and `group:<name>` expansion.
//! - **[`policy`]** -- [`ToolPolicy`] evaluation with deny-over-allow
//!   precedence, tool filtering and policy merging.
//! - **[`tool`]** -- the [`NamedTool`] seam tool collections implement.
//!
//! Policies are supplied per call; nothing here caches them.
//!
//! # Example
//!
//! ```rust
//! use skillgate_policy::{ToolPolicy, is_tool_allowed};
//!
//! let policy = ToolPolicy::new(Some(vec!["exec*".into()]), Some(vec!["exec_python".into()]));
//! assert!(is_tool_allowed("exec_shell", Some(&policy)));
//! assert!(!is_tool_allowed("exec_python", Some(&policy)));
//! ```

pub mod error;
pub mod groups;
pub mod pattern;
pub mod policy;
pub mod tool;

pub use error::{PolicyError, Result};
pub use groups::{expand_tool_groups, normalize_tool_name};
pub use pattern::{CompiledPattern, compile_pattern, compile_patterns};
pub use policy::{
    CompiledToolPolicy, ToolDecision, ToolPolicy, filter_tools_by_policy, is_tool_allowed,
    merge_policies,
};
pub use tool::{NamedTool, ToolDescriptor};
