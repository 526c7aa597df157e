//! Allow/deny tool access policies.
//!
//! # Evaluation
//!
//! 1. No policy: every tool is allowed.
//! 2. A name matching any deny pattern is denied, whatever the allow list
//!    says.
//! 3. An empty allow list allows everything not denied.
//! 4. Otherwise the name must match at least one allow pattern.
//!
//! Compile a [`ToolPolicy`] once with [`ToolPolicy::compile`] and query the
//! resulting [`CompiledToolPolicy`] as often as needed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::groups::expand_tool_groups;
use crate::pattern::{CompiledPattern, compile_patterns, matches_any};
use crate::tool::NamedTool;

/// Declarative allow/deny lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}

/// The outcome of evaluating a tool name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolDecision {
    /// No pattern restricts the tool.
    Allow,
    /// A deny pattern matched.
    Denied,
    /// An allow list exists and nothing in it matched.
    NotAllowed,
}

impl ToolDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Denied => "denied",
            Self::NotAllowed => "not_allowed",
        }
    }
}

impl fmt::Display for ToolDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tools: Option<ToolPolicy>,
}

impl ToolPolicy {
    pub fn new(allow: Option<Vec<String>>, deny: Option<Vec<String>>) -> Self {
        Self { allow, deny }
    }

    /// Parse the `[tools]` section of a TOML document, if present.
    pub fn from_toml_str(content: &str) -> Result<Option<Self>> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.tools)
    }

    /// Compile both lists, expanding tool groups.
    pub fn compile(&self) -> CompiledToolPolicy {
        let compile = |list: &Option<Vec<String>>| {
            list.as_deref()
                .map(|entries| compile_patterns(&expand_tool_groups(entries)))
                .unwrap_or_default()
        };

        CompiledToolPolicy {
            allow: compile(&self.allow),
            deny: compile(&self.deny),
        }
    }
}

/// A policy ready for repeated evaluation.
#[derive(Debug, Clone, Default)]
pub struct CompiledToolPolicy {
    allow: Vec<CompiledPattern>,
    deny: Vec<CompiledPattern>,
}

impl CompiledToolPolicy {
    /// Evaluate `name`.  Deny always wins over allow.
    pub fn decide(&self, name: &str) -> ToolDecision {
        if matches_any(&self.deny, name) {
            return ToolDecision::Denied;
        }
        if self.allow.is_empty() || matches_any(&self.allow, name) {
            return ToolDecision::Allow;
        }
        ToolDecision::NotAllowed
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.decide(name).is_allowed()
    }

    /// Keep the allowed tools, preserving order.
    pub fn filter<T: NamedTool>(&self, tools: Vec<T>) -> Vec<T> {
        tools
            .into_iter()
            .filter(|tool| {
                let decision = self.decide(tool.tool_name());
                if !decision.is_allowed() {
                    tracing::debug!(tool = %tool.tool_name(), %decision, "tool filtered out");
                }
                decision.is_allowed()
            })
            .collect()
    }
}

/// Whether `name` may be used under `policy`.  No policy means unrestricted.
pub fn is_tool_allowed(name: &str, policy: Option<&ToolPolicy>) -> bool {
    policy.is_none_or(|p| p.compile().is_allowed(name))
}

/// Keep the tools `policy` allows, preserving order.
pub fn filter_tools_by_policy<T: NamedTool>(tools: Vec<T>, policy: Option<&ToolPolicy>) -> Vec<T> {
    match policy {
        Some(policy) => policy.compile().filter(tools),
        None => tools,
    }
}

/// Combine two policies.
///
/// Lists are concatenated (`a` first), trimmed, blank entries dropped and
/// duplicates removed.  Only two absent policies merge to no restriction.
pub fn merge_policies(a: Option<&ToolPolicy>, b: Option<&ToolPolicy>) -> Option<ToolPolicy> {
    if a.is_none() && b.is_none() {
        return None;
    }

    Some(ToolPolicy {
        allow: merge_lists([a, b].into_iter().flatten().filter_map(|p| p.allow.as_ref())),
        deny: merge_lists([a, b].into_iter().flatten().filter_map(|p| p.deny.as_ref())),
    })
}

fn merge_lists<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> Option<Vec<String>> {
    let mut merged: Vec<String> = Vec::new();
    for entry in lists.flatten() {
        let entry = entry.trim();
        if !entry.is_empty() && !merged.iter().any(|m| m == entry) {
            merged.push(entry.to_owned());
        }
    }
    (!merged.is_empty()).then_some(merged)
}
