//! Tool name pattern compilation.
//!
//! A pattern compiles to one of three forms:
//!
//! | Input | Form | Matching |
//! |-------|------|----------|
//! | `*` | [`CompiledPattern::All`] | always |
//! | no `*` | [`CompiledPattern::Exact`] | string equality |
//! | contains `*` | [`CompiledPattern::Regex`] | anchored regex, `*` = any sequence |
//!
//! Patterns and names are compared after [`normalize_tool_name`], so matching
//! is case-insensitive.

use regex::Regex;

use crate::groups::normalize_tool_name;

/// The wildcard token.
pub const WILDCARD: &str = "*";

/// A compiled allow/deny pattern.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    /// Matches every name.
    All,
    /// Matches one normalized name.
    Exact(String),
    /// Matches an anchored wildcard expression.
    Regex(Regex),
}

impl CompiledPattern {
    /// Whether `name` matches.  `name` is normalized first.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(exact) => *exact == normalize_tool_name(name),
            Self::Regex(re) => re.is_match(&normalize_tool_name(name)),
        }
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All, Self::All) => true,
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for CompiledPattern {}

/// Compile one pattern.  Blank patterns compile to nothing.
///
/// Every regex-significant character is escaped before the escaped wildcard
/// is turned back into `.*`, so only `*` acts as a wildcard.
pub fn compile_pattern(pattern: &str) -> Option<CompiledPattern> {
    let normalized = normalize_tool_name(pattern);
    if normalized.is_empty() {
        return None;
    }
    if normalized == WILDCARD {
        return Some(CompiledPattern::All);
    }
    if !normalized.contains(WILDCARD) {
        return Some(CompiledPattern::Exact(normalized));
    }

    let expr = format!("^{}$", regex::escape(&normalized).replace(r"\*", ".*"));
    match Regex::new(&expr) {
        Ok(re) => Some(CompiledPattern::Regex(re)),
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "wildcard pattern did not compile");
            Some(CompiledPattern::Exact(normalized))
        }
    }
}

/// Compile a list of patterns, dropping blanks.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<CompiledPattern> {
    patterns
        .iter()
        .filter_map(|p| compile_pattern(p.as_ref()))
        .collect()
}

/// Whether any compiled pattern matches `name`.
pub fn matches_any(patterns: &[CompiledPattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches(name))
}
