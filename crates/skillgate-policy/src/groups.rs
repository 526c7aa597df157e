//! Tool name normalization, aliases and named tool groups.
//!
//! Policies may name a whole family of tools with `group:<name>`.  Groups are
//! expanded before pattern compilation; unknown groups are kept as ordinary
//! patterns and therefore only match a tool literally named that way.

/// Legacy or alternate spellings mapped to the canonical tool name.
const TOOL_ALIASES: &[(&str, &str)] = &[("bash", "exec"), ("apply-patch", "apply_patch")];

/// Named tool groups.
pub const TOOL_GROUPS: &[(&str, &[&str])] = &[
    ("group:fs", &["read", "write", "edit", "apply_patch"]),
    ("group:runtime", &["exec", "process"]),
    ("group:web", &["web_search", "web_fetch"]),
    ("group:memory", &["memory_search", "memory_get"]),
    (
        "group:sessions",
        &[
            "sessions_list",
            "sessions_history",
            "sessions_send",
            "sessions_spawn",
            "session_status",
        ],
    ),
    ("group:ui", &["browser", "canvas"]),
    ("group:automation", &["cron", "gateway"]),
    ("group:messaging", &["message"]),
];

/// Trim, lower-case and resolve aliases.
pub fn normalize_tool_name(name: &str) -> String {
    let normalized = name.trim().to_lowercase();
    TOOL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| (*canonical).to_owned())
        .unwrap_or(normalized)
}

/// Members of a named group, if `name` is one.
pub fn tool_group(name: &str) -> Option<&'static [&'static str]> {
    let normalized = name.trim().to_lowercase();
    TOOL_GROUPS
        .iter()
        .find(|(group, _)| *group == normalized)
        .map(|(_, members)| *members)
}

/// Replace group references with their members and normalize the rest.
///
/// Blank entries are dropped and duplicates removed, keeping first
/// occurrences.
pub fn expand_tool_groups<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::new();
    let mut push = |name: String| {
        if !name.is_empty() && !expanded.contains(&name) {
            expanded.push(name);
        }
    };

    for entry in entries {
        let entry = entry.as_ref();
        match tool_group(entry) {
            Some(members) => members.iter().for_each(|m| push((*m).to_owned())),
            None => push(normalize_tool_name(entry)),
        }
    }

    expanded
}
