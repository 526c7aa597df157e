//! Command synthesizer: derives slash commands from user-invocable skills.
//!
//! Each included skill gets a name made of `[a-z0-9_]`, 1 to 32 characters
//! long and unique within one synthesis pass.  Collisions are resolved by
//! numeric suffixes in skill order, so the same input always produces the
//! same commands.

use std::collections::HashSet;

use crate::matcher::DISPATCH_KEYWORD;
use crate::types::{CommandSpec, SkillEntry};

/// Maximum length of a command name.
pub const MAX_COMMAND_NAME_LEN: usize = 32;

/// Maximum length of a command description, ellipsis included.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Name used when sanitizing leaves nothing.
pub const FALLBACK_COMMAND_NAME: &str = "skill";

/// Highest numeric suffix tried before the `_x` fallback.
const MAX_SUFFIX: usize = 999;

const ELLIPSIS: char = '…';

/// Reduce a skill name to the command alphabet.
///
/// Lower-cases, replaces every run of characters outside `[a-z0-9_]` with a
/// single `_`, trims underscores from both ends and truncates to 32
/// characters.
pub fn sanitize_command_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    let mut name = out.trim_matches('_').to_owned();
    // Only ASCII remains, so byte truncation is safe.
    name.truncate(MAX_COMMAND_NAME_LEN);

    if name.is_empty() {
        FALLBACK_COMMAND_NAME.to_owned()
    } else {
        name
    }
}

/// `base` shortened so that `suffix` still fits within the length limit.
fn with_suffix(base: &str, suffix: &str) -> String {
    let keep = MAX_COMMAND_NAME_LEN.saturating_sub(suffix.len()).max(1);
    let trimmed: String = base.chars().take(keep).collect();
    format!("{trimmed}{suffix}")
}

/// Pick a name for `base` not yet present in `used` (compared
/// case-insensitively).
///
/// Tries `base`, then `base_2` through `base_999`, then `base_x`.  Should
/// `base_x` be taken as well, `base_x2`, `base_x3`, ... follow.
pub fn resolve_unique_command_name(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(&base.to_lowercase()) {
        return base.to_owned();
    }

    for index in 2..=MAX_SUFFIX {
        let candidate = with_suffix(base, &format!("_{index}"));
        if !used.contains(&candidate.to_lowercase()) {
            return candidate;
        }
    }

    let fallback = with_suffix(base, "_x");
    if !used.contains(&fallback.to_lowercase()) {
        return fallback;
    }

    (2..)
        .map(|index| with_suffix(base, &format!("_x{index}")))
        .find(|candidate| !used.contains(&candidate.to_lowercase()))
        .unwrap_or(fallback)
}

/// Trimmed description (or the skill name when empty), capped at 100
/// characters with a trailing ellipsis.
pub fn command_description(description: &str, skill_name: &str) -> String {
    let description = description.trim();
    let text = if description.is_empty() {
        skill_name
    } else {
        description
    };

    if text.chars().count() <= MAX_DESCRIPTION_LEN {
        return text.to_owned();
    }

    let mut truncated: String = text.chars().take(MAX_DESCRIPTION_LEN - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Build the command list for every user-invocable entry, in input order.
///
/// `reserved` holds names already taken by the host (built-in commands);
/// they are never emitted.
pub fn build_command_specs(entries: &[SkillEntry], reserved: &[String]) -> Vec<CommandSpec> {
    let mut used: HashSet<String> = reserved
        .iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut specs = Vec::new();

    for entry in entries.iter().filter(|e| e.invocation.user_invocable) {
        let skill = &entry.skill;
        let base = sanitize_command_name(&skill.name);
        let name = resolve_unique_command_name(&base, &used);
        used.insert(name.to_lowercase());

        if name == DISPATCH_KEYWORD {
            tracing::warn!(
                skill = %skill.name,
                command = %name,
                "command name equals the dispatch keyword and cannot be invoked directly"
            );
        }

        specs.push(CommandSpec {
            description: command_description(&skill.description, &skill.name),
            skill_name: skill.name.clone(),
            name,
        });
    }

    tracing::debug!(count = specs.len(), "skill commands built");
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Frontmatter;
    use crate::types::{InvocationPolicy, Skill, SkillSource};
    use std::path::PathBuf;

    fn entry(name: &str, description: &str, user_invocable: bool) -> SkillEntry {
        SkillEntry {
            skill: Skill {
                name: name.into(),
                description: description.into(),
                file_path: PathBuf::from("/skills/x/SKILL.md"),
                base_dir: PathBuf::from("/skills/x"),
                source: SkillSource::Workspace,
                disable_model_invocation: false,
            },
            frontmatter: Frontmatter::new(),
            invocation: InvocationPolicy {
                user_invocable,
                disable_model_invocation: false,
            },
        }
    }

    fn is_valid(name: &str) -> bool {
        (1..=MAX_COMMAND_NAME_LEN).contains(&name.len())
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_command_name("Deploy Service"), "deploy_service");
        assert_eq!(sanitize_command_name("  git--commit!! helper "), "git_commit_helper");
        assert_eq!(sanitize_command_name("__snake_case__"), "snake_case");
        assert_eq!(sanitize_command_name("Ünïcode ok"), "n_code_ok");
    }

    #[test]
    fn sanitize_degenerate_inputs() {
        for raw in ["", "   ", "!!!", "___", "日本語", "-_-"] {
            assert_eq!(sanitize_command_name(raw), FALLBACK_COMMAND_NAME, "{raw:?}");
        }
    }

    #[test]
    fn sanitize_always_valid() {
        let long = "a".repeat(100);
        let inputs = [
            "x",
            long.as_str(),
            "Mixed CASE with spaces and 123",
            "trailing separator at the thirty-second char!!",
            "☃ snow ☃",
        ];
        for raw in inputs {
            let name = sanitize_command_name(raw);
            assert!(is_valid(&name), "{raw:?} -> {name:?}");
        }
        assert_eq!(sanitize_command_name(&long).len(), MAX_COMMAND_NAME_LEN);
    }

    #[test]
    fn unique_name_suffixes() {
        let mut used = HashSet::new();
        assert_eq!(resolve_unique_command_name("deploy", &used), "deploy");
        used.insert("deploy".to_owned());
        assert_eq!(resolve_unique_command_name("deploy", &used), "deploy_2");
        used.insert("deploy_2".to_owned());
        assert_eq!(resolve_unique_command_name("deploy", &used), "deploy_3");
    }

    #[test]
    fn unique_name_is_case_insensitive() {
        let used: HashSet<String> = ["review".to_owned()].into();
        assert_eq!(resolve_unique_command_name("Review", &used), "Review_2");
    }

    #[test]
    fn suffix_truncates_long_base() {
        let base = "b".repeat(MAX_COMMAND_NAME_LEN);
        let used: HashSet<String> = [base.clone()].into();
        let name = resolve_unique_command_name(&base, &used);
        assert_eq!(name.len(), MAX_COMMAND_NAME_LEN);
        assert!(name.ends_with("_2"));
    }

    #[test]
    fn description_truncation() {
        assert_eq!(command_description("  short  ", "n"), "short");
        assert_eq!(command_description("   ", "fallback-name"), "fallback-name");

        let long = "é".repeat(150);
        let desc = command_description(&long, "n");
        assert_eq!(desc.chars().count(), MAX_DESCRIPTION_LEN);
        assert!(desc.ends_with('…'));

        let exact = "z".repeat(MAX_DESCRIPTION_LEN);
        assert_eq!(command_description(&exact, "n"), exact);
    }

    #[test]
    fn skips_non_invocable_entries() {
        let specs = build_command_specs(
            &[entry("a", "A", true), entry("b", "B", false), entry("c", "C", true)],
            &[],
        );
        let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn reserved_names_are_avoided() {
        let specs = build_command_specs(
            &[entry("Help", "custom help", true)],
            &["help".to_owned(), "status".to_owned()],
        );
        assert_eq!(specs[0].name, "help_2");
        assert_eq!(specs[0].skill_name, "Help");
    }

    #[test]
    fn synthesis_is_deterministic() {
        let entries = vec![
            entry("Deploy Service", "managed", true),
            entry("deploy_service", "workspace", true),
            entry("deploy-service", "extra", true),
        ];
        let first = build_command_specs(&entries, &[]);
        let second = build_command_specs(&entries, &[]);
        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["deploy_service", "deploy_service_2", "deploy_service_3"]);
    }

    #[test]
    fn thousand_collisions_fall_back_without_duplicates() {
        let entries: Vec<_> = (0..1005).map(|_| entry("same", "dup", true)).collect();
        let specs = build_command_specs(&entries, &[]);
        assert_eq!(specs.len(), 1005);

        let unique: HashSet<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(unique.len(), specs.len());

        assert_eq!(specs[0].name, "same");
        assert_eq!(specs[998].name, "same_999");
        assert_eq!(specs[999].name, "same_x");
        assert_eq!(specs[1000].name, "same_x2");
        assert!(specs.iter().all(|s| is_valid(&s.name)));
    }
}
