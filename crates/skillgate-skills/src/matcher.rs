//! Command matcher: resolves raw `/...` input against synthesized commands.
//!
//! Two grammars are supported:
//!
//! | Grammar | Shape | Lookup |
//! |---------|-------|--------|
//! | Dispatch | `/skill <target> [args]` | command name, skill name, then normalized forms of both |
//! | Direct | `/<command> [args]` | exact (case-insensitive) command name only |
//!
//! [`resolve_command`] picks one grammar from the input's first token; a miss
//! in the chosen grammar is final.

use crate::types::{CommandMatch, CommandSpec};

/// Prefix marking a command.
pub const COMMAND_PREFIX: char = '/';

/// First token that selects the dispatch grammar.
pub const DISPATCH_KEYWORD: &str = "skill";

/// Split `/token rest` into its token and trimmed remainder.
///
/// Returns `None` when the input is not a command.
pub fn parse_slash_command(input: &str) -> Option<(&str, Option<&str>)> {
    let body = input.trim().strip_prefix(COMMAND_PREFIX)?;
    let (token, rest) = split_first_token(body);
    if token.is_empty() {
        return None;
    }
    Some((token, rest))
}

/// Split on the first whitespace run.  The remainder is `None` when blank.
fn split_first_token(text: &str) -> (&str, Option<&str>) {
    match text.find(char::is_whitespace) {
        Some(pos) => {
            let rest = text[pos..].trim();
            (&text[..pos], (!rest.is_empty()).then_some(rest))
        }
        None => (text, None),
    }
}

/// Lookup form: trimmed, lower-cased, whitespace and underscore runs
/// replaced by a single `-`.
pub fn normalize_lookup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;

    for c in value.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '_' {
            if !in_run {
                out.push('-');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

/// Find the command addressed by `target`.
///
/// Candidates are visited in order and the first one passing any of these
/// tests wins: command name equal (case-insensitive), skill name equal
/// (case-insensitive), normalized command name equal, normalized skill name
/// equal.  When nothing matches, the first candidate whose normalized name
/// or skill name begins with the whole normalized target followed by `-` is
/// accepted.
pub fn find_command<'a>(commands: &'a [CommandSpec], target: &str) -> Option<&'a CommandSpec> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    let normalized = normalize_lookup(trimmed);

    let exact = commands.iter().find(|cmd| {
        cmd.name.to_lowercase() == lowered
            || cmd.skill_name.to_lowercase() == lowered
            || normalize_lookup(&cmd.name) == normalized
            || normalize_lookup(&cmd.skill_name) == normalized
    });
    if exact.is_some() {
        return exact;
    }

    let prefix = format!("{normalized}-");
    commands.iter().find(|cmd| {
        normalize_lookup(&cmd.name).starts_with(&prefix)
            || normalize_lookup(&cmd.skill_name).starts_with(&prefix)
    })
}

/// Dispatch grammar: `/skill <target> [args]`.
pub fn match_dispatch(input: &str, commands: &[CommandSpec]) -> Option<CommandMatch> {
    let (token, rest) = parse_slash_command(input)?;
    if !token.eq_ignore_ascii_case(DISPATCH_KEYWORD) {
        return None;
    }

    let (target, args) = split_first_token(rest?);
    let command = find_command(commands, target)?;

    Some(CommandMatch {
        command: command.clone(),
        args: args.map(str::to_owned),
    })
}

/// Direct grammar: `/<command> [args]`, command names only.
pub fn match_direct(input: &str, commands: &[CommandSpec]) -> Option<CommandMatch> {
    let (token, rest) = parse_slash_command(input)?;
    let token = token.to_lowercase();

    let command = commands.iter().find(|cmd| cmd.name.to_lowercase() == token)?;

    Some(CommandMatch {
        command: command.clone(),
        args: rest.map(str::to_owned),
    })
}

/// Resolve `input` with the grammar its first token selects.
pub fn resolve_command(input: &str, commands: &[CommandSpec]) -> Option<CommandMatch> {
    let (token, _) = parse_slash_command(input)?;
    let result = if token.eq_ignore_ascii_case(DISPATCH_KEYWORD) {
        match_dispatch(input, commands)
    } else {
        match_direct(input, commands)
    };

    match &result {
        Some(m) => tracing::debug!(command = %m.command.name, "skill command resolved"),
        None => tracing::trace!(token = %token, "no skill command matched"),
    }
    result
}
