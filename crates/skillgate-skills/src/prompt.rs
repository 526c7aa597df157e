//! Prompt formatter: renders the skills the model may use on its own.
//!
//! The output is parsed downstream, so the wrapper text and tag layout must
//! stay exactly as written here.

use std::path::Path;

use crate::types::{Skill, SkillEntry};

const PREAMBLE: [&str; 3] = [
    "\n\nThe following skills provide specialized instructions for specific tasks.",
    "Use the read tool to load a skill's file when the task matches its description.",
    "When a skill file references a relative path, resolve it against the skill directory (parent of SKILL.md / dirname of the path) and use that absolute path in tool commands.",
];

/// Anything that can be listed in the skills prompt.
pub trait PromptSkill {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn location(&self) -> &Path;
    /// Hidden from the prompt when `true`.
    fn model_invocation_disabled(&self) -> bool;
}

impl PromptSkill for Skill {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn location(&self) -> &Path {
        &self.file_path
    }

    fn model_invocation_disabled(&self) -> bool {
        self.disable_model_invocation
    }
}

impl PromptSkill for SkillEntry {
    fn name(&self) -> &str {
        &self.skill.name
    }

    fn description(&self) -> &str {
        &self.skill.description
    }

    fn location(&self) -> &Path {
        &self.skill.file_path
    }

    fn model_invocation_disabled(&self) -> bool {
        self.invocation.disable_model_invocation
    }
}

/// Escape the five XML-reserved characters.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the `<available_skills>` block.
///
/// Returns an empty string when no skill is visible to the model.
pub fn format_skills_for_prompt<S: PromptSkill>(skills: &[S]) -> String {
    let visible: Vec<&S> = skills
        .iter()
        .filter(|s| !s.model_invocation_disabled())
        .collect();

    if visible.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = PREAMBLE.iter().map(|l| (*l).to_owned()).collect();
    lines.push(String::new());
    lines.push("<available_skills>".to_owned());

    for skill in visible {
        lines.push("  <skill>".to_owned());
        lines.push(format!("    <name>{}</name>", escape_xml(skill.name())));
        lines.push(format!(
            "    <description>{}</description>",
            escape_xml(skill.description())
        ));
        lines.push(format!(
            "    <location>{}</location>",
            escape_xml(&skill.location().to_string_lossy())
        ));
        lines.push("  </skill>".to_owned());
    }

    lines.push("</available_skills>".to_owned());
    lines.join("\n")
}
