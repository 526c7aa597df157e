//! Skill type definitions.
//!
//! A skill is a named capability described by a markdown file with a
//! `---`-delimited header.  Discovery produces [`Skill`] values; the enricher
//! turns them into [`SkillEntry`] values carrying the full header and the
//! derived [`InvocationPolicy`]; the synthesizer derives [`CommandSpec`]s.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frontmatter::{Frontmatter, parse_bool};

/// Where a skill was discovered.  Doubles as its priority label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    /// Additional directories configured by the operator.
    Extra,
    /// Skills shipped with the runtime.
    Bundled,
    /// Skills installed for the current user.
    Managed,
    /// Skills checked into the current workspace.
    Workspace,
    /// Any other caller-defined tag.
    Custom(String),
}

impl SkillSource {
    /// The lower-case label for this source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Extra => "extra",
            Self::Bundled => "bundled",
            Self::Managed => "managed",
            Self::Workspace => "workspace",
            Self::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for SkillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    /// Unique key within one merged set.
    pub name: String,

    /// Short description, never empty.
    pub description: String,

    /// Absolute path of the definition file.
    pub file_path: PathBuf,

    /// Absolute directory containing the definition file.
    pub base_dir: PathBuf,

    /// Where the skill was discovered.
    pub source: SkillSource,

    /// Hidden from the model-facing prompt when set.
    pub disable_model_invocation: bool,
}

/// The two independent reachability channels of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvocationPolicy {
    /// Reachable as a slash command.
    pub user_invocable: bool,

    /// Hidden from autonomous model use.
    pub disable_model_invocation: bool,
}

impl Default for InvocationPolicy {
    fn default() -> Self {
        Self {
            user_invocable: true,
            disable_model_invocation: false,
        }
    }
}

impl InvocationPolicy {
    /// Derive the policy from `user-invocable` and
    /// `disable-model-invocation`.
    pub fn from_frontmatter(frontmatter: &Frontmatter) -> Self {
        Self {
            user_invocable: parse_bool(
                frontmatter.get("user-invocable").map(String::as_str),
                true,
            ),
            disable_model_invocation: parse_bool(
                frontmatter
                    .get("disable-model-invocation")
                    .map(String::as_str),
                false,
            ),
        }
    }
}

/// A merged skill together with its full header and invocation policy.
#[derive(Debug, Clone, Serialize)]
pub struct SkillEntry {
    pub skill: Skill,
    pub frontmatter: Frontmatter,
    pub invocation: InvocationPolicy,
}

/// A slash command derived from a user-invocable skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Sanitized, unique command name (without the leading `/`).
    pub name: String,

    /// Name of the skill this command runs.
    pub skill_name: String,

    /// Display description, at most 100 characters.
    pub description: String,
}

/// A successful command resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMatch {
    pub command: CommandSpec,

    /// Text following the command, if any.
    pub args: Option<String>,
}
