//! Skill system for skillgate.
//!
//! This crate provides:
//!
//! - **Scanner**: discovers `SKILL.md` and loose `*.md` skill files under
//!   one directory.
//!
//! - **Merger**: combines ranked directories, later sources overriding
//!   earlier ones by skill name.
//!
//! - **Enricher**: reads each skill's full header and derives its
//!   [`InvocationPolicy`].
//!
//! - **Commands**: derives collision-free slash command names and resolves
//!   `/...` input against them.
//!
//! - **Prompt**: renders the `<available_skills>` block for the model.
//!
//! - **Manager**: runs the whole pipeline once and caches the result.
//!
//! # Example
//!
//! ```rust,no_run
//! use skillgate_skills::{SkillManager, SkillsConfig};
//!
//! # async fn run() {
//! let manager = SkillManager::from_config(&SkillsConfig::default());
//! let snapshot = manager.load().await;
//!
//! let prompt_ext = snapshot.prompt();
//! if let Some(m) = snapshot.resolve("/skill deploy staging") {
//!     println!("run {} with {:?}", m.command.skill_name, m.args);
//! }
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod enrich;
pub mod error;
pub mod frontmatter;
pub mod manager;
pub mod matcher;
pub mod merge;
pub mod prompt;
pub mod scanner;
pub mod types;

pub use commands::{build_command_specs, sanitize_command_name};
pub use config::SkillsConfig;
pub use enrich::enrich_skills;
pub use error::{Result, SkillError};
pub use frontmatter::{Frontmatter, parse_bool, parse_frontmatter};
pub use manager::{SkillManager, SkillSnapshot};
pub use matcher::{match_direct, match_dispatch, resolve_command};
pub use merge::{SkillDir, load_skill_sources, merge_skill_dirs, merge_skills};
pub use prompt::{PromptSkill, escape_xml, format_skills_for_prompt};
pub use scanner::scan_skills_dir;
pub use types::{CommandMatch, CommandSpec, InvocationPolicy, Skill, SkillEntry, SkillSource};
