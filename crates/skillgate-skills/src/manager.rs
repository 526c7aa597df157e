//! Skill manager: loads skills once and serves the cached snapshot.
//!
//! The first call to [`SkillManager::load`] scans, merges, enriches and
//! synthesizes commands.  Every later or concurrent call observes the same
//! [`SkillSnapshot`] without touching the filesystem again.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::commands::build_command_specs;
use crate::config::SkillsConfig;
use crate::enrich::enrich_skills;
use crate::matcher::resolve_command;
use crate::merge::{SkillDir, load_skill_sources};
use crate::prompt::format_skills_for_prompt;
use crate::types::{CommandMatch, CommandSpec, Skill, SkillEntry};

/// Result of one load.
#[derive(Debug, Clone)]
pub struct SkillSnapshot {
    /// Merged skills in discovery order.
    pub skills: Vec<Skill>,
    /// Enriched entries, same order as `skills`.
    pub entries: Vec<SkillEntry>,
    /// Slash commands for user-invocable entries.
    pub commands: Vec<CommandSpec>,
}

impl SkillSnapshot {
    /// Build a snapshot from merged skills.
    pub fn build(skills: Vec<Skill>, reserved_commands: &[String]) -> Self {
        let entries = enrich_skills(&skills);
        let commands = build_command_specs(&entries, reserved_commands);
        Self {
            skills,
            entries,
            commands,
        }
    }

    /// Get a skill by name.
    pub fn get(&self, name: &str) -> Option<&SkillEntry> {
        self.entries.iter().find(|e| e.skill.name == name)
    }

    /// The `<available_skills>` prompt block.
    pub fn prompt(&self) -> String {
        format_skills_for_prompt(&self.entries)
    }

    /// Resolve a slash command against this snapshot's commands.
    pub fn resolve(&self, input: &str) -> Option<CommandMatch> {
        resolve_command(input, &self.commands)
    }
}

enum LoadState {
    Unloaded,
    Loaded(Arc<SkillSnapshot>),
}

/// Owns the skill sources and the lazily loaded snapshot.
pub struct SkillManager {
    dirs: Vec<SkillDir>,
    reserved_commands: Vec<String>,
    state: Mutex<LoadState>,
}

impl SkillManager {
    /// Create a manager over ranked directories (lowest priority first).
    pub fn new(dirs: Vec<SkillDir>) -> Self {
        Self {
            dirs,
            reserved_commands: Vec::new(),
            state: Mutex::new(LoadState::Unloaded),
        }
    }

    /// Create a manager from configuration.
    pub fn from_config(config: &SkillsConfig) -> Self {
        Self::new(config.skill_dirs()).with_reserved_commands(config.reserved_commands.clone())
    }

    /// Command names skills may not take.
    pub fn with_reserved_commands(mut self, reserved: Vec<String>) -> Self {
        self.reserved_commands = reserved;
        self
    }

    /// The configured directories.
    pub fn dirs(&self) -> &[SkillDir] {
        &self.dirs
    }

    /// Load skills on first use and return the cached snapshot.
    ///
    /// The lock is held for the whole first load, so concurrent first
    /// callers wait for it instead of scanning again.
    pub async fn load(&self) -> Arc<SkillSnapshot> {
        let mut state = self.state.lock().await;
        if let LoadState::Loaded(snapshot) = &*state {
            return Arc::clone(snapshot);
        }

        let skills = load_skill_sources(&self.dirs).await;
        let snapshot = Arc::new(SkillSnapshot::build(skills, &self.reserved_commands));

        tracing::info!(
            skills = snapshot.skills.len(),
            commands = snapshot.commands.len(),
            sources = self.dirs.len(),
            "skills loaded"
        );

        *state = LoadState::Loaded(Arc::clone(&snapshot));
        snapshot
    }

    /// Whether the first load has completed.
    pub async fn is_loaded(&self) -> bool {
        matches!(*self.state.lock().await, LoadState::Loaded(_))
    }
}
