//! Skill source configuration.
//!
//! Reads the `[skills]` section of `config/default.toml`:
//!
//! ```toml
//! [skills]
//! workspace_dir = "skills"
//! managed_dir = "/home/me/.skillgate/skills"
//! bundled_dir = "bundled-skills"
//! extra_dirs = ["/opt/team-skills"]
//! reserved_commands = ["help", "status"]
//! ```
//!
//! Directories are ranked lowest priority first: extra, bundled, managed,
//! workspace.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SkillError};
use crate::merge::SkillDir;
use crate::types::SkillSource;

/// Overrides `workspace_dir`.
pub const ENV_WORKSPACE_DIR: &str = "SKILLGATE_WORKSPACE_SKILLS_DIR";
/// Overrides `managed_dir`.
pub const ENV_MANAGED_DIR: &str = "SKILLGATE_MANAGED_SKILLS_DIR";
/// Overrides `bundled_dir`.
pub const ENV_BUNDLED_DIR: &str = "SKILLGATE_BUNDLED_SKILLS_DIR";

/// Where skills are discovered and which command names are taken.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Skills checked into the current workspace (highest priority).
    pub workspace_dir: Option<PathBuf>,

    /// Skills installed for the user.
    pub managed_dir: Option<PathBuf>,

    /// Skills shipped with the runtime.
    pub bundled_dir: Option<PathBuf>,

    /// Additional directories (lowest priority, in listed order).
    pub extra_dirs: Vec<PathBuf>,

    /// Built-in command names skills must not take.
    pub reserved_commands: Vec<String>,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            workspace_dir: Some(PathBuf::from("skills")),
            managed_dir: None,
            bundled_dir: None,
            extra_dirs: Vec::new(),
            reserved_commands: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    skills: Option<SkillsConfig>,
}

impl SkillsConfig {
    /// Parse the `[skills]` section of a TOML document.
    ///
    /// A document without the section yields the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.skills.unwrap_or_default())
    }

    /// Load from a file.  A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| SkillError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply `SKILLGATE_*_SKILLS_DIR` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        if let Some(dir) = read(ENV_WORKSPACE_DIR) {
            self.workspace_dir = Some(dir);
        }
        if let Some(dir) = read(ENV_MANAGED_DIR) {
            self.managed_dir = Some(dir);
        }
        if let Some(dir) = read(ENV_BUNDLED_DIR) {
            self.bundled_dir = Some(dir);
        }
        self
    }

    /// Ranked skill directories, lowest priority first.
    pub fn skill_dirs(&self) -> Vec<SkillDir> {
        let mut dirs: Vec<SkillDir> = self
            .extra_dirs
            .iter()
            .map(|p| SkillDir::new(p.clone(), SkillSource::Extra))
            .collect();

        let tiers = [
            (&self.bundled_dir, SkillSource::Bundled),
            (&self.managed_dir, SkillSource::Managed),
            (&self.workspace_dir, SkillSource::Workspace),
        ];
        for (dir, source) in tiers {
            if let Some(dir) = dir {
                dirs.push(SkillDir::new(dir.clone(), source));
            }
        }

        dirs
    }
}
