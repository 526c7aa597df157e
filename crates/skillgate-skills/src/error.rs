//! Error types for the skills subsystem.
//!
//! Discovery itself never fails; these errors only surface from loading
//! configuration.

use std::path::PathBuf;

/// Skill-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("invalid skills configuration in `{path}`: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SkillError>;
