//! Shared helper functions used across CLI subcommands.
//!
//! Includes tracing initialization, configuration loading and command-line
//! policy assembly.

use std::path::Path;

use anyhow::{Context, Result};
use skillgate_policy::{ToolPolicy, merge_policies};
use skillgate_skills::SkillsConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::PolicyArgs;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything read from the configuration file.
pub struct AppConfig {
    pub skills: SkillsConfig,
    pub tools: Option<ToolPolicy>,
}

/// Load `[skills]` and `[tools]` from `path`, then apply environment
/// overrides.  A missing file yields defaults and no tool policy.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let (skills, tools) = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let skills = SkillsConfig::from_toml_str(&content)
            .with_context(|| format!("invalid [skills] section in {}", path.display()))?;
        let tools = ToolPolicy::from_toml_str(&content)
            .with_context(|| format!("invalid [tools] section in {}", path.display()))?;
        (skills, tools)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        (SkillsConfig::default(), None)
    };
    let skills = skills.with_env_overrides();

    tracing::debug!(
        path = %path.display(),
        dirs = skills.skill_dirs().len(),
        tool_policy = tools.is_some(),
        "configuration loaded"
    );

    Ok(AppConfig { skills, tools })
}

/// Combine the configured policy with patterns given on the command line.
///
/// `--allow` replaces the configured allow list.  `--deny` patterns are
/// added to the configured deny list.
pub fn effective_policy(configured: Option<&ToolPolicy>, args: &PolicyArgs) -> Option<ToolPolicy> {
    let from_args = (!args.deny.is_empty()).then(|| ToolPolicy::new(None, Some(args.deny.clone())));
    let mut policy = merge_policies(configured, from_args.as_ref());

    if !args.allow.is_empty() {
        policy.get_or_insert_with(ToolPolicy::default).allow = Some(args.allow.clone());
    }
    policy
}
