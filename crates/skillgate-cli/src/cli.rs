//! CLI argument definitions for skillgate.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// skillgate -- skill discovery and tool access policies for agents.
#[derive(Parser)]
#[command(
    name = "skillgate",
    version,
    about = "skillgate -- skill discovery and tool access policies",
    long_about = "Discovers skill definitions from ranked directories, derives slash commands, \
                  renders the model-facing skills prompt and evaluates tool access policies."
)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect discovered skills.
    Skills {
        #[command(subcommand)]
        action: SkillAction,
    },

    /// Resolve a slash command such as `/skill deploy staging`.
    Resolve {
        /// The raw input line.
        input: String,

        /// Print the match as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Evaluate tool access policies.
    Tools {
        #[command(subcommand)]
        action: ToolAction,
    },
}

/// Actions for inspecting skills.
#[derive(Subcommand)]
pub enum SkillAction {
    /// List merged skills with their source and invocation flags.
    List {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List synthesized slash commands.
    Commands {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the model-facing skills prompt block.
    Prompt,
}

/// Patterns given on the command line.  `--allow` replaces the configured
/// allow list; `--deny` extends the configured deny list.
#[derive(Args)]
pub struct PolicyArgs {
    /// Allow pattern (repeatable).
    #[arg(long = "allow")]
    pub allow: Vec<String>,

    /// Deny pattern (repeatable).
    #[arg(long = "deny")]
    pub deny: Vec<String>,
}

/// Actions for evaluating tool policies.
#[derive(Subcommand)]
pub enum ToolAction {
    /// Decide whether one tool is allowed.
    Check {
        /// Tool name.
        name: String,

        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Print the allowed subset of the given tool names, in order.
    Filter {
        /// Tool names.
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },
}
