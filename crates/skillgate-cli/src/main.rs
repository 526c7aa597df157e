//! CLI entry point for skillgate.
//!
//! This binary provides the `skillgate` command with subcommands for
//! inspecting discovered skills, resolving slash commands and evaluating
//! tool access policies.

mod cli;
mod helpers;

use anyhow::{Context, Result};
use clap::Parser;
use skillgate_policy::{ToolDecision, ToolDescriptor, ToolPolicy, filter_tools_by_policy};
use skillgate_skills::SkillManager;

use crate::cli::{Cli, Commands, PolicyArgs, SkillAction, ToolAction};
use crate::helpers::{AppConfig, effective_policy, init_tracing, load_config};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine.
    let _ = dotenvy::dotenv();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Skills { action } => cmd_skills(&config, action).await,
        Commands::Resolve { input, json } => cmd_resolve(&config, &input, json).await,
        Commands::Tools { action } => cmd_tools(&config, action),
    }
}

// ---------------------------------------------------------------------------
// Subcommand: skills
// ---------------------------------------------------------------------------

async fn cmd_skills(config: &AppConfig, action: SkillAction) -> Result<()> {
    let manager = SkillManager::from_config(&config.skills);
    let snapshot = manager.load().await;

    match action {
        SkillAction::List { json } => {
            if json {
                let out = serde_json::to_string_pretty(&snapshot.entries)
                    .context("failed to serialize skills")?;
                println!("{out}");
                return Ok(());
            }

            if snapshot.entries.is_empty() {
                println!("  No skills found.");
                for dir in manager.dirs() {
                    println!("    searched: {} ({})", dir.path.display(), dir.source);
                }
                return Ok(());
            }

            println!();
            for entry in &snapshot.entries {
                let mut flags = Vec::new();
                if !entry.invocation.user_invocable {
                    flags.push("no-command");
                }
                if entry.invocation.disable_model_invocation {
                    flags.push("no-model");
                }
                println!(
                    "  {:<28} [{}] {}",
                    entry.skill.name, entry.skill.source, entry.skill.description
                );
                if !flags.is_empty() {
                    println!("  {:<28} {}", "", flags.join(", "));
                }
            }
            println!();
            println!("  {} skill(s)", snapshot.entries.len());
        }
        SkillAction::Commands { json } => {
            if json {
                let out = serde_json::to_string_pretty(&snapshot.commands)
                    .context("failed to serialize commands")?;
                println!("{out}");
                return Ok(());
            }

            for command in &snapshot.commands {
                println!("  /{:<32} {}", command.name, command.description);
            }
        }
        SkillAction::Prompt => {
            let prompt = snapshot.prompt();
            if prompt.is_empty() {
                eprintln!("  No skills are visible to the model.");
            } else {
                println!("{}", prompt.trim_start_matches('\n'));
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: resolve
// ---------------------------------------------------------------------------

async fn cmd_resolve(config: &AppConfig, input: &str, json: bool) -> Result<()> {
    let manager = SkillManager::from_config(&config.skills);
    let snapshot = manager.load().await;
    let resolved = snapshot.resolve(input);

    if json {
        let out = serde_json::to_string_pretty(&resolved).context("failed to serialize match")?;
        println!("{out}");
        return Ok(());
    }

    match resolved {
        Some(m) => {
            println!("  command: /{}", m.command.name);
            println!("  skill:   {}", m.command.skill_name);
            if let Some(args) = m.args {
                println!("  args:    {args}");
            }
            if let Some(entry) = snapshot.get(&m.command.skill_name) {
                println!("  file:    {}", entry.skill.file_path.display());
            }
        }
        None => println!("  no matching skill command"),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: tools
// ---------------------------------------------------------------------------

fn cmd_tools(config: &AppConfig, action: ToolAction) -> Result<()> {
    let resolve_policy = |args: &PolicyArgs| -> Option<ToolPolicy> {
        effective_policy(config.tools.as_ref(), args)
    };

    match action {
        ToolAction::Check { name, policy } => {
            let decision = match resolve_policy(&policy) {
                Some(policy) => policy.compile().decide(&name),
                None => ToolDecision::Allow,
            };
            println!("  {name}: {decision}");
        }
        ToolAction::Filter { names, policy } => {
            let tools: Vec<ToolDescriptor> = names
                .into_iter()
                .map(|name| ToolDescriptor::new(name, ""))
                .collect();
            let kept = filter_tools_by_policy(tools, resolve_policy(&policy).as_ref());
            for tool in kept {
                println!("{}", tool.name);
            }
        }
    }

    Ok(())
}
