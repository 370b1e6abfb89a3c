use std::path::PathBuf;

use anyhow::{Context, Result};

use bookmarks::session::Outcome;
use bookmarks::workspace::Workspace;

use crate::{Commands, ConfigCommands};

mod delivery;
mod local;
mod tree_view;

pub(super) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => local::handle_init_command(args),
        Commands::Config { command } => handle_config_command(&workspace()?, command),
        Commands::Tree(args) => local::handle_tree_command(&workspace()?, args),
        Commands::Show(args) => local::handle_show_command(&workspace()?, args),
        Commands::Add(args) => local::handle_add_command(&workspace()?, args),
        Commands::Review(args) => local::handle_review_command(&workspace()?, args),
        Commands::Mv(args) => local::handle_mv_command(&workspace()?, args),
        Commands::Rm(args) => local::handle_rm_command(&workspace()?, args),
        Commands::Merge(args) => local::handle_merge_command(&workspace()?, args),
        Commands::Status(args) => local::handle_status_command(&workspace()?, args),
        Commands::Sync(args) => delivery::handle_sync_command(&workspace()?, args),
        Commands::Ack(args) => delivery::handle_ack_command(&workspace()?, args),
        Commands::Abandon => delivery::handle_abandon_command(&workspace()?),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("get current dir")
}

fn workspace() -> Result<Workspace> {
    Workspace::discover(&current_dir()?)
}

/// Rejections and lookup misses are normal outcomes for the core, but a
/// failed edit should still fail the process.
fn report_outcome(outcome: Outcome, done: &str) -> Result<()> {
    match outcome {
        Outcome::Applied { pending } => {
            println!("{} ({} pending)", done, pending);
            Ok(())
        }
        Outcome::Rejected(rejection) => anyhow::bail!("{}", rejection),
        Outcome::NotFound(err) => anyhow::bail!("{}", err),
    }
}

fn handle_config_command(ws: &Workspace, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let cfg = ws.config()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg).context("serialize config json")?
                );
            } else {
                println!("user: {}", cfg.user);
                println!("snapshot: {}", cfg.snapshot);
                if let Some(repo) = &cfg.repo {
                    println!("repo: {}", repo);
                }
                if let Some(hosting) = &cfg.hosting {
                    println!("hosting: {}", hosting);
                }
                println!("dispatch_mode: {}", cfg.dispatch_mode);
                println!("fetch_timeout_secs: {}", cfg.fetch_timeout_secs);
            }
        }
        ConfigCommands::Set {
            user,
            snapshot,
            repo,
            hosting,
            dispatch_mode,
            fetch_timeout_secs,
        } => {
            let mut cfg = ws.config()?;
            if let Some(user) = user {
                cfg.user = user;
            }
            if let Some(snapshot) = snapshot {
                cfg.snapshot = snapshot;
            }
            if let Some(repo) = repo {
                cfg.repo = Some(repo).filter(|r| !r.trim().is_empty());
            }
            if let Some(hosting) = hosting {
                cfg.hosting = Some(hosting).filter(|h| !h.trim().is_empty());
            }
            if let Some(mode) = dispatch_mode {
                cfg.dispatch_mode = mode.parse()?;
            }
            if let Some(secs) = fetch_timeout_secs {
                cfg.fetch_timeout_secs = secs;
            }
            ws.store.write_config(&cfg)?;
            println!("Configuration updated");
        }
    }
    Ok(())
}
