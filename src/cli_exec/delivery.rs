use std::io::{self, BufRead, Write};

use bookmarks::dispatch::{self, Confirm, DispatchOutcome, Handoff};
use bookmarks::queue::FileQueue;

use super::*;
use crate::cli_commands::delivery::{AckArgs, SyncArgs};

/// Asks on stderr and reads one line from stdin; `--yes` skips the prompt.
struct PromptConfirm {
    assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, pending: usize) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        eprint!("Push {} changes? [y/N] ", pending);
        io::stderr().flush().context("flush prompt")?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read confirmation")?;
        Ok(matches!(line.trim(), "y" | "Y" | "yes"))
    }
}

/// Hands the destination to the user by printing it; opening it submits the
/// change-request.
struct PrintHandoff {
    json: bool,
}

impl Handoff for PrintHandoff {
    fn hand_off(&mut self, destination: &str) -> Result<()> {
        if !self.json {
            println!("{}", destination);
        }
        Ok(())
    }
}

pub(super) fn handle_sync_command(ws: &Workspace, args: SyncArgs) -> Result<()> {
    let cfg = ws.config()?;
    let dispatcher = ws.dispatcher(&cfg)?;
    let mut queue = FileQueue::open(ws.store.clone())?;
    let mut inflight = ws.store.clone();
    let mut confirm = PromptConfirm {
        assume_yes: args.yes,
    };
    let mut handoff = PrintHandoff { json: args.json };

    let outcome = dispatcher.dispatch(&mut queue, &mut inflight, &mut confirm, &mut handoff)?;

    if args.json {
        let value = match &outcome {
            DispatchOutcome::Empty => serde_json::json!({ "status": "empty" }),
            DispatchOutcome::Declined { pending } => {
                serde_json::json!({ "status": "declined", "pending": pending })
            }
            DispatchOutcome::Dispatched(sent) => serde_json::json!({
                "status": "dispatched",
                "destination": sent.destination,
                "commands": sent.commands,
                "batch": sent.batch,
                "resent": sent.resent,
            }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("serialize sync json")?
        );
        return Ok(());
    }

    match outcome {
        DispatchOutcome::Empty => println!("Nothing to push"),
        DispatchOutcome::Declined { pending } => {
            println!("Not pushed; {} changes still pending", pending)
        }
        DispatchOutcome::Dispatched(sent) => {
            let verb = if sent.resent { "Re-sent" } else { "Pushed" };
            match sent.batch {
                Some(id) => println!(
                    "{} {} changes as batch {} (run `bookmarks ack {}` once it lands)",
                    verb,
                    sent.commands,
                    id,
                    short_id(&id)
                ),
                None => println!("{} {} changes", verb, sent.commands),
            }
        }
    }
    Ok(())
}

pub(super) fn handle_ack_command(ws: &Workspace, args: AckArgs) -> Result<()> {
    let mut inflight = ws.store.clone();
    if !dispatch::acknowledge(&mut inflight, args.batch_id.trim())? {
        anyhow::bail!("no in-flight batch matches {}", args.batch_id);
    }
    println!("Acknowledged {}", args.batch_id.trim());
    Ok(())
}

pub(super) fn handle_abandon_command(ws: &Workspace) -> Result<()> {
    let mut queue = FileQueue::open(ws.store.clone())?;
    let mut inflight = ws.store.clone();
    if ws.store.read_inflight()?.is_none() {
        println!("No batch in flight");
        return Ok(());
    }
    let pending = dispatch::abandon(&mut queue, &mut inflight)?;
    println!("Abandoned in-flight batch ({} pending)", pending);
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
