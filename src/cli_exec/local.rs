use bookmarks::model::WorkspaceConfig;
use bookmarks::quorum::MergeGate;
use bookmarks::session::{Action, Origin};

use super::*;
use crate::cli_commands::local::{
    AddArgs, InitArgs, MergeArgs, MvArgs, ReviewArgs, RmArgs, ShowArgs, StatusArgs, TreeArgs,
};

pub(super) fn handle_init_command(args: InitArgs) -> Result<()> {
    let root = match args.path {
        Some(path) => path,
        None => current_dir()?,
    };
    let mut cfg = WorkspaceConfig::new(args.user, args.snapshot);
    cfg.repo = args.repo.filter(|r| !r.trim().is_empty());
    Workspace::init(&root, &cfg, args.force)?;
    println!("Initialized bookmarks workspace at {}", root.display());
    Ok(())
}

pub(super) fn handle_tree_command(ws: &Workspace, args: TreeArgs) -> Result<()> {
    let cfg = ws.config()?;
    let mut session = ws.open_session(&cfg)?;
    if !args.no_mounts {
        let client = ws.snapshot_client(&cfg)?;
        session.remount(&client);
    }

    if args.json {
        let value = tree_view::tree_json(session.tree().root(), session.mounts());
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("serialize tree json")?
        );
        return Ok(());
    }

    print!(
        "{}",
        tree_view::render(session.tree().root(), session.mounts())
    );
    for (url, n) in session.tree().duplicate_urls() {
        eprintln!("warning: {} appears {} times; edits apply to the first", url, n);
    }
    if session.pending() > 0 {
        println!("{} pending changes", session.pending());
    }
    Ok(())
}

pub(super) fn handle_show_command(ws: &Workspace, args: ShowArgs) -> Result<()> {
    let cfg = ws.config()?;
    let mut session = ws.open_session(&cfg)?;
    if !session.is_local(&args.url) {
        let client = ws.snapshot_client(&cfg)?;
        session.remount(&client);
    }
    let located = session
        .locate(&args.url)
        .with_context(|| format!("bookmark not found: {}", args.url))?;

    if args.json {
        let origin = match &located.origin {
            Origin::Local => serde_json::Value::Null,
            Origin::Peer(peer) => serde_json::Value::String(peer.clone()),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "file": located.file,
                "peer": origin,
                "editable": located.is_editable(),
            }))
            .context("serialize bookmark json")?
        );
        return Ok(());
    }

    let file = located.file;
    println!("title: {}", file.title);
    println!("url: {}", file.url);
    println!("name: {}", file.name);
    match &located.origin {
        Origin::Local => {
            let merge = match session.merge_gate(&file.url) {
                Some(MergeGate::Open) => "ready".to_string(),
                Some(MergeGate::Met(check)) => format!("ready (reviews {})", check),
                Some(MergeGate::Missing(check)) => format!("blocked (reviews {})", check),
                None => "unknown".to_string(),
            };
            println!("merge: {}", merge);
        }
        Origin::Peer(peer) => println!("mounted from: {} (read-only)", peer),
    }

    let user = session.user();
    match file.review_by(user) {
        Some(review) => println!("my review: {}", review.text),
        None => println!("my review: -"),
    }
    let others = file
        .reviews
        .iter()
        .filter(|r| r.user != user)
        .collect::<Vec<_>>();
    if others.is_empty() {
        println!("No other reviews.");
    }
    for review in others {
        println!("@{}: {}", review.user, review.text);
    }
    Ok(())
}

pub(super) fn handle_add_command(ws: &Workspace, args: AddArgs) -> Result<()> {
    let cfg = ws.config()?;
    let mut session = ws.open_session(&cfg)?;
    let outcome = session.apply(Action::Add {
        folder: args.folder,
        url: args.url,
        title: args.title,
    })?;
    report_outcome(outcome, "Added")
}

pub(super) fn handle_review_command(ws: &Workspace, args: ReviewArgs) -> Result<()> {
    let cfg = ws.config()?;
    let mut session = ws.open_session(&cfg)?;
    mount_unless_local(ws, &cfg, &mut session, &args.url)?;
    let outcome = session.apply(Action::Review {
        url: args.url,
        text: args.text,
    })?;
    report_outcome(outcome, "Review queued")
}

pub(super) fn handle_mv_command(ws: &Workspace, args: MvArgs) -> Result<()> {
    let cfg = ws.config()?;
    let mut session = ws.open_session(&cfg)?;
    mount_unless_local(ws, &cfg, &mut session, &args.url)?;
    let outcome = session.apply(Action::Move {
        url: args.url,
        target: args.target,
    })?;
    report_outcome(outcome, "Moved")
}

pub(super) fn handle_rm_command(ws: &Workspace, args: RmArgs) -> Result<()> {
    let cfg = ws.config()?;
    let mut session = ws.open_session(&cfg)?;
    mount_unless_local(ws, &cfg, &mut session, &args.url)?;
    let outcome = session.apply(Action::Delete { url: args.url })?;
    report_outcome(outcome, "Deleted")
}

pub(super) fn handle_merge_command(ws: &Workspace, args: MergeArgs) -> Result<()> {
    let cfg = ws.config()?;
    let mut session = ws.open_session(&cfg)?;
    mount_unless_local(ws, &cfg, &mut session, &args.url)?;
    let outcome = session.apply(Action::Merge { url: args.url })?;
    report_outcome(outcome, "Merge queued")
}

pub(super) fn handle_status_command(ws: &Workspace, args: StatusArgs) -> Result<()> {
    let queue = ws.store.read_queue()?;
    let inflight = ws.store.read_inflight()?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "pending": queue.len(),
                "commands": queue,
                "inflight": inflight,
            }))
            .context("serialize status json")?
        );
        return Ok(());
    }

    if queue.is_empty() {
        println!("No pending changes");
    } else {
        println!("{} pending changes", queue.len());
        for command in &queue {
            println!("  {} {}", command.kind(), command.url());
        }
    }
    if let Some(batch) = inflight {
        let short = batch.id.chars().take(8).collect::<String>();
        println!(
            "in flight: {} ({} changes, sent {})",
            short,
            batch.commands.len(),
            batch.created_at
        );
    }
    Ok(())
}

/// Mounts are only needed to tell a peer's bookmark apart from a missing one.
fn mount_unless_local<Q>(
    ws: &Workspace,
    cfg: &WorkspaceConfig,
    session: &mut bookmarks::session::Session<Q>,
    url: &str,
) -> Result<()>
where
    Q: bookmarks::queue::CommandLog,
{
    if !session.is_local(url) && !session.friends().is_empty() {
        let client = ws.snapshot_client(cfg)?;
        session.remount(&client);
    }
    Ok(())
}
