use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub(crate) struct InitArgs {
    /// Snapshot document location (url, or path relative to the workspace)
    #[arg(long, default_value = "data.json")]
    pub(crate) snapshot: String,
    /// Identity recorded on your reviews
    #[arg(long, default_value = "local_dev")]
    pub(crate) user: String,
    /// Destination repository as account/repository
    #[arg(long)]
    pub(crate) repo: Option<String>,
    /// Re-initialize if .bookmarks already exists
    #[arg(long)]
    pub(crate) force: bool,
    /// Path to initialize (defaults to current directory)
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Skip fetching peers
    #[arg(long)]
    pub(crate) no_mounts: bool,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ShowArgs {
    pub(crate) url: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct AddArgs {
    pub(crate) url: String,
    /// Top-level folder to add into
    #[arg(long)]
    pub(crate) folder: String,
    /// Title (defaults to the url)
    #[arg(long)]
    pub(crate) title: Option<String>,
}

#[derive(Args)]
pub(crate) struct ReviewArgs {
    pub(crate) url: String,
    #[arg(short = 'm', long)]
    pub(crate) text: String,
}

#[derive(Args)]
pub(crate) struct MvArgs {
    pub(crate) url: String,
    /// Target top-level folder
    pub(crate) target: String,
}

#[derive(Args)]
pub(crate) struct RmArgs {
    pub(crate) url: String,
}

#[derive(Args)]
pub(crate) struct MergeArgs {
    pub(crate) url: String,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
