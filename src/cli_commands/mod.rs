use clap::Subcommand;

pub(crate) mod delivery;
pub(crate) mod local;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a workspace (.bookmarks)
    Init(local::InitArgs),

    /// Show or edit the workspace configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Render the bookmark tree, with peers mounted read-only
    Tree(local::TreeArgs),

    /// Show one bookmark and its reviews
    Show(local::ShowArgs),

    /// Add a bookmark to a top-level folder
    Add(local::AddArgs),

    /// Write (or replace) your review of a bookmark
    Review(local::ReviewArgs),

    /// Move a bookmark into another top-level folder
    #[command(name = "mv")]
    Mv(local::MvArgs),

    /// Delete a bookmark
    #[command(name = "rm")]
    Rm(local::RmArgs),

    /// Merge a bookmark into the archive (shared bookmarks need every review)
    Merge(local::MergeArgs),

    /// Show pending changes
    Status(local::StatusArgs),

    /// Send all pending changes as one change-request
    Sync(delivery::SyncArgs),

    /// Mark the in-flight batch as received
    Ack(delivery::AckArgs),

    /// Give up on the in-flight batch and requeue its changes
    Abandon,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the configuration
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Update configuration fields
    Set {
        #[arg(long)]
        user: Option<String>,
        /// Snapshot location (url or path)
        #[arg(long)]
        snapshot: Option<String>,
        /// Destination repository as account/repository (empty string clears)
        #[arg(long)]
        repo: Option<String>,
        /// Hosting address used to derive the repository (empty string clears)
        #[arg(long)]
        hosting: Option<String>,
        /// optimistic | acknowledged
        #[arg(long)]
        dispatch_mode: Option<String>,
        #[arg(long)]
        fetch_timeout_secs: Option<u64>,
    },
}
