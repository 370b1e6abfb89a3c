use clap::Args;

#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub(crate) yes: bool,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct AckArgs {
    /// Batch id (a unique prefix is enough)
    pub(crate) batch_id: String,
}
