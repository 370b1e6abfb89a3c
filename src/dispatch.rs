//! Sync Dispatcher: turns the whole pending queue into one outbound
//! change-request and hands it to an external channel.
//!
//! In [`DispatchMode::Optimistic`] nothing confirms the remote side received
//! the batch; the queue is cleared once the hand-off returns. A lost
//! submission cannot be detected or retried from here.
//! [`DispatchMode::Acknowledged`] keeps the batch in flight until
//! [`acknowledge`] is called, re-sending it on every dispatch until then.

use anyhow::{Context, Result};

use crate::model::{ChangeRequest, DispatchMode, InFlightBatch, compute_batch_id};
use crate::queue::CommandLog;
use crate::store::LocalStore;

mod destination;

pub use self::destination::{
    FixedRepo, HostingLocation, ISSUE_TITLE, PLACEHOLDER_REPO, RepoResolver, issue_url,
};

/// Asks the user before anything leaves the machine.
pub trait Confirm {
    fn confirm(&mut self, pending: usize) -> Result<bool>;
}

/// The external channel a destination address is handed to.
pub trait Handoff {
    fn hand_off(&mut self, destination: &str) -> Result<()>;
}

/// Durable slot for the acknowledged-mode batch.
pub trait InFlightSlot {
    fn load(&self) -> Result<Option<InFlightBatch>>;
    fn save(&mut self, batch: &InFlightBatch) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

impl InFlightSlot for LocalStore {
    fn load(&self) -> Result<Option<InFlightBatch>> {
        self.read_inflight()
    }

    fn save(&mut self, batch: &InFlightBatch) -> Result<()> {
        self.write_inflight(batch)
    }

    fn clear(&mut self) -> Result<()> {
        self.clear_inflight()
    }
}

/// In-memory slot for sessions that keep nothing on disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryInFlight(pub Option<InFlightBatch>);

impl InFlightSlot for MemoryInFlight {
    fn load(&self) -> Result<Option<InFlightBatch>> {
        Ok(self.0.clone())
    }

    fn save(&mut self, batch: &InFlightBatch) -> Result<()> {
        self.0 = Some(batch.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.0 = None;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing pending; the user was not asked.
    Empty,
    Declined { pending: usize },
    Dispatched(Dispatched),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatched {
    pub destination: String,
    pub commands: usize,
    /// Id of the in-flight batch (acknowledged mode only).
    pub batch: Option<String>,
    /// True when an unacknowledged batch was sent again.
    pub resent: bool,
}

pub struct SyncDispatcher<R> {
    mode: DispatchMode,
    resolver: R,
}

impl<R: RepoResolver> SyncDispatcher<R> {
    pub fn new(mode: DispatchMode, resolver: R) -> Self {
        Self { mode, resolver }
    }

    pub fn dispatch<Q, S>(
        &self,
        queue: &mut Q,
        inflight: &mut S,
        confirm: &mut dyn Confirm,
        handoff: &mut dyn Handoff,
    ) -> Result<DispatchOutcome>
    where
        Q: CommandLog + ?Sized,
        S: InFlightSlot + ?Sized,
    {
        match self.mode {
            DispatchMode::Optimistic => self.dispatch_optimistic(queue, confirm, handoff),
            DispatchMode::Acknowledged => {
                self.dispatch_acknowledged(queue, inflight, confirm, handoff)
            }
        }
    }

    fn dispatch_optimistic<Q>(
        &self,
        queue: &mut Q,
        confirm: &mut dyn Confirm,
        handoff: &mut dyn Handoff,
    ) -> Result<DispatchOutcome>
    where
        Q: CommandLog + ?Sized,
    {
        if queue.is_empty() {
            return Ok(DispatchOutcome::Empty);
        }
        let pending = queue.len();
        if !confirm.confirm(pending)? {
            return Ok(DispatchOutcome::Declined { pending });
        }

        let request = ChangeRequest {
            commands: queue.commands().to_vec(),
        };
        let destination = issue_url(&self.resolver.repo_path(), &request)?;
        handoff
            .hand_off(&destination)
            .context("hand off change-request")?;

        // No delivery confirmation exists; the hand-off is treated as success.
        let drained = queue.drain()?;
        tracing::info!(commands = drained.len(), "dispatched pending changes");
        Ok(DispatchOutcome::Dispatched(Dispatched {
            destination,
            commands: drained.len(),
            batch: None,
            resent: false,
        }))
    }

    fn dispatch_acknowledged<Q, S>(
        &self,
        queue: &mut Q,
        inflight: &mut S,
        confirm: &mut dyn Confirm,
        handoff: &mut dyn Handoff,
    ) -> Result<DispatchOutcome>
    where
        Q: CommandLog + ?Sized,
        S: InFlightSlot + ?Sized,
    {
        if let Some(batch) = inflight.load()? {
            let pending = batch.commands.len();
            if !confirm.confirm(pending)? {
                return Ok(DispatchOutcome::Declined { pending });
            }
            let request = ChangeRequest {
                commands: batch.commands,
            };
            let destination = issue_url(&self.resolver.repo_path(), &request)?;
            handoff
                .hand_off(&destination)
                .context("hand off change-request")?;
            tracing::info!(batch = %batch.id, commands = pending, "re-sent in-flight batch");
            return Ok(DispatchOutcome::Dispatched(Dispatched {
                destination,
                commands: pending,
                batch: Some(batch.id),
                resent: true,
            }));
        }

        if queue.is_empty() {
            return Ok(DispatchOutcome::Empty);
        }
        let pending = queue.len();
        if !confirm.confirm(pending)? {
            return Ok(DispatchOutcome::Declined { pending });
        }

        let request = ChangeRequest {
            commands: queue.commands().to_vec(),
        };
        let request_json = serde_json::to_vec(&request).context("serialize change request")?;
        let created_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .context("format time")?;
        let batch = InFlightBatch {
            version: 1,
            id: compute_batch_id(&created_at, &request_json),
            created_at,
            commands: request.commands.clone(),
        };
        let destination = issue_url(&self.resolver.repo_path(), &request)?;

        // The batch is durable before the queue lets go of it.
        inflight.save(&batch)?;
        queue.drain()?;
        handoff
            .hand_off(&destination)
            .context("hand off change-request")?;

        tracing::info!(batch = %batch.id, commands = pending, "dispatched batch awaiting acknowledgement");
        Ok(DispatchOutcome::Dispatched(Dispatched {
            destination,
            commands: pending,
            batch: Some(batch.id),
            resent: false,
        }))
    }
}

/// Clears the in-flight batch if `id` names it (a unique prefix is enough).
pub fn acknowledge<S>(inflight: &mut S, id: &str) -> Result<bool>
where
    S: InFlightSlot + ?Sized,
{
    let Some(batch) = inflight.load()? else {
        return Ok(false);
    };
    if id.is_empty() || !batch.id.starts_with(id) {
        return Ok(false);
    }
    inflight.clear()?;
    tracing::info!(batch = %batch.id, "batch acknowledged");
    Ok(true)
}

/// Gives up on the in-flight batch and puts its commands back at the front
/// of the queue. Returns the new pending count.
pub fn abandon<Q, S>(queue: &mut Q, inflight: &mut S) -> Result<usize>
where
    Q: CommandLog + ?Sized,
    S: InFlightSlot + ?Sized,
{
    let Some(batch) = inflight.load()? else {
        return Ok(queue.len());
    };
    let pending = queue.requeue_front(batch.commands)?;
    inflight.clear()?;
    tracing::info!(batch = %batch.id, pending, "abandoned in-flight batch");
    Ok(pending)
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
