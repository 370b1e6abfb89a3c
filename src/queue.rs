//! Command Queue: the ordered log of commands not yet reflected remotely.

use anyhow::Result;

use crate::model::Command;
use crate::store::LocalStore;

/// Append-only log of pending commands, cleared only as a whole.
pub trait CommandLog {
    /// Appends `command` and returns the new pending count.
    fn enqueue(&mut self, command: Command) -> Result<usize>;

    fn commands(&self) -> &[Command];

    /// Takes every pending command and clears the log in one step.
    fn drain(&mut self) -> Result<Vec<Command>>;

    /// Puts `commands` back ahead of whatever is pending.
    fn requeue_front(&mut self, commands: Vec<Command>) -> Result<usize>;

    fn len(&self) -> usize {
        self.commands().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local log, used when nothing must survive a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryQueue {
    commands: Vec<Command>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandLog for MemoryQueue {
    fn enqueue(&mut self, command: Command) -> Result<usize> {
        self.commands.push(command);
        Ok(self.commands.len())
    }

    fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn drain(&mut self) -> Result<Vec<Command>> {
        Ok(std::mem::take(&mut self.commands))
    }

    fn requeue_front(&mut self, mut commands: Vec<Command>) -> Result<usize> {
        commands.append(&mut self.commands);
        self.commands = commands;
        Ok(self.commands.len())
    }
}

/// Log backed by the workspace's durable queue slot. Every change is written
/// through before the in-memory copy is updated, so a failed write leaves
/// both sides as they were.
#[derive(Clone, Debug)]
pub struct FileQueue {
    store: LocalStore,
    commands: Vec<Command>,
}

impl FileQueue {
    pub fn open(store: LocalStore) -> Result<Self> {
        let commands = store.read_queue()?;
        Ok(Self { store, commands })
    }
}

impl CommandLog for FileQueue {
    fn enqueue(&mut self, command: Command) -> Result<usize> {
        let mut next = self.commands.clone();
        next.push(command);
        self.store.write_queue(&next)?;
        self.commands = next;
        Ok(self.commands.len())
    }

    fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn drain(&mut self) -> Result<Vec<Command>> {
        self.store.clear_queue()?;
        Ok(std::mem::take(&mut self.commands))
    }

    fn requeue_front(&mut self, mut commands: Vec<Command>) -> Result<usize> {
        commands.extend(self.commands.iter().cloned());
        self.store.write_queue(&commands)?;
        self.commands = commands;
        Ok(self.commands.len())
    }
}

#[cfg(test)]
#[path = "tests/queue_tests.rs"]
mod tests;
