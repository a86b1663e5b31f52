// handler.rs

use std::io::Write;

use tracing::{debug, warn};

use crate::commands::{Command, Context, Outcome};
use crate::history::HistoryStore;
use crate::parser::parse_line;
use crate::util::writeln_ignore_broken_pipe;

pub const UNKNOWN_COMMAND_HINT: [&str; 2] = [
    "Available commands: add, subtract, multiply, divide, exit",
    "Type 'command number1 number2' (e.g., 'add 2 2') or 'exit' to quit.",
];

/// Name to command mapping that remembers registration order.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, Box<dyn Command>)>,
}

impl Registry {
    /// Re-registering a name replaces the command but keeps its original position.
    pub fn register(&mut self, name: impl Into<String>, command: Box<dyn Command>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = command,
            None => self.entries.push((name, command)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, command)| &**command)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Command)> {
        self.entries.iter().map(|(name, command)| (name.as_str(), &**command))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns the registry and the session history; turns input lines into command calls.
#[derive(Default)]
pub struct CommandHandler {
    registry: Registry,
    history: HistoryStore,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_command(&mut self, name: impl Into<String>, command: Box<dyn Command>) {
        let name = name.into();
        debug!(command = %name, "registering command");
        self.registry.register(name, command);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn dispatch(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> anyhow::Result<Outcome> {
        let Some(invocation) = parse_line(line) else {
            return Ok(Outcome::Continue);
        };
        let Some(command) = self.registry.get(&invocation.name) else {
            warn!(command = %invocation.name, "unknown command");
            for line in UNKNOWN_COMMAND_HINT {
                writeln_ignore_broken_pipe(&mut *out, line)?;
            }
            return Ok(Outcome::Continue);
        };
        debug!(command = %invocation.name, args = ?invocation.args, "dispatching");
        let mut ctx = Context { registry: &self.registry, history: &mut self.history, out, err };
        command.execute(&invocation.args, &mut ctx)
    }
}
