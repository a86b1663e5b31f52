// commands/mod.rs

use std::io::{self, Write};

use crate::handler::Registry;
use crate::history::HistoryStore;
use crate::util::writeln_ignore_broken_pipe;

pub mod arithmetic;
pub mod exit;
pub mod history;
pub mod menu;

pub use arithmetic::{ArithmeticCommand, Operation};
pub use exit::ExitCommand;
pub use history::HistoryCommand;
pub use menu::MenuCommand;

/// What the REPL should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Everything a command may touch while it runs.
pub struct Context<'a> {
    pub registry: &'a Registry,
    pub history: &'a mut HistoryStore,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl Context<'_> {
    pub fn print(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln_ignore_broken_pipe(&mut *self.out, line)
    }

    pub fn eprint(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln_ignore_broken_pipe(&mut *self.err, line)
    }
}

pub trait Command {
    /// One-line summary shown by the menu.
    fn description(&self) -> &str;

    /// User mistakes are reported through `ctx`; `Err` means the output streams failed.
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> anyhow::Result<Outcome>;
}
