// app.rs

use std::io::{self, Write};

use anyhow::Context as _;
use tracing::{debug, info};

use crate::commands::Outcome;
use crate::config::Settings;
use crate::error::CalcError;
use crate::handler::CommandHandler;
use crate::plugins::{self, DISCOVERED};
use crate::repl::{LineSource, Prompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellState {
    Running,
    Terminated,
}

pub struct App {
    settings: Settings,
    handler: CommandHandler,
}

impl App {
    /// Registers every discovered plugin and loads the saved line-log.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let mut app = Self::bare(settings);
        app.load_plugins()?;
        let path = app.settings.history_file.clone();
        app.handler
            .history_mut()
            .load(&path)
            .with_context(|| format!("loading history from {}", path.display()))?;
        Ok(app)
    }

    /// An app with no commands and an empty history.
    pub fn bare(settings: Settings) -> Self {
        Self { settings, handler: CommandHandler::new() }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn handler(&self) -> &CommandHandler {
        &self.handler
    }

    pub fn load_plugins(&mut self) -> Result<(), CalcError> {
        for plugin in DISCOVERED {
            self.register_plugin_commands(plugin.module, plugin.name)?;
        }
        info!(commands = self.handler.registry().len(), "plugins loaded");
        Ok(())
    }

    pub fn register_plugin_commands(&mut self, module: &str, name: &str) -> Result<(), CalcError> {
        let command = plugins::build_command(module, &self.settings)?;
        debug!(module, name, "plugin registered");
        self.handler.register_command(name, command);
        Ok(())
    }

    /// Reads and dispatches lines until a command asks to exit or input runs out.
    pub fn run<S: LineSource>(
        &mut self,
        input: &mut S,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> anyhow::Result<()> {
        info!(environment = %self.settings.environment, "calculator started");
        let mut state = ShellState::Running;
        while state == ShellState::Running {
            let Some(line) = input.next_line()? else {
                info!("input closed");
                state = ShellState::Terminated;
                continue;
            };
            if self.handler.dispatch(&line, &mut *out, &mut *err)? == Outcome::Exit {
                state = ShellState::Terminated;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Runs the interactive prompt on the terminal.
    pub fn start(&mut self) -> anyhow::Result<()> {
        let mut prompt = Prompt::new(self.handler.registry().names())?;
        self.run(&mut prompt, &mut io::stdout(), &mut io::stderr())
    }
}
