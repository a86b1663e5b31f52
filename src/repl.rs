// repl.rs

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use tracing::debug;

use crate::completion::CommandCompleter;

pub const PROMPT: &str = ">>> ";

/// Where the shell gets its input lines. `None` means input has ended.
pub trait LineSource {
    fn next_line(&mut self) -> anyhow::Result<Option<String>>;
}

/// Interactive terminal input with line editing and tab completion.
pub struct Prompt {
    editor: Editor<CommandCompleter, DefaultHistory>,
}

impl Prompt {
    pub fn new(command_names: Vec<String>) -> anyhow::Result<Self> {
        let config = Config::builder().completion_type(CompletionType::List).build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CommandCompleter::new(command_names)));
        Ok(Self { editor })
    }
}

impl LineSource for Prompt {
    fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("prompt closed by user");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
