// plugins.rs

//! Static plugin table. Each row names the module providing a command and the name the
//! command is registered under; adding a plugin means adding a row and a constructor arm.

use crate::commands::{ArithmeticCommand, Command, ExitCommand, HistoryCommand, MenuCommand, Operation};
use crate::config::Settings;
use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginSpec {
    pub module: &'static str,
    pub name: &'static str,
}

pub const DISCOVERED: &[PluginSpec] = &[
    PluginSpec { module: "add", name: "add" },
    PluginSpec { module: "subtract", name: "subtract" },
    PluginSpec { module: "multiply", name: "multiply" },
    PluginSpec { module: "divide", name: "divide" },
    PluginSpec { module: "history", name: "history" },
    PluginSpec { module: "menu", name: "menu" },
    PluginSpec { module: "exit", name: "exit" },
];

pub fn build_command(module: &str, settings: &Settings) -> Result<Box<dyn Command>, CalcError> {
    let command: Box<dyn Command> = match module {
        "add" => Box::new(ArithmeticCommand::new(Operation::Add)),
        "subtract" => Box::new(ArithmeticCommand::new(Operation::Subtract)),
        "multiply" => Box::new(ArithmeticCommand::new(Operation::Multiply)),
        "divide" => Box::new(ArithmeticCommand::new(Operation::Divide)),
        "history" => Box::new(HistoryCommand::new(
            settings.history_file.clone(),
            settings.history_csv_file.clone(),
        )),
        "menu" => Box::new(MenuCommand),
        "exit" => Box::new(ExitCommand),
        other => return Err(CalcError::UnknownPlugin(other.to_string())),
    };
    Ok(command)
}
