// commands/exit.rs

use tracing::info;

use super::{Command, Context, Outcome};

pub struct ExitCommand;

impl Command for ExitCommand {
    fn description(&self) -> &str {
        "Exit the application"
    }

    // History is only persisted by an explicit `history save`.
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> anyhow::Result<Outcome> {
        info!("exit requested");
        ctx.print("Exiting the program...")?;
        Ok(Outcome::Exit)
    }
}
