// commands/menu.rs

use itertools::Itertools;

use super::{Command, Context, Outcome};

pub struct MenuCommand;

impl Command for MenuCommand {
    fn description(&self) -> &str {
        "Show available commands"
    }

    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> anyhow::Result<Outcome> {
        let listing = ctx
            .registry
            .iter()
            .map(|(name, command)| format!("{:<19}: {}", name, command.description()))
            .join("\n");
        ctx.print("Available Commands:")?;
        if !listing.is_empty() {
            ctx.print(listing)?;
        }
        Ok(Outcome::Continue)
    }
}
