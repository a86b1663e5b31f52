// commands/arithmetic.rs

use tracing::{info, warn};

use super::{Command, Context, Outcome};
use crate::decimal::Decimal;
use crate::error::CalcError;
use crate::history::Calculation;

pub const INVALID_OPERANDS: &str = "Enter valid numbers for the operation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    pub fn apply(self, a: &Decimal, b: &Decimal) -> Result<Decimal, CalcError> {
        match self {
            Self::Add => Ok(a.add(b)),
            Self::Subtract => Ok(a.sub(b)),
            Self::Multiply => Ok(a.mul(b)),
            Self::Divide => a.checked_div(b),
        }
    }
}

/// A binary operation on two decimal operands. Stateless.
pub struct ArithmeticCommand {
    operation: Operation,
}

impl ArithmeticCommand {
    pub fn new(operation: Operation) -> Self {
        Self { operation }
    }

    pub fn evaluate(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        self.operation.apply(&a, &b)
    }

    fn operands(args: &[String]) -> Option<(Decimal, Decimal)> {
        match args {
            [a, b] => Some((a.parse().ok()?, b.parse().ok()?)),
            _ => None,
        }
    }
}

impl Command for ArithmeticCommand {
    fn description(&self) -> &str {
        match self.operation {
            Operation::Add => "Add two numbers",
            Operation::Subtract => "Subtract two numbers",
            Operation::Multiply => "Multiply two numbers",
            Operation::Divide => "Divide two numbers",
        }
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> anyhow::Result<Outcome> {
        let op = self.operation.name();
        let Some((a, b)) = Self::operands(args) else {
            warn!(op, ?args, "rejected operands");
            ctx.print(INVALID_OPERANDS)?;
            return Ok(Outcome::Continue);
        };
        match self.evaluate(a.clone(), b.clone()) {
            Ok(result) => {
                let calc = Calculation::new(op, a, b, result);
                info!(op, entry = %calc, "calculation");
                ctx.print(calc.to_string())?;
                ctx.history.add(calc);
            }
            Err(e) => {
                warn!(op, error = %e, "calculation failed");
                ctx.print(e.to_string())?;
            }
        }
        Ok(Outcome::Continue)
    }
}
