// error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Cannot divide by 0!")]
    DivisionByZero,

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("unknown plugin module: {0}")]
    UnknownPlugin(String),

    // Persistence failures keep the OS message as-is.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
