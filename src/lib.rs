// lib.rs

pub mod app;
pub mod commands;
pub mod completion;
pub mod config;
pub mod decimal;
pub mod error;
pub mod handler;
pub mod history;
pub mod logging;
pub mod parser;
pub mod plugins;
pub mod repl;
pub mod util;

pub use app::App;
pub use config::Settings;
pub use error::CalcError;
