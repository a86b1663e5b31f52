// config.rs

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENVIRONMENT: &str = "DEVELOPMENT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: String,
    pub history_file: PathBuf,
    pub history_csv_file: PathBuf,
    pub log_level: String,
    pub log_json: bool,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads a dotenv file without touching the process environment, which still wins.
    pub fn from_env_file(path: &Path) -> Result<Self, dotenvy::Error> {
        Self::layered(path, |name| env::var(name).ok())
    }

    fn layered<F>(path: &Path, primary: F) -> Result<Self, dotenvy::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: HashMap<String, String> = dotenvy::from_path_iter(path)?.collect::<Result<_, _>>()?;
        Ok(Self::from_lookup(|name| primary(name).or_else(|| file.get(name).cloned())))
    }

    /// Builds settings from any variable source, falling back to defaults for unset names.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        Self {
            environment: var("ENVIRONMENT", DEFAULT_ENVIRONMENT),
            history_file: PathBuf::from(var("HISTORY_FILE", "data/calculation_history.log")),
            history_csv_file: PathBuf::from(var("HISTORY_CSV_FILE", "data/calculation_history.csv")),
            log_level: var("LOG_LEVEL", "warn"),
            log_json: lookup("LOG_JSON").and_then(|v| parse_bool(&v)).unwrap_or(false),
            log_file: lookup("LOG_FILE").filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }
}

/// Loads `.env` from the working directory or a parent into the process environment.
/// A missing file is not an error.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
