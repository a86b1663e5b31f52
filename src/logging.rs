// logging.rs

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context as _;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;

/// Installs the global subscriber. `RUST_LOG` wins over `LOG_LEVEL`.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(path) = &settings.log_file else {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        if settings.log_json {
            tracing_subscriber::registry().with(filter).with(layer.json()).try_init()?;
        } else {
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    if settings.log_json {
        tracing_subscriber::registry().with(filter).with(layer.json()).try_init()?;
    } else {
        tracing_subscriber::registry().with(filter).with(layer).try_init()?;
    }
    Ok(())
}
