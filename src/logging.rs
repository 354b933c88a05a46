use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "SKYCAST_LOG";
const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to stderr; used when stdout carries the plain-text report.
pub fn init_stderr() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("installing stderr logger failed")
}

/// Logs to `dir/skycast.log`; the terminal belongs to the dashboard.
pub fn init_file(dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).context("creating log directory failed")?;
    let path = dir.join("skycast.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {} failed", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("installing file logger failed")?;
    Ok(path)
}
