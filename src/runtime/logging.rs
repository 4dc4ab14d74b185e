//! File logging. The TUI owns the terminal, so nothing is written to stdout.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

/// Environment variable overriding `logging.level`.
pub const LOG_ENV: &str = "RAGA_BROWSER_LOG";

/// Install the global subscriber. Without a usable log file, logging stays off.
pub fn init(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = settings.log_path() else {
        return Ok(());
    };
    let file = open_log_file(&path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/raga-browser/raga-browser.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
