use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/raga-browser/config.toml` or
/// `~/.config/raga-browser/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RAGA_BROWSER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// External dataset (`.json` or `.toml`). The built-in catalog is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Base directory for relative media references.
    ///
    /// Defaults to the directory of the catalog file, or the working directory
    /// for the built-in catalog.
    pub media_dir: Option<PathBuf>,
    /// Preview volume multiplier.
    pub volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            media_dir: None,
            volume: 1.0,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// How long typing must pause before the search term is applied (milliseconds).
    /// Set to 0 to apply on every keystroke.
    pub search_debounce_ms: u64,

    /// How long a status message stays visible (milliseconds).
    pub status_timeout_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Raga Explorer ~ ".to_string(),
            search_debounce_ms: 300,
            status_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RAGA_BROWSER_LOG` is not set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/raga-browser/raga-browser.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
