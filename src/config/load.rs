use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "raga-browser";

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `RAGA_BROWSER__`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("RAGA_BROWSER")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.audio.volume) {
            return Err(format!(
                "audio.volume must be between 0.0 and 2.0 (got {})",
                self.audio.volume
            ));
        }
        if self.ui.status_timeout_ms == 0 {
            return Err("ui.status_timeout_ms must be >= 1".to_string());
        }
        if self.logging.level.trim().is_empty() {
            return Err("logging.level must not be empty".to_string());
        }
        Ok(())
    }

    /// The log file to write to: `logging.file` or the XDG state default.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging.file.clone().or_else(default_log_path)
    }
}

/// Resolve the config path from `RAGA_BROWSER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("RAGA_BROWSER_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/raga-browser/config.toml`
/// or `~/.config/raga-browser/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_STATE_HOME/raga-browser/raga-browser.log`, or the same under
/// `~/.local/state`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join(APP_DIR).join("raga-browser.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
