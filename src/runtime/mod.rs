use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::{App, StatusLevel};
use crate::audio::{MediaResolver, PlaybackController, RodioBackend};
use crate::catalog::{self, CatalogError, LoadedCatalog};
use crate::config::Settings;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    if let Err(e) = logging::init(&settings) {
        eprintln!("raga-browser: logging disabled: {e}");
    }
    if let Some(msg) = &config_warning {
        warn!("{msg}");
    }

    // The first argument, when given, is a catalog file and wins over `catalog.path`.
    let catalog_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.catalog.path.clone());
    let loaded = load_catalog(catalog_path.as_deref());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| match loaded {
        Ok(loaded) => {
            let mut app = build_app(loaded, catalog_path.as_deref(), &settings);
            if let Some(msg) = config_warning {
                app.set_status(msg, StatusLevel::Warning);
            }
            let result = event_loop::run(&mut terminal, &settings, &mut app);
            app.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
            result
        }
        Err(e) => {
            error!(error = %e, "catalog unavailable");
            event_loop::run_fatal(&mut terminal, &format!("Could not load ragas: {e}"))
        }
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn load_catalog(path: Option<&Path>) -> Result<LoadedCatalog, CatalogError> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading catalog file");
            catalog::load_from_path(p)
        }
        None => catalog::builtin(),
    }
}

/// Relative media references resolve against `audio.media_dir`, else the
/// catalog file's directory, else the working directory.
fn media_base(settings: &Settings, catalog_path: Option<&Path>) -> Option<PathBuf> {
    settings.audio.media_dir.clone().or_else(|| {
        catalog_path
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    })
}

fn build_app(loaded: LoadedCatalog, catalog_path: Option<&Path>, settings: &Settings) -> App {
    let resolver = MediaResolver::new(media_base(settings, catalog_path));
    let backend = RodioBackend::spawn(&settings.audio, resolver.clone());
    let playback = PlaybackController::new(Box::new(backend));

    let mut app = App::new(loaded.catalog, playback, resolver, &settings.ui);
    if loaded.rejected > 0 {
        app.set_status(
            format!("Skipped {} invalid raga records", loaded.rejected),
            StatusLevel::Warning,
        );
    }
    app
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_base_prefers_configured_dir() {
        let mut settings = Settings::default();
        settings.audio.media_dir = Some(PathBuf::from("/srv/audio"));
        assert_eq!(
            media_base(&settings, Some(Path::new("/data/ragas.json"))),
            Some(PathBuf::from("/srv/audio"))
        );
    }

    #[test]
    fn media_base_falls_back_to_catalog_dir() {
        let settings = Settings::default();
        assert_eq!(
            media_base(&settings, Some(Path::new("/data/ragas.json"))),
            Some(PathBuf::from("/data"))
        );
        assert_eq!(media_base(&settings, Some(Path::new("ragas.json"))), None);
        assert_eq!(media_base(&settings, None), None);
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/ragas.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(load_catalog(None).is_ok());
    }
}
