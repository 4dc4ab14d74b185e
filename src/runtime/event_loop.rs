use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::catalog::Field;
use crate::config;
use crate::ui;

type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input, timers, playback completions and
/// drawing. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Term,
    settings: &config::Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();

    loop {
        app.poll_playback();
        app.tick(Instant::now());

        let display = app.display();
        terminal.draw(|f| ui::draw(f, app, &display, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Show `message` until the user quits.
pub fn run_fatal(terminal: &mut Term, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw_fatal(f, message))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press. Returns true when the app should quit.
fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    if app.is_detail_open() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_detail(),
            KeyCode::Char('p') => app.play_preview(),
            KeyCode::Char(' ') => app.pause_preview(),
            KeyCode::Char('s') => app.stop_preview(),
            _ => {}
        }
        return false;
    }

    if app.search_mode() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.submit_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Down => app.next(),
            KeyCode::Up => app.prev(),
            KeyCode::Char('j') | KeyCode::Char('n')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.next()
            }
            KeyCode::Char('k') | KeyCode::Char('p')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.prev()
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_search_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('t') => app.cycle_filter(Field::Category, true),
        KeyCode::Char('T') => app.cycle_filter(Field::Category, false),
        KeyCode::Char('o') => app.cycle_filter(Field::Period, true),
        KeyCode::Char('O') => app.cycle_filter(Field::Period, false),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('R') => app.reset_state(),
        _ => {}
    }

    false
}
