//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Nothing
//! here mutates the app; every frame is drawn from the current `App` and the
//! projection computed for it.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, StatusLevel};
use crate::audio::PlaybackState;
use crate::catalog::{Field, Record};
use crate::config::UiSettings;
use crate::view::{Highlighted, highlight};

const LIST_CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "details"),
    ("/", "search"),
    ("t/T", "thaat"),
    ("o/O", "time of day"),
    ("c", "clear filters"),
    ("R", "reset"),
    ("q", "quit"),
];

const DETAIL_CONTROLS: &[(&str, &str)] = &[
    ("p", "play"),
    ("space", "pause"),
    ("s", "stop"),
    ("esc/q", "close"),
];

const SEARCH_CONTROLS: &[(&str, &str)] = &[
    ("enter", "apply"),
    ("esc", "clear"),
    ("ctrl-j/k", "up/down"),
];

fn controls_text(controls: &[(&str, &str)]) -> String {
    controls
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// The visible slice `[start, end)` of a list of `total` rows that keeps the
/// selected row centered when possible, plus the selected row's offset in it.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn highlighted_name<'a>(name: &'a str, term: &str) -> Vec<Span<'a>> {
    match highlight(name, term) {
        Highlighted::Plain(s) => vec![Span::raw(s)],
        Highlighted::Match {
            before,
            matched,
            after,
        } => vec![
            Span::raw(before),
            Span::styled(
                matched,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            Span::raw(after),
        ],
    }
}

fn list_item<'a>(record: &'a Record, term: &str) -> ListItem<'a> {
    let mut spans = highlighted_name(record.name(), term);
    spans.push(Span::styled(
        format!("  {} · {}", record.category(), record.period()),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(Line::from(spans))
}

fn filter_status(app: &App, shown: usize) -> String {
    let mut parts: Vec<String> = Vec::new();

    let show = |v: Option<&str>| v.unwrap_or("All").to_string();
    parts.push(format!(" THAAT: {}", show(app.selection().get(Field::Category))));
    parts.push(format!("TIME: {}", show(app.selection().get(Field::Period))));

    let input = app.search_input();
    if app.search_mode() || !input.is_empty() {
        let mut search_part = String::from("SEARCH:");
        if !input.is_empty() {
            search_part.push(' ');
            search_part.push_str(input);
        }
        if app.search_mode() {
            search_part.push('_');
        }
        parts.push(search_part);
    }

    parts.push(format!(
        "Showing {} of {}",
        shown,
        app.catalog().len()
    ));

    match app.playback().state() {
        PlaybackState::Idle => {}
        PlaybackState::Playing(m) => parts.push(format!("Playing: {m}")),
        PlaybackState::Paused(m) => parts.push(format!("Paused: {m}")),
    }

    parts.join(" • ")
}

fn detail_text(app: &App, record: &Record) -> Vec<Line<'static>> {
    let label = |l: &str| Span::styled(format!("{l}: "), Style::default().add_modifier(Modifier::BOLD));
    let row = |l: &str, v: &str| Line::from(vec![label(l), Span::raw(v.to_string())]);

    let mut lines = vec![
        row("Thaat", record.category()),
        row("Time of day", record.period()),
        row("Aroha", record.ascending_pattern()),
        row("Avaroha", record.descending_pattern()),
        row("Mood", record.mood()),
        row("Characteristics", record.notes()),
        Line::default(),
    ];

    match record.media_ref() {
        None => lines.push(Line::from(Span::styled(
            "Audio sample not available",
            Style::default().fg(Color::DarkGray).italic(),
        ))),
        Some(media_ref) => {
            let state = match app.detail_playback() {
                PlaybackState::Idle => "Stopped",
                PlaybackState::Playing(_) => "Playing",
                PlaybackState::Paused(_) => "Paused",
            };
            let length = app
                .detail_duration()
                .map(format_mmss)
                .unwrap_or_else(|| "--:--".to_string());
            lines.push(row("Audio", &format!("{media_ref} [{length}]")));
            lines.push(row("Playback", state));
        }
    }

    lines
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, display: &[&Record], ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" raga browser ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(filter_status(app, display.len()))
        .block(padded_block(" filters "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list
    if display.is_empty() {
        let empty = Paragraph::new("No ragas match the current filters")
            .alignment(Alignment::Center)
            .italic()
            .block(Block::default().borders(Borders::ALL).title(" ragas "));
        frame.render_widget(empty, chunks[2]);
    } else {
        // Only build ListItems for the visible window.
        let total = display.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = app.selected_position(display).unwrap_or(0);
        let (start, end, selected_in_visible) = visible_window(total, list_height, sel_pos);

        let term = app.search_term();
        let visible_items: Vec<ListItem> = display[start..end]
            .iter()
            .map(|r| list_item(r, term))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" ragas "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(selected_in_visible));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Detail overlay, kept inside the list area.
    if let Some(record) = app.detail_record() {
        let popup_area = centered_rect_sized(76, 14, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let title = format!(" {} (esc closes) ", record.name());
        let detail = Paragraph::new(detail_text(app, record))
            .block(padded_block(&title))
            .wrap(Wrap { trim: true });
        frame.render_widget(detail, popup_area);
    }

    let message = match app.status() {
        Some(s) => {
            let color = match s.level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Warning => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Paragraph::new(s.text.as_str()).style(Style::default().fg(color))
        }
        None => Paragraph::new(""),
    };
    frame.render_widget(message.block(padded_block(" status ")), chunks[3]);

    let controls = if app.is_detail_open() {
        DETAIL_CONTROLS
    } else if app.search_mode() {
        SEARCH_CONTROLS
    } else {
        LIST_CONTROLS
    };
    let footer = Paragraph::new(controls_text(controls))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

/// Blocking error screen shown when there is nothing to browse.
pub fn draw_fatal(frame: &mut Frame, message: &str) {
    let area = centered_rect_sized(72, 8, frame.area());
    let text = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
        Line::default(),
        Line::from("Press q to quit."),
    ];
    let par = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" raga browser "))
        .wrap(Wrap { trim: true });
    frame.render_widget(par, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::ScriptedBackend;
    use crate::audio::{MediaResolver, PlaybackController};
    use crate::catalog::load_records;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    fn app() -> App {
        let raw = vec![
            json!({
                "id": "yaman", "name": "Yaman", "thaat": "Kalyan", "timeOfDay": "Evening",
                "aroha": "N R G M D N S'", "avaroha": "S' N D P M G R S",
                "mood": "Devotional", "characteristics": "Tivra Ma", "audioFile": null
            }),
            json!({
                "id": "bhairav", "name": "Bhairav", "thaat": "Bhairav", "timeOfDay": "Morning",
                "aroha": "S r G M P d N S'", "avaroha": "S' N d P M G r S",
                "mood": "Serious", "characteristics": "Komal Re", "audioFile": "bhairav.mp3"
            }),
        ];
        let catalog = load_records(&raw).unwrap().catalog;
        let playback = PlaybackController::new(Box::new(ScriptedBackend::new()));
        App::new(catalog, playback, MediaResolver::default(), &UiSettings::default())
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let display = app.display();
        terminal
            .draw(|f| draw(f, app, &display, &UiSettings::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn fatal_screen_shows_message_and_quit_hint() {
        let err = load_records(&[json!({ "id": "x" })]).unwrap_err();
        let message = format!("Could not load ragas: {err}");

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| draw_fatal(f, &message)).unwrap();
        let out: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(out.contains("no valid ragas in catalog (1 rejected)"));
        assert!(out.contains("Press q to quit."));
    }

    #[test]
    fn status_line_counts_the_given_projection() {
        let app = app();
        let all = app.display();
        assert!(filter_status(&app, all.len()).contains("Showing 2 of 2"));
        assert!(filter_status(&app, 0).contains("Showing 0 of 2"));
    }

    #[test]
    fn visible_window_centers_selection() {
        assert_eq!(visible_window(5, 10, 3), (0, 5, 3));
        assert_eq!(visible_window(100, 10, 50), (45, 55, 5));
        assert_eq!(visible_window(100, 10, 98), (90, 100, 8));
        assert_eq!(visible_window(100, 10, 2), (0, 10, 2));
    }

    #[test]
    fn format_mmss_pads() {
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
    }

    #[test]
    fn list_shows_names_and_filters() {
        let out = render(&app());
        assert!(out.contains("Yaman"));
        assert!(out.contains("Kalyan · Evening"));
        assert!(out.contains("THAAT: All"));
        assert!(out.contains("Showing 2 of 2"));
    }

    #[test]
    fn empty_projection_shows_message() {
        let mut app = app();
        app.push_search_char('z');
        app.submit_search();
        assert!(render(&app).contains("No ragas match"));
    }

    #[test]
    fn detail_without_media_says_so() {
        let mut app = app();
        app.open_detail("yaman");
        let out = render(&app);
        assert!(out.contains("Audio sample not available"));
        assert!(out.contains("Tivra Ma"));
    }

    #[test]
    fn detail_with_media_shows_transport_state() {
        let mut app = app();
        app.open_detail("bhairav");
        app.play_preview();
        let out = render(&app);
        assert!(out.contains("bhairav.mp3"));
        assert!(out.contains("Playback: Playing"));
        assert!(out.contains("[p] play"));
    }
}
