//! Application model: `App` and the transient `StatusMessage`.
//!
//! The `App` struct owns the catalog, the user's filter and search input, the
//! list cursor, the open detail and the playback controller. The UI renders
//! from it on every frame; it never caches the projected list.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{MediaResolver, PlaybackController, PlaybackEvent, PlaybackState, read_duration};
use crate::catalog::{Catalog, Field, Record};
use crate::config::UiSettings;
use crate::view::{FilterSelection, project};

/// Severity of a status message; the UI colors them differently.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A message shown in the status line until `expires_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub expires_at: Instant,
}

/// The main application model.
pub struct App {
    catalog: Catalog,
    categories: Vec<String>,
    periods: Vec<String>,

    selection: FilterSelection,
    search_input: String,
    search_term: String,
    search_mode: bool,
    search_deadline: Option<Instant>,
    search_debounce: Duration,

    /// Id of the record under the cursor.
    selected: Option<String>,
    detail: Option<String>,
    detail_duration: Option<Duration>,

    playback: PlaybackController,
    resolver: MediaResolver,

    status: Option<StatusMessage>,
    status_timeout: Duration,
}

impl App {
    /// Create a new `App` over `catalog`, cursor on the first displayed record.
    pub fn new(
        catalog: Catalog,
        playback: PlaybackController,
        resolver: MediaResolver,
        ui: &UiSettings,
    ) -> Self {
        let categories = catalog.list_distinct_values(Field::Category);
        let periods = catalog.list_distinct_values(Field::Period);

        let mut app = Self {
            catalog,
            categories,
            periods,
            selection: FilterSelection::default(),
            search_input: String::new(),
            search_term: String::new(),
            search_mode: false,
            search_deadline: None,
            search_debounce: Duration::from_millis(ui.search_debounce_ms),
            selected: None,
            detail: None,
            detail_duration: None,
            playback,
            resolver,
            status: None,
            status_timeout: Duration::from_millis(ui.status_timeout_ms),
        };
        app.ensure_selected_visible();
        app
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Filter options for `field`, sorted and unique.
    pub fn options(&self, field: Field) -> &[String] {
        match field {
            Field::Category => &self.categories,
            Field::Period => &self.periods,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// What the user has typed into the search box.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// The term the list is currently filtered by (lags `search_input` while debouncing).
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_mode(&self) -> bool {
        self.search_mode
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// The records to show, in display order.
    pub fn display(&self) -> Vec<&Record> {
        project(
            self.catalog.records(),
            Some(&self.selection),
            &self.search_term,
        )
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Position of the cursor inside `display`.
    pub fn selected_position(&self, display: &[&Record]) -> Option<usize> {
        let id = self.selected_id()?;
        display.iter().position(|r| r.id() == id)
    }

    // --- Filters ---

    /// Step the selection for `field` through `None -> values... -> None`.
    pub fn cycle_filter(&mut self, field: Field, forward: bool) {
        let options = self.options(field);
        let pos = self
            .selection
            .get(field)
            .and_then(|v| options.iter().position(|o| o == v));
        let next = match (pos, forward) {
            (None, true) => options.first(),
            (None, false) => options.last(),
            (Some(p), true) => options.get(p + 1),
            (Some(0), false) => None,
            (Some(p), false) => options.get(p - 1),
        }
        .cloned();

        debug!(?field, value = ?next, "filter changed");
        self.selection.set(field, next);
        self.ensure_selected_visible();
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
        self.ensure_selected_visible();
    }

    /// Back to the initial view: no filters, no search, detail closed.
    pub fn reset_state(&mut self) {
        self.close_detail();
        self.selection.clear();
        self.clear_search();
        self.selected = None;
        self.ensure_selected_visible();
        info!("view reset");
    }

    // --- Search ---

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    /// Append a character to the search input; the term follows after the debounce.
    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.schedule_search();
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.schedule_search();
    }

    /// Apply the typed input now and leave search mode.
    pub fn submit_search(&mut self) {
        self.apply_search();
        self.search_mode = false;
    }

    /// Clear both input and term and leave search mode.
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_mode = false;
        self.apply_search();
    }

    fn schedule_search(&mut self) {
        if self.search_debounce.is_zero() {
            self.apply_search();
        } else {
            self.search_deadline = Some(Instant::now() + self.search_debounce);
        }
    }

    fn apply_search(&mut self) {
        self.search_deadline = None;
        if self.search_term != self.search_input {
            self.search_term = self.search_input.clone();
            self.ensure_selected_visible();
        }
    }

    // --- Cursor ---

    /// Move to the next displayed record, wrapping around.
    pub fn next(&mut self) {
        let display = self.display();
        if display.is_empty() {
            return;
        }
        let next = match self.selected_position(&display) {
            Some(p) => display[(p + 1) % display.len()],
            None => display[0],
        };
        self.selected = Some(next.id().to_string());
    }

    /// Move to the previous displayed record, wrapping around.
    pub fn prev(&mut self) {
        let display = self.display();
        if display.is_empty() {
            return;
        }
        let prev = match self.selected_position(&display) {
            Some(0) | None => display[display.len() - 1],
            Some(p) => display[p - 1],
        };
        self.selected = Some(prev.id().to_string());
    }

    pub fn select_first(&mut self) {
        self.selected = self.display().first().map(|r| r.id().to_string());
    }

    pub fn select_last(&mut self) {
        self.selected = self.display().last().map(|r| r.id().to_string());
    }

    /// Keep the cursor on a displayed record, moving it to the first one if needed.
    fn ensure_selected_visible(&mut self) {
        let display = self.display();
        if self.selected_position(&display).is_none() {
            self.selected = display.first().map(|r| r.id().to_string());
        }
    }

    // --- Detail ---

    pub fn is_detail_open(&self) -> bool {
        self.detail.is_some()
    }

    /// The record shown in the detail overlay.
    pub fn detail_record(&self) -> Option<&Record> {
        self.detail
            .as_deref()
            .and_then(|id| self.catalog.get_by_id(id))
    }

    /// Length of the detail record's preview, when its file could be read.
    pub fn detail_duration(&self) -> Option<Duration> {
        self.detail_duration
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected.clone() {
            self.open_detail(&id);
        }
    }

    /// Open the overlay for `id`. An unknown id leaves the overlay closed.
    pub fn open_detail(&mut self, id: &str) -> bool {
        let Some(record) = self.catalog.get_by_id(id) else {
            warn!(id, "detail requested for unknown record");
            self.set_status("Raga not found", StatusLevel::Warning);
            return false;
        };

        let duration = record
            .media_ref()
            .and_then(|m| read_duration(&self.resolver.resolve(m)));
        self.detail_duration = duration;
        self.detail = Some(id.to_string());
        debug!(id, "detail opened");
        true
    }

    /// Close the overlay. Playback is always stopped, whichever record it belongs to.
    pub fn close_detail(&mut self) {
        self.playback.stop();
        if self.detail.take().is_some() {
            debug!("detail closed");
        }
        self.detail_duration = None;
    }

    // --- Playback ---

    /// Play the detail record's preview. Records without one do nothing.
    pub fn play_preview(&mut self) {
        let Some(media_ref) = self
            .detail_record()
            .and_then(Record::media_ref)
            .map(str::to_string)
        else {
            return;
        };

        if let Err(e) = self.playback.play(Some(&media_ref)) {
            self.set_status(e.to_string(), StatusLevel::Error);
        }
    }

    pub fn pause_preview(&mut self) {
        if self.detail_has_media() {
            self.playback.pause();
        }
    }

    pub fn stop_preview(&mut self) {
        if self.detail_has_media() {
            self.playback.stop();
        }
    }

    /// Playback state as far as the open detail is concerned.
    pub fn detail_playback(&self) -> PlaybackState {
        let state = self.playback.state();
        let ours = self.detail_record().and_then(Record::media_ref);
        if ours.is_some() && state.media_ref() == ours {
            state
        } else {
            PlaybackState::Idle
        }
    }

    fn detail_has_media(&self) -> bool {
        self.detail_record().and_then(Record::media_ref).is_some()
    }

    /// Apply playback completions; failures become error messages.
    pub fn poll_playback(&mut self) {
        for event in self.playback.poll() {
            match event {
                PlaybackEvent::Started { media_ref, .. } => {
                    self.set_status(format!("Playing {media_ref}"), StatusLevel::Info);
                }
                PlaybackEvent::Failed { error, .. } => {
                    self.set_status(error.to_string(), StatusLevel::Error);
                }
            }
        }
    }

    pub fn shutdown(&mut self, fade_out: Duration) {
        self.playback.shutdown(fade_out);
    }

    // --- Time ---

    /// Advance timers: apply a due search term and expire the status message.
    pub fn tick(&mut self, now: Instant) {
        if self.search_deadline.is_some_and(|d| d <= now) {
            self.apply_search();
        }
        if self.status.as_ref().is_some_and(|s| s.expires_at <= now) {
            self.status = None;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            expires_at: Instant::now() + self.status_timeout,
        });
    }
}
