//! Single-slot playback state machine.
//!
//! At most one session exists. `play` always tears the previous session down
//! before starting a new one, and every asynchronous completion is checked
//! against the current session token so late answers for superseded sessions
//! are dropped.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, warn};

use super::backend::MediaBackend;
use super::types::{
    AcquireRequest, Completion, PlaybackError, PlaybackEvent, PlaybackState, SessionToken,
};

struct Session {
    token: SessionToken,
    media_ref: String,
    paused: bool,
}

pub struct PlaybackController {
    backend: Box<dyn MediaBackend>,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
    session: Option<Session>,
    next_token: u64,
}

impl PlaybackController {
    pub fn new(backend: Box<dyn MediaBackend>) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel::<Completion>();
        Self {
            backend,
            completions_tx,
            completions_rx,
            session: None,
            next_token: 1,
        }
    }

    /// Start a new session for `media_ref`, superseding any current one.
    ///
    /// The returned token identifies the acquisition; its outcome is reported
    /// later by [`PlaybackController::poll`].
    pub fn play(&mut self, media_ref: Option<&str>) -> Result<SessionToken, PlaybackError> {
        self.stop();

        let media_ref = media_ref
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(PlaybackError::NoMediaReference)
            .inspect_err(|e| warn!(error = %e, "play rejected"))?;

        let token = SessionToken(self.next_token);
        self.next_token += 1;

        self.session = Some(Session {
            token,
            media_ref: media_ref.to_string(),
            paused: false,
        });
        debug!(%token, media_ref, "playback session started");

        self.backend.acquire(AcquireRequest {
            token,
            media_ref: media_ref.to_string(),
            done: self.completions_tx.clone(),
        });
        Ok(token)
    }

    /// Pause a playing session. Returns false when nothing is playing.
    pub fn pause(&mut self) -> bool {
        match self.session.as_mut() {
            Some(s) if !s.paused => {
                s.paused = true;
                self.backend.pause();
                debug!(token = %s.token, "playback paused");
                true
            }
            _ => false,
        }
    }

    /// End the current session, if any. Safe to call at any time.
    ///
    /// The session is dropped even when the backend fails to release it.
    pub fn stop(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if let Err(e) = self.backend.release() {
            warn!(token = %session.token, error = %e, "release failed; session dropped anyway");
        }
        debug!(token = %session.token, "playback stopped");
        true
    }

    /// True only while a session is audibly playing (not paused).
    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.paused)
    }

    pub fn state(&self) -> PlaybackState {
        match &self.session {
            None => PlaybackState::Idle,
            Some(s) if s.paused => PlaybackState::Paused(s.media_ref.clone()),
            Some(s) => PlaybackState::Playing(s.media_ref.clone()),
        }
    }

    pub fn current_token(&self) -> Option<SessionToken> {
        self.session.as_ref().map(|s| s.token)
    }

    pub fn media_ref(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.media_ref.as_str())
    }

    /// Apply all completions received so far and return the ones that mattered.
    pub fn poll(&mut self) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        while let Ok(c) = self.completions_rx.try_recv() {
            if let Some(ev) = self.apply(c) {
                events.push(ev);
            }
        }
        events
    }

    /// Apply one completion. Completions for superseded sessions yield `None`.
    pub fn apply(&mut self, completion: Completion) -> Option<PlaybackEvent> {
        let Completion { token, outcome } = completion;
        if self.current_token() != Some(token) {
            debug!(%token, current = ?self.current_token(), "discarding stale completion");
            return None;
        }

        match outcome {
            Ok(()) => {
                let media_ref = self.media_ref().unwrap_or_default().to_string();
                debug!(%token, %media_ref, "playback acquired");
                Some(PlaybackEvent::Started { token, media_ref })
            }
            Err(error) => {
                warn!(%token, error = %error, "playback failed");
                self.session = None;
                Some(PlaybackEvent::Failed { token, error })
            }
        }
    }

    /// Stop playback and shut the backend down.
    pub fn shutdown(&mut self, fade_out: Duration) {
        self.session = None;
        self.backend.shutdown(fade_out);
    }
}
