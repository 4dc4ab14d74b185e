//! Audio-related small types.
//!
//! This module defines the observable playback state, session tokens, the
//! failure taxonomy and the messages exchanged with a media backend.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use thiserror::Error;

/// Observable state of the playback controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// A session for this media reference is playing (or being acquired).
    Playing(String),
    /// The session still holds its resource but does not advance.
    Paused(String),
}

impl PlaybackState {
    pub fn media_ref(&self) -> Option<&str> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing(r) | PlaybackState::Paused(r) => Some(r),
        }
    }
}

/// Identifies one playback session. Tokens are never reused within a controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(pub(crate) u64);

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a play request failed. Every variant leaves the controller idle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("No audio sample available")]
    NoMediaReference,

    #[error("Could not load audio sample {media_ref}: {reason}")]
    ResourceLoadFailure { media_ref: String, reason: String },

    #[error("Audio playback could not start: {reason}")]
    PlaybackStartRejected { media_ref: String, reason: String },
}

/// Failures talking to the backend itself (as opposed to a play attempt).
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("audio thread is no longer running")]
    Disconnected,
}

/// Sent by a backend once an acquisition attempt has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub token: SessionToken,
    pub outcome: Result<(), PlaybackError>,
}

/// A request to load and start `media_ref`; the backend reports back on `done`.
#[derive(Debug, Clone)]
pub struct AcquireRequest {
    pub token: SessionToken,
    pub media_ref: String,
    pub done: Sender<Completion>,
}

/// Outcome of an acquisition that belongs to the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Started {
        token: SessionToken,
        media_ref: String,
    },
    Failed {
        token: SessionToken,
        error: PlaybackError,
    },
}

/// Commands understood by the audio thread.
#[derive(Debug)]
pub enum AudioCmd {
    /// Drop whatever is loaded, then load and start the resolved file.
    Load {
        token: SessionToken,
        media_ref: String,
        path: PathBuf,
        done: Sender<Completion>,
    },
    /// Pause the loaded sink, keeping it.
    Pause,
    /// Stop and drop the loaded sink.
    Release,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
