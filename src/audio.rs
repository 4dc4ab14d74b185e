//! Audio preview playback.
//!
//! `PlaybackController` is the single owner of the playback slot; it drives a
//! `MediaBackend` (in production the rodio audio thread) and filters its
//! asynchronous answers by session token.

mod backend;
mod controller;
mod sink;
mod source;
mod thread;
mod types;

pub use backend::MediaBackend;
pub use controller::PlaybackController;
pub use source::{MediaResolver, read_duration};
pub use thread::RodioBackend;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing;
