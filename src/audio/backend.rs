use std::time::Duration;

use super::types::{AcquireRequest, BackendError};

/// The resource side of playback: loads, pauses and releases one track.
///
/// Acquisition is asynchronous; the backend answers each request with exactly one
/// `Completion` on the request's `done` channel, tagged with the request token.
pub trait MediaBackend: Send {
    /// Start loading `request.media_ref`, replacing anything currently loaded.
    fn acquire(&mut self, request: AcquireRequest);

    /// Pause the loaded track, if any.
    fn pause(&mut self);

    /// Stop the loaded track and free it.
    fn release(&mut self) -> Result<(), BackendError>;

    /// Tear the backend down, fading out anything still audible.
    fn shutdown(&mut self, _fade_out: Duration) {}
}
