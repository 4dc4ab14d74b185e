//! A scripted backend for driving the controller in tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::backend::MediaBackend;
use super::types::{AcquireRequest, BackendError, Completion, PlaybackError, SessionToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Acquire(SessionToken, String),
    Pause,
    Release,
    Shutdown,
}

#[derive(Default)]
struct Shared {
    calls: Vec<Call>,
    pending: Vec<AcquireRequest>,
    fail_release: bool,
}

/// Records every call and holds acquisitions until the test completes them.
#[derive(Clone, Default)]
pub(crate) struct ScriptedBackend {
    shared: Arc<Mutex<Shared>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.shared.lock().unwrap().calls.clone()
    }

    pub(crate) fn set_fail_release(&self, fail: bool) {
        self.shared.lock().unwrap().fail_release = fail;
    }

    /// Answer the pending acquisition for `token`.
    pub(crate) fn complete(&self, token: SessionToken, outcome: Result<(), PlaybackError>) {
        let mut shared = self.shared.lock().unwrap();
        let pos = shared
            .pending
            .iter()
            .position(|r| r.token == token)
            .expect("no pending acquisition for token");
        let req = shared.pending.remove(pos);
        req.done.send(Completion { token, outcome }).unwrap();
    }
}

impl MediaBackend for ScriptedBackend {
    fn acquire(&mut self, request: AcquireRequest) {
        let mut shared = self.shared.lock().unwrap();
        shared
            .calls
            .push(Call::Acquire(request.token, request.media_ref.clone()));
        shared.pending.push(request);
    }

    fn pause(&mut self) {
        self.shared.lock().unwrap().calls.push(Call::Pause);
    }

    fn release(&mut self) -> Result<(), BackendError> {
        let mut shared = self.shared.lock().unwrap();
        shared.calls.push(Call::Release);
        if shared.fail_release {
            Err(BackendError::Disconnected)
        } else {
            Ok(())
        }
    }

    fn shutdown(&mut self, _fade_out: Duration) {
        self.shared.lock().unwrap().calls.push(Call::Shutdown);
    }
}
