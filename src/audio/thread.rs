//! The rodio-backed audio thread.
//!
//! The UI side only talks to it through `AudioCmd` messages; every `Load` is
//! answered with one `Completion` carrying the request token.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::config::AudioSettings;

use super::backend::MediaBackend;
use super::sink::{create_sink, open_source};
use super::source::MediaResolver;
use super::types::{AcquireRequest, AudioCmd, BackendError, Completion, PlaybackError};

pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    resolver: MediaResolver,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    pub fn spawn(settings: &AudioSettings, resolver: MediaResolver) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let volume = settings.volume;
        let join = thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || run_audio_thread(rx, volume))
            .map_err(|e| warn!(error = %e, "failed to spawn audio thread"))
            .ok();

        Self {
            tx,
            resolver,
            join,
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), BackendError> {
        self.tx.send(cmd).map_err(|_| BackendError::Disconnected)
    }
}

impl MediaBackend for RodioBackend {
    fn acquire(&mut self, request: AcquireRequest) {
        let AcquireRequest {
            token,
            media_ref,
            done,
        } = request;
        let path = self.resolver.resolve(&media_ref);
        let cmd = AudioCmd::Load {
            token,
            media_ref: media_ref.clone(),
            path,
            done: done.clone(),
        };
        if self.send(cmd).is_err() {
            let _ = done.send(Completion {
                token,
                outcome: Err(PlaybackError::PlaybackStartRejected {
                    media_ref,
                    reason: BackendError::Disconnected.to_string(),
                }),
            });
        }
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn release(&mut self) -> Result<(), BackendError> {
        self.send(AudioCmd::Release)
    }

    fn shutdown(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

fn run_audio_thread(rx: Receiver<AudioCmd>, volume: f32) {
    // Opened on first use so a machine without audio output can still browse.
    let mut stream: Option<OutputStream> = None;
    let mut sink: Option<Sink> = None;

    while let Ok(cmd) = rx.recv() {
        match cmd {
            AudioCmd::Load {
                token,
                media_ref,
                path,
                done,
            } => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                let outcome = start(&mut stream, &media_ref, &path, volume).map(|s| {
                    sink = Some(s);
                });
                debug!(%token, ok = outcome.is_ok(), path = %path.display(), "load finished");
                let _ = done.send(Completion { token, outcome });
            }
            AudioCmd::Pause => {
                if let Some(ref s) = sink {
                    s.pause();
                }
            }
            AudioCmd::Release => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
            }
            AudioCmd::Quit { fade_out_ms } => {
                if let Some(s) = sink.take() {
                    if !s.is_paused() {
                        fade_out_sink(&s, volume, fade_out_ms);
                    }
                    s.stop();
                }
                break;
            }
        }
    }
}

fn start(
    stream: &mut Option<OutputStream>,
    media_ref: &str,
    path: &Path,
    volume: f32,
) -> Result<Sink, PlaybackError> {
    let source = open_source(path, media_ref)?;

    let out = match stream.take() {
        Some(s) => s,
        None => {
            let mut s = OutputStreamBuilder::open_default_stream().map_err(|e| {
                PlaybackError::PlaybackStartRejected {
                    media_ref: media_ref.to_string(),
                    reason: format!("no audio output device: {e}"),
                }
            })?;
            // rodio logs to stderr when OutputStream is dropped, which would corrupt the TUI.
            s.log_on_drop(false);
            s
        }
    };

    let sink = create_sink(&out, source, volume);
    sink.play();
    *stream = Some(out);
    Ok(sink)
}

fn fade_out_sink(sink: &Sink, volume: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(volume * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
