//! Utilities for creating `rodio` sinks from resolved media files.
//!
//! Opening/decoding is kept separate from connecting to the output stream so the
//! two failure kinds stay distinguishable.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::types::PlaybackError;

pub(super) type FileSource = Decoder<BufReader<File>>;

/// Open and decode `path`. Any failure is a load failure for `media_ref`.
pub(super) fn open_source(path: &Path, media_ref: &str) -> Result<FileSource, PlaybackError> {
    let load_failure = |reason: String| PlaybackError::ResourceLoadFailure {
        media_ref: media_ref.to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| load_failure(format!("{}: {e}", path.display())))?;
    Decoder::new(BufReader::new(file)).map_err(|e| load_failure(format!("unsupported audio: {e}")))
}

/// Create a paused `Sink` on `stream` holding `source`.
pub(super) fn create_sink(stream: &OutputStream, source: FileSource, volume: f32) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    sink
}
