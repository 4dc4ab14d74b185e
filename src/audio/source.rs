//! Mapping media references to files on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;

/// Resolves a record's media reference against a base directory.
#[derive(Debug, Clone, Default)]
pub struct MediaResolver {
    base: Option<PathBuf>,
}

impl MediaResolver {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Absolute references are used as-is; relative ones are joined onto the base.
    pub fn resolve(&self, media_ref: &str) -> PathBuf {
        let p = Path::new(media_ref);
        match &self.base {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }
}

/// Read the track length from the file's properties, if it can be parsed.
pub fn read_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
