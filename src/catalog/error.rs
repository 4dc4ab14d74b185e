use std::path::PathBuf;

use thiserror::Error;

/// Why a single raw item was excluded from the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,

    #[error("field `{field}` has the wrong type: {reason}")]
    WrongType { field: &'static str, reason: String },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("media reference is present but empty")]
    EmptyMediaRef,

    #[error("duplicate id `{0}`")]
    DuplicateId(String),
}

/// Failures while building a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No valid record survived validation. The catalog is unusable.
    #[error("no valid ragas in catalog ({rejected} rejected)")]
    Empty { rejected: usize },

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("catalog document must be a list of ragas or contain a `ragas` list")]
    Shape,
}
