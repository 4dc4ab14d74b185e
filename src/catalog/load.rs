use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use super::error::{CatalogError, RecordError};
use super::model::{Catalog, LoadedCatalog, Record};

/// Serialization format of a catalog document.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Validate raw items and build a catalog from the ones that pass.
///
/// Invalid items are dropped and counted. Fails only when nothing valid remains.
pub fn load_records(raw: &[Value]) -> Result<LoadedCatalog, CatalogError> {
    let mut records: Vec<Record> = Vec::with_capacity(raw.len());
    let mut rejected = 0usize;

    for (i, item) in raw.iter().enumerate() {
        let result = Record::try_from(item).and_then(|r| {
            if records.iter().any(|seen| seen.id() == r.id()) {
                Err(RecordError::DuplicateId(r.id().to_string()))
            } else {
                Ok(r)
            }
        });

        match result {
            Ok(r) => records.push(r),
            Err(e) => {
                warn!(index = i, error = %e, "rejecting catalog record");
                rejected += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(CatalogError::Empty { rejected });
    }

    let catalog = Catalog::from_records(records);
    info!(valid = catalog.len(), rejected, "catalog loaded");
    Ok(LoadedCatalog { catalog, rejected })
}

/// Parse a catalog document into its raw items.
///
/// Accepts a top-level list, or an object holding the list under `ragas`.
/// TOML documents must use the object form (`[[ragas]]`).
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Vec<Value>, CatalogError> {
    let doc: Value = match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?
        }
        DocumentFormat::Toml => {
            toml::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?
        }
    };

    match doc {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("ragas") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(CatalogError::Shape),
        },
        _ => Err(CatalogError::Shape),
    }
}

/// Read, parse and validate a catalog file.
pub fn load_from_path(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = parse_document(&text, DocumentFormat::from_path(path))?;
    load_records(&raw)
}
