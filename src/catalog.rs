//! Catalog store: the validated, read-only set of raga records.
//!
//! Raw input is validated once here; everything downstream works with the
//! `Record` type and never re-checks field presence.

mod dataset;
mod error;
mod load;
mod model;

pub use dataset::builtin;
pub use error::{CatalogError, RecordError};
pub use load::{DocumentFormat, load_from_path, load_records, parse_document};
pub use model::*;

#[cfg(test)]
mod tests;
