use super::error::CatalogError;
use super::load::{DocumentFormat, load_records, parse_document};
use super::model::LoadedCatalog;

const BUILTIN_RAGAS: &str = include_str!("../../data/ragas.json");

/// Load the dataset shipped with the binary.
pub fn builtin() -> Result<LoadedCatalog, CatalogError> {
    let raw = parse_document(BUILTIN_RAGAS, DocumentFormat::Json)?;
    load_records(&raw)
}
