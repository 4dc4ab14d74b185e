use tracing::trace;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::catalog::Record;

use super::filter::{FilterSelection, apply_filter};
use super::search::{fold, search};

/// Sort key for names: base letters first (diacritics dropped, case folded),
/// then the folded name itself so `Abhogi` and `Ābhogi` still order consistently.
fn collation_key(name: &str) -> (String, String) {
    let base: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    (fold(&base), fold(name))
}

/// Stable ascending sort by name, ignoring case and diacritics at the first
/// level; equal names keep input order.
pub fn sort_by_name(mut records: Vec<&Record>) -> Vec<&Record> {
    records.sort_by_cached_key(|r| collation_key(r.name()));
    records
}

/// The displayed list: filter, then search, then sort by name.
pub fn project<'a, I>(
    records: I,
    selection: Option<&FilterSelection>,
    term: &str,
) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let filtered = apply_filter(records, selection);
    let found = search(filtered, term);
    let out = sort_by_name(found);
    trace!(displayed = out.len(), "projection computed");
    out
}
