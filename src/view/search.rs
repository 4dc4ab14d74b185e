use tracing::trace;

use crate::catalog::Record;

/// Simple case folding: per-character lowercase mapping.
///
/// Used for every case-insensitive comparison so matching and highlighting agree.
pub fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Trim and fold a raw search term. Blank input yields an empty term.
pub fn normalize_term(term: &str) -> String {
    fold(term.trim())
}

/// Keep records whose name contains `term`, case-insensitively.
///
/// A blank term returns the input unchanged.
pub fn search<'a, I>(records: I, term: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let term = normalize_term(term);
    if term.is_empty() {
        return records.into_iter().collect();
    }

    let out: Vec<&Record> = records
        .into_iter()
        .filter(|r| fold(r.name()).contains(&term))
        .collect();
    trace!(term = %term, matched = out.len(), "search applied");
    out
}

/// `text` split around the first case-insensitive occurrence of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlighted<'a> {
    /// No match (or a blank term): the text is returned untouched.
    Plain(&'a str),
    /// `matched` keeps the original casing of `text`.
    Match {
        before: &'a str,
        matched: &'a str,
        after: &'a str,
    },
}

#[cfg(test)]
impl Highlighted<'_> {
    /// The original text with all markup stripped.
    pub fn to_plain(&self) -> String {
        match *self {
            Highlighted::Plain(t) => t.to_string(),
            Highlighted::Match {
                before,
                matched,
                after,
            } => format!("{before}{matched}{after}"),
        }
    }

    /// Render with `open`/`close` around the matched region.
    pub fn to_markup(&self, open: &str, close: &str) -> String {
        match *self {
            Highlighted::Plain(t) => t.to_string(),
            Highlighted::Match {
                before,
                matched,
                after,
            } => format!("{before}{open}{matched}{close}{after}"),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Highlighted::Match { .. })
    }
}

/// Locate the first occurrence of `term` in `text`, ignoring case.
pub fn highlight<'a>(text: &'a str, term: &str) -> Highlighted<'a> {
    let term: Vec<char> = normalize_term(term).chars().collect();
    if term.is_empty() {
        return Highlighted::Plain(text);
    }

    // Folded characters of `text`, each tagged with the byte offset of the
    // original character it came from.
    let mut folded: Vec<char> = Vec::with_capacity(text.len());
    let mut origin: Vec<usize> = Vec::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        for lc in ch.to_lowercase() {
            folded.push(lc);
            origin.push(offset);
        }
    }

    let Some(k) = folded.windows(term.len()).position(|w| w == term.as_slice()) else {
        return Highlighted::Plain(text);
    };

    // Widen to whole original characters: one of them may fold to several.
    let start = origin[k];
    let last = origin[k + term.len() - 1];
    let end = last + text[last..].chars().next().map_or(0, char::len_utf8);

    Highlighted::Match {
        before: &text[..start],
        matched: &text[start..end],
        after: &text[end..],
    }
}
