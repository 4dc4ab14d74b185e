use tracing::trace;

use crate::catalog::{Field, Record};

/// Current filter state: an optional exact-match constraint per attribute.
///
/// Empty strings are treated as "no constraint" and normalized away on set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    category: Option<String>,
    period: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FilterSelection {
    #[cfg(test)]
    pub fn new(category: Option<String>, period: Option<String>) -> Self {
        Self {
            category: normalize(category),
            period: normalize(period),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn period(&self) -> Option<&str> {
        self.period.as_deref()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Category => self.category(),
            Field::Period => self.period(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        let value = normalize(value);
        match field {
            Field::Category => self.category = value,
            Field::Period => self.period = value,
        }
    }

    pub fn clear(&mut self) {
        self.category = None;
        self.period = None;
    }

    /// True when no attribute is constrained.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.period.is_none()
    }

    /// Whether `record` satisfies every set constraint (case-sensitive equality).
    pub fn matches(&self, record: &Record) -> bool {
        [Field::Category, Field::Period]
            .into_iter()
            .all(|f| self.get(f).is_none_or(|want| record.field(f) == want))
    }
}

/// Keep the records that satisfy `selection`, preserving input order.
///
/// A `None` selection is fully unconstrained.
pub fn apply_filter<'a, I>(records: I, selection: Option<&FilterSelection>) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let out: Vec<&Record> = match selection {
        None => records.into_iter().collect(),
        Some(sel) => records.into_iter().filter(|r| sel.matches(r)).collect(),
    };
    trace!(matched = out.len(), ?selection, "filter applied");
    out
}
