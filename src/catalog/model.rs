//! Catalog model types: `Record`, `Field` and `Catalog`.

use std::collections::{BTreeSet, HashMap};

use serde_json::{Map, Value};

use super::error::RecordError;

/// One raga in the catalog.
///
/// Fields are private; a `Record` can only be built through validation, so every
/// text field is non-empty and trimmed and `media_ref` is either absent or non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: String,
    name: String,
    category: String,
    period: String,
    ascending_pattern: String,
    descending_pattern: String,
    mood: String,
    notes: String,
    media_ref: Option<String>,
}

impl Record {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The thaat (parent scale) of the raga.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The traditional time of day for performance.
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Aroha.
    pub fn ascending_pattern(&self) -> &str {
        &self.ascending_pattern
    }

    /// Avaroha.
    pub fn descending_pattern(&self) -> &str {
        &self.descending_pattern
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Reference to a preview track, if the record has one.
    pub fn media_ref(&self) -> Option<&str> {
        self.media_ref.as_deref()
    }

    /// Value of a filterable attribute.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Category => &self.category,
            Field::Period => &self.period,
        }
    }
}

/// Accepted input keys per field: the canonical name first, then aliases used by
/// older datasets.
const ID: (&str, &[&str]) = ("id", &[]);
const NAME: (&str, &[&str]) = ("name", &[]);
const CATEGORY: (&str, &[&str]) = ("category", &["thaat"]);
const PERIOD: (&str, &[&str]) = ("period", &["timeOfDay", "time_of_day"]);
const ASCENDING: (&str, &[&str]) = ("ascendingPattern", &["aroha", "ascending_pattern"]);
const DESCENDING: (&str, &[&str]) = ("descendingPattern", &["avaroha", "descending_pattern"]);
const MOOD: (&str, &[&str]) = ("mood", &[]);
const NOTES: (&str, &[&str]) = ("notes", &["characteristics"]);
const MEDIA_REF: (&str, &[&str]) = ("mediaRef", &["audioFile", "media_ref"]);

fn lookup<'a>(
    obj: &'a Map<String, Value>,
    (key, aliases): (&'static str, &[&str]),
) -> Option<&'a Value> {
    std::iter::once(key)
        .chain(aliases.iter().copied())
        .find_map(|k| obj.get(k))
}

fn required(
    obj: &Map<String, Value>,
    keys: (&'static str, &[&str]),
) -> Result<String, RecordError> {
    let field = keys.0;
    match lookup(obj, keys) {
        None | Some(Value::Null) => Err(RecordError::MissingField(field)),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Err(RecordError::EmptyField(field))
            } else {
                Ok(s.to_string())
            }
        }
        Some(other) => Err(RecordError::WrongType {
            field,
            reason: format!("expected string, found {}", kind(other)),
        }),
    }
}

fn optional(
    obj: &Map<String, Value>,
    keys: (&'static str, &[&str]),
) -> Result<Option<String>, RecordError> {
    match lookup(obj, keys) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Err(RecordError::EmptyMediaRef)
            } else {
                Ok(Some(s.to_string()))
            }
        }
        Some(other) => Err(RecordError::WrongType {
            field: keys.0,
            reason: format!("expected string or null, found {}", kind(other)),
        }),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&Value> for Record {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let obj = value.as_object().ok_or(RecordError::NotAnObject)?;
        Ok(Self {
            id: required(obj, ID)?,
            name: required(obj, NAME)?,
            category: required(obj, CATEGORY)?,
            period: required(obj, PERIOD)?,
            ascending_pattern: required(obj, ASCENDING)?,
            descending_pattern: required(obj, DESCENDING)?,
            mood: required(obj, MOOD)?,
            notes: required(obj, NOTES)?,
            media_ref: optional(obj, MEDIA_REF)?,
        })
    }
}

/// The two filterable attributes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Category,
    Period,
}

/// Immutable collection of valid records with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Record>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-validated records with unique ids.
    pub(super) fn from_records(records: Vec<Record>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self { records, by_id }
    }

    /// All records, in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Look up a record by id. A miss is a normal outcome.
    pub fn get_by_id(&self, id: &str) -> Option<&Record> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Sorted unique values of `field`, used to populate filter options.
    pub fn list_distinct_values(&self, field: Field) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.field(field))
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Result of loading raw input: the valid catalog plus how many items were dropped.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub rejected: usize,
}
