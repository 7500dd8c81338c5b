//! Catalog record structures.
//!
//! A [`Record`] is a flat set of descriptive fields, each holding a single string
//! value. Field names come from a fixed vocabulary ([`RecordField`]); names outside
//! that vocabulary are dropped when a record is built from untyped input.
//!
//! # Examples
//!
//! ```ignore
//! use oaipmh::{Record, RecordField};
//!
//! let record = Record::new()
//!     .with(RecordField::DisplayName, "Recipe A")
//!     .with(RecordField::Creator, "Alice");
//!
//! assert_eq!(record.get(RecordField::Creator), Some("Alice"));
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The fixed vocabulary of record field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// `title`
    Title,
    /// `display_name` - human-facing name, used as the Dublin Core title
    DisplayName,
    /// `creator`
    Creator,
    /// `date` - `YYYY-MM-DD` issue date
    Date,
    /// `resource_type`
    ResourceType,
    /// `identifier`
    Identifier,
    /// `rights`
    Rights,
    /// `publisher`
    Publisher,
    /// `version`
    Version,
    /// `subject`
    Subject,
    /// `tag` - keyword, used as the Dublin Core subject
    Tag,
    /// `related_identifier`
    RelatedIdentifier,
    /// `format`
    Format,
    /// `description`
    Description,
    /// `childs` - related child items
    Childs,
}

impl RecordField {
    /// Every field in the vocabulary.
    pub const ALL: [Self; 15] = [
        Self::Title,
        Self::DisplayName,
        Self::Creator,
        Self::Date,
        Self::ResourceType,
        Self::Identifier,
        Self::Rights,
        Self::Publisher,
        Self::Version,
        Self::Subject,
        Self::Tag,
        Self::RelatedIdentifier,
        Self::Format,
        Self::Description,
        Self::Childs,
    ];

    /// Returns the field's name as it appears in untyped catalog data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DisplayName => "display_name",
            Self::Creator => "creator",
            Self::Date => "date",
            Self::ResourceType => "resource_type",
            Self::Identifier => "identifier",
            Self::Rights => "rights",
            Self::Publisher => "publisher",
            Self::Version => "version",
            Self::Subject => "subject",
            Self::Tag => "tag",
            Self::RelatedIdentifier => "related_identifier",
            Self::Format => "format",
            Self::Description => "description",
            Self::Childs => "childs",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a field name is outside the record vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown record field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A catalog record: a flat mapping of [`RecordField`] to string value.
///
/// Insertion order is kept for inspection, but output order is always decided by
/// the crosswalk tables, never by the order fields were added here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<RecordField, String>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from untyped `(name, value)` pairs, dropping unknown names.
    ///
    /// A repeated name keeps the last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            if let Ok(field) = name.as_ref().parse::<RecordField>() {
                record.set(field, value);
            }
        }
        record
    }

    /// Sets a field value, replacing any previous value.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Builder-style variant of [`Record::set`].
    #[must_use]
    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Returns true when the field is present.
    #[must_use]
    pub fn contains(&self, field: RecordField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Iterates over present fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
