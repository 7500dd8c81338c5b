//! Read-only access to the record catalog.
//!
//! The responder never owns or mutates records. It only needs to walk the
//! catalog in its natural order and to look a record up by name, which is what
//! the [`Catalog`] trait captures. [`MemoryCatalog`] is the in-process
//! implementation used by callers that load their records up front.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ResponderError, Result};
use crate::record::Record;

/// Read-only record source consumed by the responder.
///
/// Implementations that are shared between threads must make concurrent reads
/// safe on their own; the responder takes no locks.
pub trait Catalog {
    /// Iterates over `(name, record)` pairs in the catalog's natural order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Record)> + '_>;

    /// Looks up a record by name.
    fn lookup(&self, name: &str) -> Option<&Record>;

    /// Returns true when the catalog holds no records.
    fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Record)> + '_> {
        (**self).iter()
    }

    fn lookup(&self, name: &str) -> Option<&Record> {
        (**self).lookup(name)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// Insertion-ordered, in-memory catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCatalog {
    records: IndexMap<String, Record>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a record. A replaced record keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, record: Record) {
        self.records.insert(name.into(), record);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parses a catalog from a JSON object of `name -> { field -> value }`.
    ///
    /// String values are taken as-is, arrays are joined with `", "` and other
    /// scalars keep their JSON text. `null` fields and unknown field names are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON, or if the top level or a
    /// record entry is not a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(entries) = value else {
            return Err(ResponderError::InvalidCatalog(
                "top level must be an object of records".to_string(),
            ));
        };

        let mut catalog = Self::new();
        for (name, entry) in entries {
            let Value::Object(fields) = entry else {
                return Err(ResponderError::InvalidCatalog(format!(
                    "record {name} must be an object of fields"
                )));
            };
            let record = Record::from_pairs(
                fields
                    .into_iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(field, value)| (field, flatten_value(value))),
            );
            catalog.insert(name, record);
        }
        Ok(catalog)
    }

    /// Reads and parses a JSON catalog file. See [`MemoryCatalog::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid catalog.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl Catalog for MemoryCatalog {
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Record)> + '_> {
        Box::new(self.records.iter().map(|(name, record)| (name.as_str(), record)))
    }

    fn lookup(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    fn is_empty(&self) -> bool {
        MemoryCatalog::is_empty(self)
    }
}

impl<N: Into<String>> FromIterator<(N, Record)> for MemoryCatalog {
    fn from_iter<T: IntoIterator<Item = (N, Record)>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for (name, record) in iter {
            catalog.insert(name, record);
        }
        catalog
    }
}

fn flatten_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(flatten_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordField;

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let catalog: MemoryCatalog = [
            ("zeta", Record::new()),
            ("alpha", Record::new()),
            ("mid", Record::new()),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_lookup() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert("a", Record::new().with(RecordField::Title, "A"));

        assert_eq!(
            catalog.lookup("a").and_then(|r| r.get(RecordField::Title)),
            Some("A")
        );
        assert!(catalog.lookup("b").is_none());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(MemoryCatalog::new().is_empty());
        assert!(Catalog::is_empty(&&MemoryCatalog::new()));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "tosca.yaml": {
                "display_name": "Recipe A",
                "date": "2023-03-01",
                "childs": ["b.yaml", "c.yaml"],
                "version": 2,
                "unknown": "dropped"
            }
        }"#;

        let catalog = MemoryCatalog::from_json_str(json).unwrap();
        let record = catalog.lookup("tosca.yaml").unwrap();
        assert_eq!(record.get(RecordField::DisplayName), Some("Recipe A"));
        assert_eq!(record.get(RecordField::Childs), Some("b.yaml, c.yaml"));
        assert_eq!(record.get(RecordField::Version), Some("2"));
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_from_json_str_skips_null_fields() {
        let json = r#"{
            "tosca.yaml": {
                "display_name": null,
                "creator": "Alice",
                "tag": ["cloud", null, "hpc"]
            }
        }"#;

        let catalog = MemoryCatalog::from_json_str(json).unwrap();
        let record = catalog.lookup("tosca.yaml").unwrap();
        assert!(!record.contains(RecordField::DisplayName));
        assert_eq!(record.get(RecordField::Tag), Some("cloud, hpc"));
        assert_eq!(record.len(), 2);

        let xml = crate::crosswalk::dublin_core::record_to_oai_dc_xml(record).unwrap();
        assert!(!xml.contains("dc:title"));
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        let err = MemoryCatalog::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, ResponderError::InvalidCatalog(_)));

        let err = MemoryCatalog::from_json_str(r#"{"a": "b"}"#).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidCatalog(_)));
    }

    #[test]
    fn test_from_json_str_invalid_json() {
        let err = MemoryCatalog::from_json_str("{").unwrap_err();
        assert!(matches!(err, ResponderError::Json(_)));
    }
}
