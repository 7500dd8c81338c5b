//! Metadata crosswalks from catalog records to OAI-PMH metadata formats.
//!
//! Each supported `metadataPrefix` is described by a [`Vocabulary`]: the container
//! element with its namespace declarations, plus an ordered table of
//! [`ElementRule`]s. Writing a record walks the table, not the record, so the
//! output order is fixed by the vocabulary regardless of how the record was
//! built. Fields without a rule are ignored; rules whose field is absent emit
//! nothing.
//!
//! | Prefix | Module | Container |
//! |--------|--------|-----------|
//! | `oai_dc` | [`dublin_core`] | `oai_dc:dc` with `dc:*` children |
//! | `oai_openaire` | [`openaire`] | `oai_dc:dc` with DataCite/OpenAIRE children |
//!
//! # Examples
//!
//! ```ignore
//! use oaipmh::{Record, RecordField};
//! use oaipmh::crosswalk::MetadataPrefix;
//!
//! let record = Record::new()
//!     .with(RecordField::DisplayName, "Recipe A")
//!     .with(RecordField::Creator, "Alice");
//!
//! let xml = MetadataPrefix::OaiDc.vocabulary().to_xml(&record)?;
//! assert!(xml.contains("<dc:title>Recipe A</dc:title>"));
//! # Ok::<(), oaipmh::ResponderError>(())
//! ```

pub mod dublin_core;
pub mod namespaces;
pub mod openaire;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OaiError, Result};
use crate::record::{Record, RecordField};
use crate::xml::{Attr, XmlWriter};

/// A metadata format the crate knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataPrefix {
    /// `oai_dc`: simple Dublin Core.
    OaiDc,
    /// `oai_openaire`: OpenAIRE guidelines, DataCite based.
    OaiOpenaire,
}

impl MetadataPrefix {
    /// All known prefixes.
    pub const ALL: [Self; 2] = [Self::OaiDc, Self::OaiOpenaire];

    /// The prefix as harvesters send it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OaiDc => "oai_dc",
            Self::OaiOpenaire => "oai_openaire",
        }
    }

    /// The crosswalk table for this format.
    #[must_use]
    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            Self::OaiDc => &dublin_core::OAI_DC,
            Self::OaiOpenaire => &openaire::OAI_OPENAIRE,
        }
    }
}

impl fmt::Display for MetadataPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataPrefix {
    type Err = OaiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|prefix| prefix.as_str() == s)
            .ok_or(OaiError::CannotDisseminateFormat)
    }
}

/// How a rule turns a field value into XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    /// `<element>value</element>`
    Text,
    /// `<element><child>value</child></element>`
    Nested(&'static str),
    /// `<element/>`; the value is not written.
    Empty,
}

/// One row of a crosswalk table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRule {
    /// Source field.
    pub field: RecordField,
    /// Qualified element name.
    pub element: &'static str,
    /// Fixed attributes written on the element.
    pub attributes: &'static [Attr<'static>],
    /// Element shape.
    pub shape: ElementShape,
}

impl ElementRule {
    /// A plain text element with no attributes.
    #[must_use]
    pub const fn text(field: RecordField, element: &'static str) -> Self {
        Self {
            field,
            element,
            attributes: &[],
            shape: ElementShape::Text,
        }
    }

    /// Adds fixed attributes.
    #[must_use]
    pub const fn with_attributes(mut self, attributes: &'static [Attr<'static>]) -> Self {
        self.attributes = attributes;
        self
    }

    /// Changes the element shape.
    #[must_use]
    pub const fn with_shape(mut self, shape: ElementShape) -> Self {
        self.shape = shape;
        self
    }

    /// Writes the element for `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML cannot be written.
    pub fn write(&self, xml: &mut XmlWriter, value: &str) -> Result<()> {
        match self.shape {
            ElementShape::Text => xml.text_element(self.element, self.attributes, value),
            ElementShape::Nested(child) => {
                xml.start(self.element, self.attributes)?;
                xml.text_element(child, &[], value)?;
                xml.end(self.element)
            },
            ElementShape::Empty => xml.empty_element(self.element, self.attributes),
        }
    }
}

/// A metadata format: container element plus its crosswalk table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    /// Qualified name of the container element.
    pub container: &'static str,
    /// Namespace declarations and `xsi:schemaLocation` on the container.
    pub container_attributes: &'static [Attr<'static>],
    /// Element rules, in output order.
    pub rules: &'static [ElementRule],
}

impl Vocabulary {
    /// Rules that apply to `record`, paired with the field value, in output order.
    pub fn matches<'r>(
        &self,
        record: &'r Record,
    ) -> impl Iterator<Item = (&'static ElementRule, &'r str)> {
        self.rules
            .iter()
            .filter_map(move |rule| record.get(rule.field).map(|value| (rule, value)))
    }

    /// Writes the container and one element per matching rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML cannot be written.
    pub fn write(&self, xml: &mut XmlWriter, record: &Record) -> Result<()> {
        xml.start(self.container, self.container_attributes)?;
        for (rule, value) in self.matches(record) {
            rule.write(xml, value)?;
        }
        xml.end(self.container)
    }

    /// Serializes `record` as a standalone fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML cannot be written.
    pub fn to_xml(&self, record: &Record) -> Result<String> {
        let mut xml = XmlWriter::new();
        self.write(&mut xml, record)?;
        xml.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_parse() {
        assert_eq!("oai_dc".parse::<MetadataPrefix>(), Ok(MetadataPrefix::OaiDc));
        assert_eq!(
            "oai_openaire".parse::<MetadataPrefix>(),
            Ok(MetadataPrefix::OaiOpenaire)
        );
        assert_eq!(
            "OAI_DC".parse::<MetadataPrefix>(),
            Err(OaiError::CannotDisseminateFormat)
        );
    }

    #[test]
    fn test_prefix_serde() {
        let json = serde_json::to_string(&MetadataPrefix::OaiOpenaire).unwrap();
        assert_eq!(json, "\"oai_openaire\"");
    }

    #[test]
    fn test_each_field_has_at_most_one_rule() {
        for prefix in MetadataPrefix::ALL {
            let rules = prefix.vocabulary().rules;
            for (i, rule) in rules.iter().enumerate() {
                assert!(
                    rules[i + 1..].iter().all(|other| other.field != rule.field),
                    "{prefix}: {} mapped twice",
                    rule.field
                );
            }
        }
    }

    #[test]
    fn test_nested_rule() {
        let rule = ElementRule::text(RecordField::Creator, "a:creator")
            .with_shape(ElementShape::Nested("a:creatorName"));
        let mut xml = XmlWriter::new();
        rule.write(&mut xml, "Alice").unwrap();

        let out = xml.into_string().unwrap();
        assert_eq!(out, "<a:creator>\n  <a:creatorName>Alice</a:creatorName>\n</a:creator>");
    }

    #[test]
    fn test_empty_rule_drops_value() {
        let rule =
            ElementRule::text(RecordField::Childs, "dc:relation").with_shape(ElementShape::Empty);
        let mut xml = XmlWriter::new();
        rule.write(&mut xml, "child.yaml").unwrap();

        assert_eq!(xml.into_string().unwrap(), "<dc:relation/>");
    }
}
