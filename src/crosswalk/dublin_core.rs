//! Simple Dublin Core (`oai_dc`) crosswalk.
//!
//! Every mapped field becomes one unqualified `dc:*` element inside an
//! `oai_dc:dc` container:
//!
//! | Record field | Element |
//! |--------------|---------|
//! | `display_name` | `dc:title` |
//! | `creator` | `dc:creator` |
//! | `date` | `dc:date` |
//! | `resource_type` | `dc:type` |
//! | `identifier` | `dc:identifier` |
//! | `rights` | `dc:rights` |
//! | `publisher` | `dc:publisher` |
//! | `version` | `dc:version` |
//! | `tag` | `dc:subject` |
//! | `childs` | `dc:relation` (always empty) |
//! | `format` | `dc:format` |
//! | `description` | `dc:description` |
//!
//! `title`, `subject` and `related_identifier` are not part of this crosswalk.
//! The `childs` value is never serialized: a record with children gets a single
//! empty `dc:relation`.

use super::namespaces;
use super::{ElementRule, ElementShape, Vocabulary};
use crate::error::Result;
use crate::record::{Record, RecordField};

const RULES: &[ElementRule] = &[
    ElementRule::text(RecordField::DisplayName, "dc:title"),
    ElementRule::text(RecordField::Creator, "dc:creator"),
    ElementRule::text(RecordField::Date, "dc:date"),
    ElementRule::text(RecordField::ResourceType, "dc:type"),
    ElementRule::text(RecordField::Identifier, "dc:identifier"),
    ElementRule::text(RecordField::Rights, "dc:rights"),
    ElementRule::text(RecordField::Publisher, "dc:publisher"),
    ElementRule::text(RecordField::Version, "dc:version"),
    ElementRule::text(RecordField::Tag, "dc:subject"),
    ElementRule::text(RecordField::Childs, "dc:relation").with_shape(ElementShape::Empty),
    ElementRule::text(RecordField::Format, "dc:format"),
    ElementRule::text(RecordField::Description, "dc:description"),
];

/// The `oai_dc` vocabulary.
pub const OAI_DC: Vocabulary = Vocabulary {
    container: "oai_dc:dc",
    container_attributes: &[
        ("xmlns:oai_dc", namespaces::OAI_DC),
        ("xmlns:dc", namespaces::DC),
        ("xmlns:xsi", namespaces::XSI),
        ("xsi:schemaLocation", namespaces::OAI_DC_SCHEMA_LOCATION),
    ],
    rules: RULES,
};

/// Convert a record directly to an `oai_dc:dc` XML fragment.
///
/// # Errors
///
/// Returns an error if the XML cannot be written.
pub fn record_to_oai_dc_xml(record: &Record) -> Result<String> {
    OAI_DC.to_xml(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_names(record: &Record) -> Vec<&'static str> {
        OAI_DC.matches(record).map(|(rule, _)| rule.element).collect()
    }

    #[test]
    fn test_three_field_record() {
        let record = Record::new()
            .with(RecordField::Date, "2023-03-01")
            .with(RecordField::Creator, "Alice")
            .with(RecordField::DisplayName, "Recipe A");

        assert_eq!(element_names(&record), ["dc:title", "dc:creator", "dc:date"]);

        let xml = record_to_oai_dc_xml(&record).unwrap();
        let title = xml.find("<dc:title>Recipe A</dc:title>").unwrap();
        let creator = xml.find("<dc:creator>Alice</dc:creator>").unwrap();
        let date = xml.find("<dc:date>2023-03-01</dc:date>").unwrap();
        assert!(title < creator && creator < date);
    }

    #[test]
    fn test_container_namespaces() {
        let xml = record_to_oai_dc_xml(&Record::new()).unwrap();
        assert!(xml.starts_with("<oai_dc:dc "));
        assert!(xml.contains(r#"xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/""#));
        assert!(xml.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#));
        assert!(xml.contains("xsi:schemaLocation="));
        assert!(xml.trim_end().ends_with("</oai_dc:dc>"));
    }

    #[test]
    fn test_tag_maps_to_subject() {
        let record = Record::new()
            .with(RecordField::Tag, "kubernetes")
            .with(RecordField::Subject, "ignored");
        let xml = record_to_oai_dc_xml(&record).unwrap();
        assert!(xml.contains("<dc:subject>kubernetes</dc:subject>"));
        assert!(!xml.contains("ignored"));
    }

    #[test]
    fn test_title_field_is_not_mapped() {
        let record = Record::new().with(RecordField::Title, "Only title");
        assert!(element_names(&record).is_empty());
    }

    #[test]
    fn test_childs_value_is_dropped() {
        let record = Record::new().with(RecordField::Childs, "a.yaml, b.yaml");
        let xml = record_to_oai_dc_xml(&record).unwrap();
        assert!(xml.contains("<dc:relation/>"));
        assert!(!xml.contains("a.yaml"));
    }

    #[test]
    fn test_full_record_order() {
        let record = Record::from_pairs([
            ("description", "d"),
            ("format", "f"),
            ("childs", "c"),
            ("tag", "t"),
            ("version", "v"),
            ("publisher", "p"),
            ("rights", "r"),
            ("identifier", "i"),
            ("resource_type", "rt"),
            ("date", "2023-03-01"),
            ("creator", "cr"),
            ("display_name", "dn"),
        ]);

        assert_eq!(
            element_names(&record),
            [
                "dc:title",
                "dc:creator",
                "dc:date",
                "dc:type",
                "dc:identifier",
                "dc:rights",
                "dc:publisher",
                "dc:version",
                "dc:subject",
                "dc:relation",
                "dc:format",
                "dc:description",
            ]
        );
    }

    #[test]
    fn test_xml_escaping() {
        let record = Record::new().with(RecordField::DisplayName, "Title with <brackets> & ampersand");
        let xml = record_to_oai_dc_xml(&record).unwrap();
        assert!(xml.contains("&lt;"));
        assert!(xml.contains("&gt;"));
        assert!(xml.contains("&amp;"));
    }
}
