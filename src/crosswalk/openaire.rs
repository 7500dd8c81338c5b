//! OpenAIRE (`oai_openaire`) crosswalk.
//!
//! Produces DataCite and OpenAIRE elements inside the `oai_dc:dc` container.
//! Several elements carry fixed attributes that classify every item in the
//! repository as openly accessible software:
//!
//! | Record field | Element | Fixed attributes |
//! |--------------|---------|------------------|
//! | `title` | `datacite:title` | |
//! | `creator` | `datacite:creator/datacite:creatorName` | |
//! | `date` | `datacite:date` | `dateType="Issued"` |
//! | `resource_type` | `oaire:resourceType` | `resourceTypeGeneral="software"`, COAR software `uri` |
//! | `identifier` | `datacite:identifier` | `identifierType="URN"` |
//! | `rights` | `datacite:rights` | COAR open access `rightsURI` |
//! | `publisher` | `dc:publisher` | |
//! | `version` | `dc:version` | |
//! | `subject` | `oaire:subject` | |
//! | `related_identifier` | `datacite:relatedIdentifier` | `relatedIdentifierType="DOI"`, `relationType="isContinuedBy"` |
//! | `format` | `dc:format` | |

use super::namespaces;
use super::{ElementRule, ElementShape, Vocabulary};
use crate::error::Result;
use crate::record::{Record, RecordField};

const RULES: &[ElementRule] = &[
    ElementRule::text(RecordField::Title, "datacite:title"),
    ElementRule::text(RecordField::Creator, "datacite:creator")
        .with_shape(ElementShape::Nested("datacite:creatorName")),
    ElementRule::text(RecordField::Date, "datacite:date").with_attributes(&[("dateType", "Issued")]),
    ElementRule::text(RecordField::ResourceType, "oaire:resourceType").with_attributes(&[
        ("resourceTypeGeneral", "software"),
        ("uri", namespaces::COAR_SOFTWARE),
    ]),
    ElementRule::text(RecordField::Identifier, "datacite:identifier")
        .with_attributes(&[("identifierType", "URN")]),
    ElementRule::text(RecordField::Rights, "datacite:rights")
        .with_attributes(&[("rightsURI", namespaces::COAR_OPEN_ACCESS)]),
    ElementRule::text(RecordField::Publisher, "dc:publisher"),
    ElementRule::text(RecordField::Version, "dc:version"),
    ElementRule::text(RecordField::Subject, "oaire:subject"),
    ElementRule::text(RecordField::RelatedIdentifier, "datacite:relatedIdentifier").with_attributes(&[
        ("relatedIdentifierType", "DOI"),
        ("relationType", "isContinuedBy"),
    ]),
    ElementRule::text(RecordField::Format, "dc:format"),
];

/// The `oai_openaire` vocabulary.
pub const OAI_OPENAIRE: Vocabulary = Vocabulary {
    container: "oai_dc:dc",
    container_attributes: &[
        ("xmlns:oai_dc", namespaces::OAI_DC),
        ("xmlns:dc", namespaces::DC),
        ("xmlns:datacite", namespaces::DATACITE),
        ("xmlns:oaire", namespaces::OAIRE),
        ("xmlns:xsi", namespaces::XSI),
        ("xsi:schemaLocation", namespaces::OAI_DC_SCHEMA_LOCATION),
    ],
    rules: RULES,
};

/// Convert a record directly to an OpenAIRE XML fragment.
///
/// # Errors
///
/// Returns an error if the XML cannot be written.
pub fn record_to_openaire_xml(record: &Record) -> Result<String> {
    OAI_OPENAIRE.to_xml(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_nested_creator() {
        let record = Record::new()
            .with(RecordField::Title, "Recipe A")
            .with(RecordField::Creator, "Alice");

        let xml = record_to_openaire_xml(&record).unwrap();
        assert!(xml.contains("<datacite:title>Recipe A</datacite:title>"));
        assert!(xml.contains(
            "<datacite:creator>\n    <datacite:creatorName>Alice</datacite:creatorName>\n  </datacite:creator>"
        ));
    }

    #[test]
    fn test_fixed_attributes() {
        let record = Record::from_pairs([
            ("date", "2023-03-01"),
            ("resource_type", "TOSCA template"),
            ("identifier", "urn:x"),
            ("rights", "open"),
            ("related_identifier", "10.5281/zenodo.1"),
        ]);

        let xml = record_to_openaire_xml(&record).unwrap();
        assert!(xml.contains(r#"<datacite:date dateType="Issued">2023-03-01</datacite:date>"#));
        assert!(xml.contains(
            r#"<oaire:resourceType resourceTypeGeneral="software" uri="http://purl.org/coar/resource_type/c_5ce6">TOSCA template</oaire:resourceType>"#
        ));
        assert!(xml.contains(r#"<datacite:identifier identifierType="URN">urn:x</datacite:identifier>"#));
        assert!(xml.contains(
            r#"<datacite:rights rightsURI="http://purl.org/coar/access_right/c_abf2">open</datacite:rights>"#
        ));
        assert!(xml.contains(
            r#"<datacite:relatedIdentifier relatedIdentifierType="DOI" relationType="isContinuedBy">10.5281/zenodo.1</datacite:relatedIdentifier>"#
        ));
    }

    #[test]
    fn test_dublin_core_only_fields_are_ignored() {
        let record = Record::new()
            .with(RecordField::DisplayName, "dn")
            .with(RecordField::Tag, "t")
            .with(RecordField::Childs, "c")
            .with(RecordField::Description, "d");

        assert_eq!(OAI_OPENAIRE.matches(&record).count(), 0);
    }

    #[test]
    fn test_container_declares_all_namespaces() {
        let xml = record_to_openaire_xml(&Record::new()).unwrap();
        for ns in ["xmlns:oai_dc=", "xmlns:dc=", "xmlns:datacite=", "xmlns:oaire=", "xmlns:xsi="] {
            assert!(xml.contains(ns), "missing {ns}");
        }
    }

    #[test]
    fn test_output_follows_table_order() {
        let record = Record::new()
            .with(RecordField::Format, "yaml")
            .with(RecordField::Subject, "cloud")
            .with(RecordField::Title, "T");

        let names: Vec<&str> = OAI_OPENAIRE.matches(&record).map(|(r, _)| r.element).collect();
        assert_eq!(names, ["datacite:title", "oaire:subject", "dc:format"]);
    }
}
