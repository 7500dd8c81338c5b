//! OAI-PMH response building.
//!
//! [`Responder`] turns one request into one complete response document. Every
//! document has the same envelope (`responseDate`, echoed `request`) followed by
//! exactly one payload element: either the verb's success element or a single
//! `<error>`. Validation runs before any catalog work; record selection finishes
//! before anything is written, so a payload is never half-populated.
//!
//! # Examples
//!
//! ```ignore
//! use oaipmh::{MemoryCatalog, Record, RecordField, Request, Responder, RepositoryConfig, Verb};
//!
//! let responder = Responder::new(RepositoryConfig::default());
//! let mut catalog = MemoryCatalog::new();
//! catalog.insert("recipe.yaml", Record::new().with(RecordField::DisplayName, "Recipe"));
//!
//! let request = Request::new(Verb::ListRecords).with_metadata_prefix("oai_dc");
//! let xml = responder.respond(&request, &catalog)?;
//! assert!(xml.contains("<dc:title>Recipe</dc:title>"));
//! # Ok::<(), oaipmh::ResponderError>(())
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, instrument, warn};

use crate::catalog::Catalog;
use crate::config::{DateFilter, RepositoryConfig};
use crate::crosswalk::namespaces::{OAI_PMH, OAI_PMH_SCHEMA_LOCATION, XSI};
use crate::crosswalk::dublin_core::OAI_DC;
use crate::crosswalk::MetadataPrefix;
use crate::error::{OaiError, Result};
use crate::identifier::IdentifierScheme;
use crate::record::{Record, RecordField};
use crate::request::Request;
use crate::validation::{parse_date, RequestValidator, ValidatedRequest};
use crate::xml::{Attr, XmlWriter};

const RESPONSE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A selected catalog entry: record name and record.
type Entry<'c> = (&'c str, &'c Record);

/// Fully selected payload, ready to be written.
enum Payload<'r, 'c> {
    Identify,
    GetRecord {
        identifier: &'r str,
        record: &'c Record,
        prefix: MetadataPrefix,
    },
    ListIdentifiers(Vec<Entry<'c>>),
    ListRecords {
        prefix: MetadataPrefix,
        records: Vec<Entry<'c>>,
    },
    ListMetadataFormats,
}

/// Answers OAI-PMH requests for one repository.
///
/// Holds only immutable configuration, so a single responder can serve any
/// number of threads.
#[derive(Debug, Clone)]
pub struct Responder {
    config: RepositoryConfig,
    identifiers: IdentifierScheme,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(RepositoryConfig::default())
    }
}

impl Responder {
    /// Creates a responder without checking the configuration.
    #[must_use]
    pub fn new(config: RepositoryConfig) -> Self {
        let identifiers = IdentifierScheme::new(config.identifier_base.clone());
        Self {
            config,
            identifiers,
        }
    }

    /// Creates a responder after [`RepositoryConfig::validate`] succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::InvalidConfig`](crate::ResponderError::InvalidConfig)
    /// when the configuration is unusable.
    pub fn try_new(config: RepositoryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// The repository configuration.
    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// The identifier scheme derived from the configuration.
    #[must_use]
    pub const fn identifiers(&self) -> &IdentifierScheme {
        &self.identifiers
    }

    /// Answers `request`, stamping the response with the current UTC time.
    ///
    /// Protocol errors are part of the returned document, not an `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the XML document cannot be written.
    pub fn respond<C: Catalog + ?Sized>(&self, request: &Request, catalog: &C) -> Result<String> {
        self.respond_at(request, catalog, Utc::now())
    }

    /// Like [`Responder::respond`], with an explicit response timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error only if the XML document cannot be written.
    #[instrument(skip_all, fields(verb = %request.verb()))]
    pub fn respond_at<C: Catalog + ?Sized>(
        &self,
        request: &Request,
        catalog: &C,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let outcome = RequestValidator::new(&self.config, &self.identifiers)
            .validate(request, catalog)
            .and_then(|validated| self.select(validated, catalog));

        match &outcome {
            Ok(_) => debug!("request accepted"),
            Err(error) => debug!(code = error.code(), "request rejected"),
        }
        self.render(now, &request.echo_attributes(), outcome)
    }

    /// Parses decoded query pairs and answers the resulting request.
    ///
    /// A request that cannot be parsed yields a `badVerb` or `badArgument`
    /// document whose `request` element carries no attributes.
    ///
    /// # Errors
    ///
    /// Returns an error only if the XML document cannot be written.
    pub fn respond_to_pairs<I, K, V, C>(&self, pairs: I, catalog: &C) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
        C: Catalog + ?Sized,
    {
        self.respond_to_pairs_at(pairs, catalog, Utc::now())
    }

    /// Like [`Responder::respond_to_pairs`], with an explicit response timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error only if the XML document cannot be written.
    pub fn respond_to_pairs_at<I, K, V, C>(
        &self,
        pairs: I,
        catalog: &C,
        now: DateTime<Utc>,
    ) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
        C: Catalog + ?Sized,
    {
        match Request::from_pairs(pairs) {
            Ok(request) => self.respond_at(&request, catalog, now),
            Err(error) => {
                debug!(code = error.code(), "malformed request");
                self.render(now, &[], Err(error))
            },
        }
    }

    /// Resolves the records a validated request will emit.
    fn select<'r, 'c, C: Catalog + ?Sized>(
        &self,
        validated: ValidatedRequest<'r, 'c>,
        catalog: &'c C,
    ) -> std::result::Result<Payload<'r, 'c>, OaiError> {
        let payload = match validated {
            ValidatedRequest::Identify => Payload::Identify,
            ValidatedRequest::ListMetadataFormats => Payload::ListMetadataFormats,
            ValidatedRequest::GetRecord {
                identifier,
                record,
                prefix,
            } => Payload::GetRecord {
                identifier,
                record,
                prefix,
            },
            ValidatedRequest::ListIdentifiers { from, until, .. } => {
                Payload::ListIdentifiers(self.select_records(catalog, from, until)?)
            },
            ValidatedRequest::ListRecords {
                prefix,
                from,
                until,
            } => Payload::ListRecords {
                prefix,
                records: self.select_records(catalog, from, until)?,
            },
        };
        Ok(payload)
    }

    fn select_records<'c, C: Catalog + ?Sized>(
        &self,
        catalog: &'c C,
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> std::result::Result<Vec<Entry<'c>>, OaiError> {
        let bounded = from.is_some() || until.is_some();
        let records: Vec<Entry<'c>> = match self.config.date_filter {
            DateFilter::Apply if bounded => catalog
                .iter()
                .filter(|(_, record)| within(record, from, until))
                .collect(),
            DateFilter::Ignore if bounded => {
                debug!("from/until accepted but not applied");
                catalog.iter().collect()
            },
            _ => catalog.iter().collect(),
        };

        if records.is_empty() {
            return Err(OaiError::NoRecordsMatch);
        }
        Ok(records)
    }

    fn render(
        &self,
        now: DateTime<Utc>,
        echo: &[Attr<'_>],
        outcome: std::result::Result<Payload<'_, '_>, OaiError>,
    ) -> Result<String> {
        let mut xml = XmlWriter::new();
        xml.declaration()?;
        xml.start(
            "OAI-PMH",
            &[
                ("xmlns", OAI_PMH),
                ("xmlns:xsi", XSI),
                ("xsi:schemaLocation", OAI_PMH_SCHEMA_LOCATION),
            ],
        )?;
        xml.text_element(
            "responseDate",
            &[],
            &now.format(RESPONSE_DATE_FORMAT).to_string(),
        )?;
        xml.text_element("request", echo, &self.config.base_url)?;

        match outcome {
            Ok(payload) => self.write_payload(&mut xml, &payload)?,
            Err(error) => xml.text_element("error", &[("code", error.code())], error.message())?,
        }

        xml.end("OAI-PMH")?;
        let document = xml.into_string()?;
        debug!(bytes = document.len(), "response written");
        Ok(document)
    }

    fn write_payload(&self, xml: &mut XmlWriter, payload: &Payload<'_, '_>) -> Result<()> {
        match payload {
            Payload::Identify => self.write_identify(xml),
            Payload::GetRecord {
                identifier,
                record,
                prefix,
            } => {
                xml.start("GetRecord", &[])?;
                self.write_record(xml, identifier, record, Some(*prefix))?;
                xml.end("GetRecord")
            },
            Payload::ListIdentifiers(records) => {
                xml.start("ListIdentifiers", &[])?;
                for (name, record) in records {
                    self.write_record(xml, &self.identifiers.encode(name), record, None)?;
                }
                xml.end("ListIdentifiers")
            },
            Payload::ListRecords { prefix, records } => {
                xml.start("ListRecords", &[])?;
                for (name, record) in records {
                    self.write_record(xml, &self.identifiers.encode(name), record, Some(*prefix))?;
                }
                xml.end("ListRecords")
            },
            Payload::ListMetadataFormats => {
                xml.start("ListMetadataFormats", &[])?;
                for format in &self.config.metadata_formats {
                    xml.start("metadataFormat", &[])?;
                    xml.text_element("metadataPrefix", &[], format.prefix.as_str())?;
                    xml.text_element("schema", &[], &format.schema)?;
                    xml.text_element("metadataNamespace", &[], &format.namespace)?;
                    xml.end("metadataFormat")?;
                }
                xml.end("ListMetadataFormats")
            },
        }
    }

    fn write_identify(&self, xml: &mut XmlWriter) -> Result<()> {
        let config = &self.config;
        xml.start("Identify", &[])?;
        xml.text_element("repositoryName", &[], &config.repository_name)?;
        xml.text_element("baseURL", &[], &config.base_url)?;
        xml.text_element("protocolVersion", &[], &config.protocol_version)?;
        xml.text_element("earliestDatestamp", &[], &config.earliest_datestamp)?;
        xml.text_element("deletedRecord", &[], &config.deleted_records.to_string())?;
        xml.text_element("granularity", &[], &config.granularity)?;
        xml.text_element("adminEmail", &[], &config.admin_email)?;
        if !config.description.is_empty() {
            // `description` must hold a single element from another namespace.
            let description =
                Record::new().with(RecordField::Description, config.description.as_str());
            xml.start("description", &[])?;
            OAI_DC.write(xml, &description)?;
            xml.end("description")?;
        }
        xml.end("Identify")
    }

    /// Writes `record/header` and, when a format is given, `record/metadata`.
    fn write_record(
        &self,
        xml: &mut XmlWriter,
        identifier: &str,
        record: &Record,
        prefix: Option<MetadataPrefix>,
    ) -> Result<()> {
        xml.start("record", &[])?;
        xml.start("header", &[])?;
        xml.text_element("identifier", &[], identifier)?;
        xml.text_element("datestamp", &[], self.datestamp(identifier, record))?;
        xml.end("header")?;
        if let Some(prefix) = prefix {
            xml.start("metadata", &[])?;
            prefix.vocabulary().write(xml, record)?;
            xml.end("metadata")?;
        }
        xml.end("record")
    }

    /// The record's `date` when it is a valid datestamp, else the earliest datestamp.
    fn datestamp<'a>(&'a self, identifier: &str, record: &'a Record) -> &'a str {
        match record.get(RecordField::Date) {
            Some(date) if parse_date(date).is_some() => date,
            Some(date) => {
                warn!(identifier, date, "record date is not a YYYY-MM-DD datestamp");
                &self.config.earliest_datestamp
            },
            None => &self.config.earliest_datestamp,
        }
    }
}

fn within(record: &Record, from: Option<NaiveDate>, until: Option<NaiveDate>) -> bool {
    let Some(date) = record.get(RecordField::Date).and_then(parse_date) else {
        return false;
    };
    from.map_or(true, |from| date >= from) && until.map_or(true, |until| date <= until)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::request::Verb;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 5).unwrap()
    }

    fn catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.insert(
            "early.yaml",
            Record::new()
                .with(RecordField::DisplayName, "Early")
                .with(RecordField::Date, "2023-03-01"),
        );
        catalog.insert(
            "late.yaml",
            Record::new()
                .with(RecordField::DisplayName, "Late")
                .with(RecordField::Date, "2024-01-15"),
        );
        catalog.insert("undated.yaml", Record::new().with(RecordField::DisplayName, "Undated"));
        catalog
    }

    #[test]
    fn test_responder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Responder>();
    }

    #[test]
    fn test_response_date_format() {
        let responder = Responder::default();
        let xml = responder
            .respond_at(&Request::new(Verb::Identify), &catalog(), fixed_now())
            .unwrap();
        assert!(xml.contains("<responseDate>2024-05-17T09:30:05Z</responseDate>"));
    }

    #[test]
    fn test_datestamp_falls_back_to_earliest() {
        let responder = Responder::default();
        let record = Record::new().with(RecordField::Date, "2023-02-29");
        assert_eq!(responder.datestamp("id", &record), "2023-03-01");
        assert_eq!(responder.datestamp("id", &Record::new()), "2023-03-01");

        let record = Record::new().with(RecordField::Date, "2024-01-15");
        assert_eq!(responder.datestamp("id", &record), "2024-01-15");
    }

    #[test]
    fn test_within_bounds() {
        let record = Record::new().with(RecordField::Date, "2023-06-01");
        let d = |s| parse_date(s);
        assert!(within(&record, None, None));
        assert!(within(&record, d("2023-06-01"), d("2023-06-01")));
        assert!(!within(&record, d("2023-06-02"), None));
        assert!(!within(&record, None, d("2023-05-31")));
        assert!(!within(&Record::new(), None, None));
    }

    #[test]
    fn test_ignored_date_filter_returns_everything() {
        let responder = Responder::default();
        let request = Request::new(Verb::ListIdentifiers)
            .with_metadata_prefix("oai_dc")
            .with_from("2030-01-01");
        let xml = responder.respond_at(&request, &catalog(), fixed_now()).unwrap();
        assert_eq!(xml.matches("<header>").count(), 3);
    }

    #[test]
    fn test_applied_date_filter() {
        let responder =
            Responder::new(RepositoryConfig::new().with_date_filter(DateFilter::Apply));
        let request = Request::new(Verb::ListRecords)
            .with_metadata_prefix("oai_dc")
            .with_from("2024-01-01");
        let xml = responder.respond_at(&request, &catalog(), fixed_now()).unwrap();
        assert_eq!(xml.matches("<record>").count(), 1);
        assert!(xml.contains("<dc:title>Late</dc:title>"));
    }

    #[test]
    fn test_applied_date_filter_without_bounds_keeps_undated() {
        let responder =
            Responder::new(RepositoryConfig::new().with_date_filter(DateFilter::Apply));
        let request = Request::new(Verb::ListIdentifiers).with_metadata_prefix("oai_dc");
        let xml = responder.respond_at(&request, &catalog(), fixed_now()).unwrap();
        assert_eq!(xml.matches("<header>").count(), 3);
    }

    #[test]
    fn test_applied_date_filter_empty_selection() {
        let responder =
            Responder::new(RepositoryConfig::new().with_date_filter(DateFilter::Apply));
        let request = Request::new(Verb::ListRecords)
            .with_metadata_prefix("oai_dc")
            .with_until("2000-01-01");
        let xml = responder.respond_at(&request, &catalog(), fixed_now()).unwrap();
        assert!(xml.contains(r#"<error code="noRecordsMatch">"#));
        assert!(!xml.contains("<ListRecords"));
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let config = RepositoryConfig::new().with_base_url("");
        assert!(Responder::try_new(config).is_err());
    }

    #[test]
    fn test_identify_description() {
        let xml = Responder::default()
            .respond_at(&Request::new(Verb::Identify), &catalog(), fixed_now())
            .unwrap();
        assert!(xml.contains(
            "<dc:description>Repositorio del Migue con recetas TOSCA.</dc:description>"
        ));
        let start = xml.find("<description>").unwrap();
        let end = xml.find("</description>").unwrap();
        let block = &xml[start..end];
        assert!(block.contains("<oai_dc:dc "));
        assert!(block.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#));

        let responder = Responder::new(RepositoryConfig::new().with_description(""));
        let xml = responder
            .respond_at(&Request::new(Verb::Identify), &catalog(), fixed_now())
            .unwrap();
        assert!(!xml.contains("<description>"));
    }
}
