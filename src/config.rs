//! Repository configuration.
//!
//! [`RepositoryConfig`] carries everything the responder echoes about the
//! repository itself (the `Identify` block), the identifier base, and the list of
//! metadata formats it disseminates. It is built once and never mutated while
//! requests are being answered.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crosswalk::MetadataPrefix;
use crate::error::{ResponderError, Result};
use crate::validation::is_valid_date;

/// How the repository reports deleted records (`deletedRecord` in `Identify`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedRecordPolicy {
    /// Deletions are not tracked.
    #[default]
    No,
    /// Deletions are tracked, without a guarantee of persistence.
    Transient,
    /// Deletions are tracked permanently.
    Persistent,
}

impl fmt::Display for DeletedRecordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Transient => write!(f, "transient"),
            Self::Persistent => write!(f, "persistent"),
        }
    }
}

/// Whether `from`/`until` bounds restrict the records returned by the list verbs.
///
/// The bounds are always checked for syntax. With [`DateFilter::Ignore`] a valid
/// request still returns the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    /// Validate the bounds but return every record.
    #[default]
    Ignore,
    /// Keep only records whose `date` falls within the bounds (inclusive).
    Apply,
}

/// A metadata format the repository can disseminate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFormat {
    /// The `metadataPrefix` value harvesters ask for.
    pub prefix: MetadataPrefix,
    /// URL of the XML schema for the format.
    pub schema: String,
    /// XML namespace of the format.
    pub namespace: String,
}

impl MetadataFormat {
    /// The descriptor for simple Dublin Core.
    #[must_use]
    pub fn oai_dc() -> Self {
        Self {
            prefix: MetadataPrefix::OaiDc,
            schema: "http://www.openarchives.org/OAI/2.0/oai_dc.xsd".to_string(),
            namespace: "http://www.openarchives.org/OAI/2.0/oai_dc/".to_string(),
        }
    }

    /// The descriptor for the OpenAIRE/DataCite profile.
    #[must_use]
    pub fn oai_openaire() -> Self {
        Self {
            prefix: MetadataPrefix::OaiOpenaire,
            schema: "https://schema.datacite.org/meta/kernel-4.3/metadata.xsd".to_string(),
            namespace: "http://datacite.org/schema/kernel-4".to_string(),
        }
    }
}

/// Static description of the repository.
///
/// # Examples
///
/// ```ignore
/// use oaipmh::{RepositoryConfig, DateFilter};
///
/// let config = RepositoryConfig::new()
///     .with_repository_name("Example recipes")
///     .with_base_url("https://example.org/oai")
///     .with_date_filter(DateFilter::Apply);
/// config.validate()?;
/// # Ok::<(), oaipmh::ResponderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// `repositoryName`
    pub repository_name: String,
    /// `baseURL`, also the text of the echoed `request` element.
    pub base_url: String,
    /// Free-text description. When non-empty, `Identify` carries it as a
    /// `dc:description` inside an `oai_dc:dc` block.
    pub description: String,
    /// `earliestDatestamp`, `YYYY-MM-DD`.
    pub earliest_datestamp: String,
    /// `granularity`
    pub granularity: String,
    /// `adminEmail`
    pub admin_email: String,
    /// `deletedRecord`
    pub deleted_records: DeletedRecordPolicy,
    /// `protocolVersion`
    pub protocol_version: String,
    /// Base that record names are appended to when forming identifiers.
    pub identifier_base: String,
    /// Formats listed by `ListMetadataFormats`, in output order.
    pub metadata_formats: Vec<MetadataFormat>,
    /// Whether `from`/`until` restrict list results.
    pub date_filter: DateFilter,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            repository_name: "Repositorio de recetas TOSCA del IM".to_string(),
            base_url: "http://158.42.104.43:5000/oai".to_string(),
            description: "Repositorio del Migue con recetas TOSCA.".to_string(),
            earliest_datestamp: "2023-03-01".to_string(),
            granularity: "YYYY-MM-DD".to_string(),
            admin_email: "asanchez@i3m.upv.es".to_string(),
            deleted_records: DeletedRecordPolicy::No,
            protocol_version: "2.0".to_string(),
            identifier_base: "https://github.com/grycap/tosca/blob/main/templates".to_string(),
            metadata_formats: vec![MetadataFormat::oai_dc(), MetadataFormat::oai_openaire()],
            date_filter: DateFilter::Ignore,
        }
    }
}

impl RepositoryConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing keys take their default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails
    /// [`RepositoryConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file. See [`RepositoryConfig::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds an invalid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that the configuration can answer requests.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::InvalidConfig`] when the base URL or identifier
    /// base is empty, the earliest datestamp is not a `YYYY-MM-DD` date, or a
    /// metadata prefix is listed twice.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ResponderError::InvalidConfig("base_url is empty".to_string()));
        }
        if self.identifier_base.trim().is_empty() {
            return Err(ResponderError::InvalidConfig(
                "identifier_base is empty".to_string(),
            ));
        }
        if !is_valid_date(&self.earliest_datestamp) {
            return Err(ResponderError::InvalidConfig(format!(
                "earliest_datestamp {:?} is not a YYYY-MM-DD date",
                self.earliest_datestamp
            )));
        }
        for (i, format) in self.metadata_formats.iter().enumerate() {
            if self.metadata_formats[..i]
                .iter()
                .any(|earlier| earlier.prefix == format.prefix)
            {
                return Err(ResponderError::InvalidConfig(format!(
                    "metadata prefix {} is listed twice",
                    format.prefix
                )));
            }
        }
        Ok(())
    }

    /// Returns the descriptor for `prefix` when the repository disseminates it.
    #[must_use]
    pub fn metadata_format(&self, prefix: MetadataPrefix) -> Option<&MetadataFormat> {
        self.metadata_formats.iter().find(|f| f.prefix == prefix)
    }

    /// Sets the repository name.
    #[must_use]
    pub fn with_repository_name(mut self, name: impl Into<String>) -> Self {
        self.repository_name = name.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the earliest datestamp.
    #[must_use]
    pub fn with_earliest_datestamp(mut self, datestamp: impl Into<String>) -> Self {
        self.earliest_datestamp = datestamp.into();
        self
    }

    /// Sets the admin email.
    #[must_use]
    pub fn with_admin_email(mut self, email: impl Into<String>) -> Self {
        self.admin_email = email.into();
        self
    }

    /// Sets the identifier base.
    #[must_use]
    pub fn with_identifier_base(mut self, base: impl Into<String>) -> Self {
        self.identifier_base = base.into();
        self
    }

    /// Sets the deleted-record policy.
    #[must_use]
    pub fn with_deleted_records(mut self, policy: DeletedRecordPolicy) -> Self {
        self.deleted_records = policy;
        self
    }

    /// Sets the date filter policy.
    #[must_use]
    pub fn with_date_filter(mut self, filter: DateFilter) -> Self {
        self.date_filter = filter;
        self
    }

    /// Replaces the list of disseminated formats.
    #[must_use]
    pub fn with_metadata_formats(mut self, formats: Vec<MetadataFormat>) -> Self {
        self.metadata_formats = formats;
        self
    }
}
