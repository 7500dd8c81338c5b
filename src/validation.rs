//! Per-verb request validation.
//!
//! [`RequestValidator`] checks a [`Request`] against the protocol rules for its
//! verb and either rejects it with exactly one [`OaiError`] or hands back a
//! [`ValidatedRequest`] carrying what the response builder needs. Checks run in a
//! fixed order and the first failing check decides the error:
//!
//! | Verb | Checks, in order |
//! |------|------------------|
//! | `GetRecord` | identifier and prefix present → prefix known → identifier resolves |
//! | `ListIdentifiers`, `ListRecords` | no resumption token → no set → prefix present and dates well-formed → prefix known → catalog not empty |
//! | `ListMetadataFormats` | identifier (if any) resolves |
//! | `ListSets` | always `noSetHierarchy` |
//! | `Identify` | none |

use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::config::RepositoryConfig;
use crate::crosswalk::MetadataPrefix;
use crate::error::OaiError;
use crate::identifier::IdentifierScheme;
use crate::record::Record;
use crate::request::{Request, Verb};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, requiring the input to be in canonical form.
///
/// The parsed date must format back to exactly the input string, so `2023-3-1`
/// and `23-03-01` are rejected along with impossible dates such as `2023-02-29`.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == s)
}

/// Returns true when `s` is a canonical `YYYY-MM-DD` date. See [`parse_date`].
#[must_use]
pub fn is_valid_date(s: &str) -> bool {
    parse_date(s).is_some()
}

/// A request that passed validation, with the pieces its payload needs.
#[derive(Debug, Clone, Copy)]
pub enum ValidatedRequest<'r, 'c> {
    /// `Identify`
    Identify,
    /// `GetRecord` for a resolved record.
    GetRecord {
        /// The identifier as supplied.
        identifier: &'r str,
        /// The record it resolves to.
        record: &'c Record,
        /// Requested metadata format.
        prefix: MetadataPrefix,
    },
    /// `ListIdentifiers`
    ListIdentifiers {
        /// Requested metadata format.
        prefix: MetadataPrefix,
        /// Lower date bound, if supplied.
        from: Option<NaiveDate>,
        /// Upper date bound, if supplied.
        until: Option<NaiveDate>,
    },
    /// `ListRecords`
    ListRecords {
        /// Requested metadata format.
        prefix: MetadataPrefix,
        /// Lower date bound, if supplied.
        from: Option<NaiveDate>,
        /// Upper date bound, if supplied.
        until: Option<NaiveDate>,
    },
    /// `ListMetadataFormats`
    ListMetadataFormats,
}

/// Validates requests against the repository configuration and a catalog.
#[derive(Debug, Clone, Copy)]
pub struct RequestValidator<'a> {
    config: &'a RepositoryConfig,
    identifiers: &'a IdentifierScheme,
}

impl<'a> RequestValidator<'a> {
    /// Creates a validator.
    #[must_use]
    pub const fn new(config: &'a RepositoryConfig, identifiers: &'a IdentifierScheme) -> Self {
        Self {
            config,
            identifiers,
        }
    }

    /// Validates `request`.
    ///
    /// # Errors
    ///
    /// Returns the first applicable [`OaiError`] for the request's verb.
    pub fn validate<'r, 'c, C: Catalog + ?Sized>(
        &self,
        request: &'r Request,
        catalog: &'c C,
    ) -> Result<ValidatedRequest<'r, 'c>, OaiError> {
        match request.verb() {
            Verb::Identify => Ok(ValidatedRequest::Identify),
            Verb::GetRecord => self.validate_get_record(request, catalog),
            Verb::ListIdentifiers => {
                let (prefix, from, until) = self.validate_list(request, catalog)?;
                Ok(ValidatedRequest::ListIdentifiers {
                    prefix,
                    from,
                    until,
                })
            },
            Verb::ListRecords => {
                let (prefix, from, until) = self.validate_list(request, catalog)?;
                Ok(ValidatedRequest::ListRecords {
                    prefix,
                    from,
                    until,
                })
            },
            Verb::ListMetadataFormats => {
                if let Some(identifier) = request.identifier() {
                    self.identifiers
                        .resolve(catalog, identifier)
                        .ok_or(OaiError::IdDoesNotExist)?;
                }
                Ok(ValidatedRequest::ListMetadataFormats)
            },
            Verb::ListSets => Err(OaiError::NoSetHierarchy),
        }
    }

    fn validate_get_record<'r, 'c, C: Catalog + ?Sized>(
        &self,
        request: &'r Request,
        catalog: &'c C,
    ) -> Result<ValidatedRequest<'r, 'c>, OaiError> {
        let (Some(identifier), Some(prefix)) = (request.identifier(), request.metadata_prefix())
        else {
            return Err(OaiError::BadArgument);
        };
        let prefix = self.disseminated(prefix)?;
        let record = self
            .identifiers
            .resolve(catalog, identifier)
            .ok_or(OaiError::IdDoesNotExist)?;

        Ok(ValidatedRequest::GetRecord {
            identifier,
            record,
            prefix,
        })
    }

    fn validate_list<C: Catalog + ?Sized>(
        &self,
        request: &Request,
        catalog: &C,
    ) -> Result<(MetadataPrefix, Option<NaiveDate>, Option<NaiveDate>), OaiError> {
        if request.resumption_token().is_some() {
            return Err(OaiError::BadResumptionToken);
        }
        if request.set_spec().is_some() {
            return Err(OaiError::NoSetHierarchy);
        }

        let from = optional_date(request.from_date())?;
        let until = optional_date(request.until_date())?;
        let prefix = request.metadata_prefix().ok_or(OaiError::BadArgument)?;
        let prefix = self.disseminated(prefix)?;

        if catalog.is_empty() {
            return Err(OaiError::NoRecordsMatch);
        }
        Ok((prefix, from, until))
    }

    /// Maps a requested prefix to a format this repository disseminates.
    fn disseminated(&self, prefix: &str) -> Result<MetadataPrefix, OaiError> {
        prefix
            .parse::<MetadataPrefix>()
            .ok()
            .filter(|p| self.config.metadata_format(*p).is_some())
            .ok_or(OaiError::CannotDisseminateFormat)
    }
}

fn optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, OaiError> {
    value
        .map(|s| parse_date(s).ok_or(OaiError::BadArgument))
        .transpose()
}
