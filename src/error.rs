//! Error types for the responder.
//!
//! Two layers live here:
//!
//! - [`OaiError`] is the fixed OAI-PMH error vocabulary. These are *protocol*
//!   outcomes: they are rendered into the response document as an
//!   `<error code="...">` element and never surface as a Rust `Err` from
//!   [`Responder::respond`](crate::Responder::respond).
//! - [`ResponderError`] covers failures of the machinery itself (XML writing,
//!   configuration loading, catalog loading), with the [`Result`] alias.

use std::fmt;

use thiserror::Error;

/// One of the seven OAI-PMH 2.0 protocol error conditions.
///
/// Each kind maps to a fixed `code` attribute and a fixed human-readable
/// message; neither depends on the request that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OaiError {
    /// Illegal, missing, repeated or malformed argument.
    BadArgument,
    /// The resumption token is invalid or expired.
    BadResumptionToken,
    /// The verb is missing, repeated or not a legal OAI-PMH verb.
    BadVerb,
    /// The metadata format is not supported by the item or repository.
    CannotDisseminateFormat,
    /// The identifier is unknown or illegal in this repository.
    IdDoesNotExist,
    /// The request arguments select an empty list of records.
    NoRecordsMatch,
    /// The repository does not support sets.
    NoSetHierarchy,
}

impl OaiError {
    /// All error kinds, in protocol documentation order.
    pub const ALL: [Self; 7] = [
        Self::BadArgument,
        Self::BadResumptionToken,
        Self::BadVerb,
        Self::CannotDisseminateFormat,
        Self::IdDoesNotExist,
        Self::NoRecordsMatch,
        Self::NoSetHierarchy,
    ];

    /// Returns the value of the `code` attribute for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BadArgument => "badArgument",
            Self::BadResumptionToken => "badResumptionToken",
            Self::BadVerb => "badVerb",
            Self::CannotDisseminateFormat => "cannotDisseminateFormat",
            Self::IdDoesNotExist => "idDoesNotExist",
            Self::NoRecordsMatch => "noRecordsMatch",
            Self::NoSetHierarchy => "noSetHierarchy",
        }
    }

    /// Returns the fixed descriptive text placed inside the error element.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::BadArgument => {
                "The request includes illegal arguments, is missing required arguments, \
                 includes a repeated argument, or values for arguments have an illegal syntax."
            },
            Self::BadResumptionToken => "The value of the resumptionToken argument is invalid or expired.",
            Self::BadVerb => {
                "Value of the verb argument is not a legal OAI-PMH verb, \
                 the verb argument is missing, or the verb argument is repeated."
            },
            Self::CannotDisseminateFormat => {
                "The metadata format identified by the value given for the metadataPrefix argument \
                 is not supported by the item or by the repository."
            },
            Self::IdDoesNotExist => {
                "The value of the identifier argument is unknown or illegal in this repository."
            },
            Self::NoRecordsMatch => {
                "The combination of the values of the from, until, set and metadataPrefix \
                 arguments results in an empty list."
            },
            Self::NoSetHierarchy => "The repository does not support sets.",
        }
    }
}

impl fmt::Display for OaiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for OaiError {}

/// Error type for failures of the responder machinery.
///
/// Protocol-level rejections are not represented here; see [`OaiError`].
#[derive(Error, Debug)]
pub enum ResponderError {
    /// Failure while writing the XML document.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The written document was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Malformed JSON while loading a catalog or configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The repository configuration cannot be used to answer requests.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A catalog source could not be interpreted.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// IO error from the underlying source.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`ResponderError`].
pub type Result<T> = std::result::Result<T, ResponderError>;
