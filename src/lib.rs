#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # oaipmh: OAI-PMH responder
//!
//! Answers OAI-PMH 2.0 harvesting requests from an in-memory record catalog,
//! disseminating records as simple Dublin Core (`oai_dc`) or as OpenAIRE/DataCite
//! (`oai_openaire`) metadata.
//!
//! ## Quick Start
//!
//! ```ignore
//! use oaipmh::{MemoryCatalog, Record, RecordField, Responder, RepositoryConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = MemoryCatalog::from_json_file("catalog.json")?;
//! let responder = Responder::try_new(RepositoryConfig::from_json_file("repository.json")?)?;
//!
//! // Decoded query string from the HTTP layer
//! let query = [("verb", "GetRecord"), ("metadataPrefix", "oai_dc"),
//!              ("identifier", "https://github.com/grycap/tosca/blob/main/templates/k8s.yaml")];
//! let xml = responder.respond_to_pairs(query, &catalog)?;
//! println!("{xml}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`responder`] — Envelope building and per-verb payloads
//! - [`validation`] — Per-verb request validation and date checks
//! - [`request`] — Verbs and request arguments
//! - [`crosswalk`] — Record to `oai_dc` / `oai_openaire` mapping tables
//! - [`record`] — Catalog record structure
//! - [`catalog`] — Read-only catalog access and the in-memory catalog
//! - [`identifier`] — Record name to identifier encoding
//! - [`config`] — Repository configuration
//! - [`xml`] — Indented XML writer
//! - [`error`] — Protocol error kinds and the crate error type

pub mod catalog;
pub mod config;
pub mod crosswalk;
pub mod error;
pub mod identifier;
pub mod record;
pub mod request;
pub mod responder;
pub mod validation;
pub mod xml;

pub use catalog::{Catalog, MemoryCatalog};
pub use config::{DateFilter, DeletedRecordPolicy, MetadataFormat, RepositoryConfig};
pub use crosswalk::{ElementRule, ElementShape, MetadataPrefix, Vocabulary};
pub use error::{OaiError, ResponderError, Result};
pub use identifier::IdentifierScheme;
pub use record::{Record, RecordField};
pub use request::{Request, Verb};
pub use responder::Responder;
pub use validation::{is_valid_date, RequestValidator, ValidatedRequest};
