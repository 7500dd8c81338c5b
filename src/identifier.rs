//! Record identifier encoding.
//!
//! External identifiers have the form `<base>/<record-name>`. [`IdentifierScheme`]
//! is the single place that knows this layout: [`IdentifierScheme::encode`] builds
//! an identifier from a record name and [`IdentifierScheme::decode`] recovers the
//! name, provided the identifier starts with the exact base prefix. Record names
//! may themselves contain `/` or any part of the base; decoding only ever strips
//! the leading prefix.

use crate::catalog::Catalog;
use crate::record::Record;

/// Bidirectional mapping between record names and external identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierScheme {
    prefix: String,
}

impl IdentifierScheme {
    /// Creates a scheme rooted at `base`. A trailing `/` is optional.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut prefix = base.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    /// The identifier prefix, always ending in `/`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds the external identifier for a record name.
    #[must_use]
    pub fn encode(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Recovers the record name from an identifier.
    ///
    /// Returns `None` when the identifier does not start with the prefix or
    /// names nothing after it.
    #[must_use]
    pub fn decode<'a>(&self, identifier: &'a str) -> Option<&'a str> {
        identifier
            .strip_prefix(self.prefix.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Decodes an identifier and looks the record up in `catalog`.
    ///
    /// Returns `None` under the same conditions as [`IdentifierScheme::decode`],
    /// or when no record carries the decoded name.
    pub fn resolve<'c, C: Catalog + ?Sized>(
        &self,
        catalog: &'c C,
        identifier: &str,
    ) -> Option<&'c Record> {
        catalog.lookup(self.decode(identifier)?)
    }
}
