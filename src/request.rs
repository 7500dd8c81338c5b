//! Protocol requests.
//!
//! A [`Request`] is a verb plus the optional OAI-PMH arguments. It is built once
//! per invocation, either directly through the builder methods or from the decoded
//! key/value pairs of an HTTP query with [`Request::from_pairs`].

use std::fmt;
use std::str::FromStr;

use crate::error::OaiError;

/// The six OAI-PMH verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Retrieve one record.
    GetRecord,
    /// Describe the repository.
    Identify,
    /// Harvest record headers.
    ListIdentifiers,
    /// List the disseminated metadata formats.
    ListMetadataFormats,
    /// Harvest full records.
    ListRecords,
    /// List the set structure.
    ListSets,
}

impl Verb {
    /// All verbs.
    pub const ALL: [Self; 6] = [
        Self::GetRecord,
        Self::Identify,
        Self::ListIdentifiers,
        Self::ListMetadataFormats,
        Self::ListRecords,
        Self::ListSets,
    ];

    /// The verb as it appears on the wire and as the payload element name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetRecord => "GetRecord",
            Self::Identify => "Identify",
            Self::ListIdentifiers => "ListIdentifiers",
            Self::ListMetadataFormats => "ListMetadataFormats",
            Self::ListRecords => "ListRecords",
            Self::ListSets => "ListSets",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = OaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or(OaiError::BadVerb)
    }
}

/// An OAI-PMH request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    verb: Verb,
    metadata_prefix: Option<String>,
    identifier: Option<String>,
    from: Option<String>,
    until: Option<String>,
    set_spec: Option<String>,
    resumption_token: Option<String>,
}

impl Request {
    /// Creates a request with no arguments.
    #[must_use]
    pub const fn new(verb: Verb) -> Self {
        Self {
            verb,
            metadata_prefix: None,
            identifier: None,
            from: None,
            until: None,
            set_spec: None,
            resumption_token: None,
        }
    }

    /// Builds a request from decoded query pairs.
    ///
    /// An argument supplied with an empty value is still present: `resumptionToken=`
    /// is rejected like any other token. `set` and `setSpec` are both accepted for
    /// the set argument.
    ///
    /// # Errors
    ///
    /// - [`OaiError::BadVerb`] when `verb` is missing, repeated or unknown.
    /// - [`OaiError::BadArgument`] when an argument name is not part of the
    ///   protocol or an argument is repeated. `ListSets` requests are never
    ///   rejected here.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, OaiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut verb: Option<String> = None;
        let mut verb_repeated = false;
        let mut args: [Option<String>; 6] = Default::default();
        let mut seen = [false; 6];
        let mut bad_argument = false;

        for (key, value) in pairs {
            let value = value.as_ref();
            let slot = match key.as_ref() {
                "verb" => {
                    verb_repeated |= verb.is_some();
                    verb = Some(value.to_string());
                    continue;
                },
                "metadataPrefix" => 0,
                "identifier" => 1,
                "from" => 2,
                "until" => 3,
                "set" | "setSpec" => 4,
                "resumptionToken" => 5,
                _ => {
                    bad_argument = true;
                    continue;
                },
            };
            bad_argument |= seen[slot];
            seen[slot] = true;
            args[slot] = Some(value.to_string());
        }

        if verb_repeated {
            return Err(OaiError::BadVerb);
        }
        let verb: Verb = verb.as_deref().unwrap_or_default().parse()?;
        // ListSets is rejected with noSetHierarchy whatever its arguments.
        if bad_argument && verb != Verb::ListSets {
            return Err(OaiError::BadArgument);
        }

        let [metadata_prefix, identifier, from, until, set_spec, resumption_token] = args;
        Ok(Self {
            verb,
            metadata_prefix,
            identifier,
            from,
            until,
            set_spec,
            resumption_token,
        })
    }

    /// Sets `metadataPrefix`.
    #[must_use]
    pub fn with_metadata_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metadata_prefix = Some(prefix.into());
        self
    }

    /// Sets `identifier`.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets `from`.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Sets `until`.
    #[must_use]
    pub fn with_until(mut self, until: impl Into<String>) -> Self {
        self.until = Some(until.into());
        self
    }

    /// Sets the set argument.
    #[must_use]
    pub fn with_set_spec(mut self, set_spec: impl Into<String>) -> Self {
        self.set_spec = Some(set_spec.into());
        self
    }

    /// Sets `resumptionToken`.
    #[must_use]
    pub fn with_resumption_token(mut self, token: impl Into<String>) -> Self {
        self.resumption_token = Some(token.into());
        self
    }

    /// The request verb.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// `metadataPrefix`, if supplied with a value.
    #[must_use]
    pub fn metadata_prefix(&self) -> Option<&str> {
        self.metadata_prefix.as_deref().filter(|s| !s.is_empty())
    }

    /// `identifier`, if supplied with a value.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|s| !s.is_empty())
    }

    /// `from`, if supplied.
    #[must_use]
    pub fn from_date(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// `until`, if supplied.
    #[must_use]
    pub fn until_date(&self) -> Option<&str> {
        self.until.as_deref()
    }

    /// The set argument, if supplied.
    #[must_use]
    pub fn set_spec(&self) -> Option<&str> {
        self.set_spec.as_deref()
    }

    /// `resumptionToken`, if supplied.
    #[must_use]
    pub fn resumption_token(&self) -> Option<&str> {
        self.resumption_token.as_deref()
    }

    /// Attributes of the echoed `request` element, in output order.
    ///
    /// Empty argument values are left out.
    #[must_use]
    pub fn echo_attributes(&self) -> Vec<(&'static str, &str)> {
        let args = [
            ("metadataPrefix", self.metadata_prefix()),
            ("identifier", self.identifier()),
            ("from", self.from_date()),
            ("until", self.until_date()),
            ("setSpec", self.set_spec()),
            ("resumptionToken", self.resumption_token()),
        ];

        let mut attributes = vec![("verb", self.verb.as_str())];
        attributes.extend(
            args.into_iter()
                .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v))),
        );
        attributes
    }
}
