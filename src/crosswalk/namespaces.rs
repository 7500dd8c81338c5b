//! XML namespaces used by the response envelope and the metadata crosswalks.

/// OAI-PMH 2.0 namespace URI.
pub const OAI_PMH: &str = "http://www.openarchives.org/OAI/2.0/";

/// Schema location value for the OAI-PMH envelope.
pub const OAI_PMH_SCHEMA_LOCATION: &str =
    "http://www.openarchives.org/OAI/2.0/ http://www.openarchives.org/OAI/2.0/OAI-PMH.xsd";

/// OAI Dublin Core container namespace URI.
pub const OAI_DC: &str = "http://www.openarchives.org/OAI/2.0/oai_dc/";

/// Schema location value for `oai_dc:dc` containers.
pub const OAI_DC_SCHEMA_LOCATION: &str =
    "http://www.openarchives.org/OAI/2.0/oai_dc/ http://www.openarchives.org/OAI/2.0/oai_dc.xsd";

/// Dublin Core elements 1.1 namespace URI.
pub const DC: &str = "http://purl.org/dc/elements/1.1/";

/// DataCite kernel 4 namespace URI.
pub const DATACITE: &str = "http://datacite.org/schema/kernel-4";

/// OpenAIRE namespace URI.
pub const OAIRE: &str = "http://namespace.openaire.eu/schema/oaire/";

/// XML Schema instance namespace URI.
pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// COAR resource type for software.
pub const COAR_SOFTWARE: &str = "http://purl.org/coar/resource_type/c_5ce6";

/// COAR access right: open access.
pub const COAR_OPEN_ACCESS: &str = "http://purl.org/coar/access_right/c_abf2";
