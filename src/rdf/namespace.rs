//! RDF vocabulary constants and prefix management
//!
//! Datatype arguments handed to the function library may be written either as
//! full IRIs or as compact names such as `xsd:integer`; the namespace manager
//! expands the latter.

use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not a compact IRI
    #[error("Invalid compact IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// XML Schema datatypes
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
    pub const DAY_TIME_DURATION: &str = "http://www.w3.org/2001/XMLSchema#dayTimeDuration";
    pub const YEAR_MONTH_DURATION: &str = "http://www.w3.org/2001/XMLSchema#yearMonthDuration";

    /// Integer-derived datatypes that SPARQL treats as numeric
    pub const DERIVED_INTEGERS: &[&str] = &[
        "http://www.w3.org/2001/XMLSchema#long",
        "http://www.w3.org/2001/XMLSchema#int",
        "http://www.w3.org/2001/XMLSchema#short",
        "http://www.w3.org/2001/XMLSchema#byte",
        "http://www.w3.org/2001/XMLSchema#nonNegativeInteger",
        "http://www.w3.org/2001/XMLSchema#nonPositiveInteger",
        "http://www.w3.org/2001/XMLSchema#negativeInteger",
        "http://www.w3.org/2001/XMLSchema#positiveInteger",
        "http://www.w3.org/2001/XMLSchema#unsignedLong",
        "http://www.w3.org/2001/XMLSchema#unsignedInt",
        "http://www.w3.org/2001/XMLSchema#unsignedShort",
        "http://www.w3.org/2001/XMLSchema#unsignedByte",
    ];

    /// Check whether a datatype IRI denotes an XSD numeric type
    pub fn is_numeric(datatype: &str) -> bool {
        matches!(datatype, INTEGER | DECIMAL | DOUBLE | FLOAT)
            || DERIVED_INTEGERS.contains(&datatype)
    }

    /// Check whether a datatype IRI denotes an integer type
    pub fn is_integer(datatype: &str) -> bool {
        datatype == INTEGER || DERIVED_INTEGERS.contains(&datatype)
    }
}

/// RDF vocabulary
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const DIR_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#dirLangString";
}

/// Namespace manager with common prefixes
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings
    prefixes: HashMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with common prefixes
    pub fn new() -> Self {
        let mut mgr = Self {
            prefixes: HashMap::new(),
        };

        mgr.add_prefix("rdf", rdf::NS);
        mgr.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        mgr.add_prefix("xsd", xsd::NS);
        mgr.add_prefix("owl", "http://www.w3.org/2002/07/owl#");

        mgr
    }

    /// Shared manager holding only the built-in prefixes
    pub fn common() -> &'static NamespaceManager {
        static COMMON: OnceLock<NamespaceManager> = OnceLock::new();
        COMMON.get_or_init(NamespaceManager::new)
    }

    /// Add a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        match compact_iri.split_once(':') {
            Some((prefix, local)) if !local.starts_with("//") => {
                let iri = self.get_iri(prefix)?;
                Ok(format!("{}{}", iri, local))
            }
            _ => Err(PrefixError::InvalidIri(compact_iri.to_string())),
        }
    }

    /// Expand a known compact IRI, leaving anything else untouched
    pub fn expand_or_keep(&self, iri: &str) -> String {
        self.expand(iri).unwrap_or_else(|_| iri.to_string())
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefixes() {
        let mgr = NamespaceManager::new();

        assert_eq!(mgr.get_iri("rdf").unwrap(), rdf::NS);
        assert_eq!(mgr.get_iri("xsd").unwrap(), "http://www.w3.org/2001/XMLSchema#");
    }

    #[test]
    fn test_expand() {
        let mgr = NamespaceManager::new();

        assert_eq!(mgr.expand("xsd:integer").unwrap(), xsd::INTEGER);
        assert_eq!(mgr.expand("rdf:langString").unwrap(), rdf::LANG_STRING);
        assert!(mgr.expand("http://example.org/x").is_err());
        assert!(matches!(mgr.expand("ex:x"), Err(PrefixError::UnknownPrefix(_))));
    }

    #[test]
    fn test_expand_or_keep() {
        let mgr = NamespaceManager::common();
        assert_eq!(mgr.expand_or_keep("xsd:date"), xsd::DATE);
        assert_eq!(
            mgr.expand_or_keep("http://example.org/dt"),
            "http://example.org/dt"
        );
        assert_eq!(mgr.expand_or_keep("urn:isbn:123"), "urn:isbn:123");
    }

    #[test]
    fn test_numeric_datatypes() {
        assert!(xsd::is_numeric(xsd::DECIMAL));
        assert!(xsd::is_numeric("http://www.w3.org/2001/XMLSchema#int"));
        assert!(!xsd::is_numeric(xsd::STRING));
        assert!(xsd::is_integer("http://www.w3.org/2001/XMLSchema#long"));
        assert!(!xsd::is_integer(xsd::DOUBLE));
    }
}
