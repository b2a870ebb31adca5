//! RDF term model for the SPARQL function library
//!
//! This module implements the values SPARQL functions operate on:
//! - IRIs and blank nodes
//! - Literals with datatype, or language tag and optional base direction
//! - RDF-star quoted triples, nested to any depth
//! - Well-known vocabularies and prefix expansion
//!
//! # Example
//!
//! ```rust
//! use samyama_sparql_functions::rdf::{Literal, NamedNode, QuotedTriple, RdfTerm};
//!
//! let alice = NamedNode::new("http://example.org/alice").unwrap();
//! let name = NamedNode::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let value = Literal::new("Alice", None, Some("en")).unwrap();
//!
//! let statement = QuotedTriple::new(alice, name, value);
//! assert_eq!(statement.depth(), 1);
//!
//! let term = RdfTerm::from(statement.clone());
//! assert!(term.same_term(&RdfTerm::from(statement)));
//! ```

mod types;
pub mod namespace;

pub use types::{
    RdfTerm, NamedNode, BlankNode, Literal, QuotedTriple, Direction,
    RdfError, RdfResult,
};

pub use namespace::{
    NamespaceManager,
    PrefixError, PrefixResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_module_exports() {
        let _ns_mgr = NamespaceManager::new();
        let _node = BlankNode::new();
        assert_eq!(Direction::Rtl.as_str(), "rtl");
    }
}
