//! Samyama SPARQL Functions
//!
//! The built-in function library of the Samyama SPARQL engine: the RDF term
//! model with directional language tags and RDF-star quoted triples, XSD
//! durations, calendar-aware date/time arithmetic, language matching, Unicode
//! case folding and normalization, value comparison, and XSD casts.
//!
//! # Modules
//!
//! - [`rdf`]: IRIs, blank nodes, literals, quoted triples and vocabularies
//! - [`sparql`]: the function library, its errors, configuration and dispatcher
//!
//! ## Example Usage
//!
//! ```rust
//! use samyama_sparql_functions::{call_function, ExprValue, FunctionContext, Literal};
//!
//! let ctx = FunctionContext::default();
//!
//! // Month arithmetic clamps to the end of the month
//! let date: ExprValue = Literal::new("2024-01-31", Some("xsd:date"), None).unwrap().into();
//! let month: ExprValue = Literal::new("P1M", Some("xsd:yearMonthDuration"), None).unwrap().into();
//! let result = call_function("dateAddYearMonth", &[date, month], &ctx).unwrap();
//! assert_eq!(result.as_literal().unwrap().value(), "2024-02-29");
//!
//! // Full case folding
//! let folded = call_function("FOLD", &["Straße".into()], &ctx).unwrap();
//! assert_eq!(folded.as_literal().unwrap().value(), "strasse");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod rdf;
pub mod sparql;

// Re-export main types for convenience
pub use rdf::{
    BlankNode, Direction, Literal, NamedNode, QuotedTriple, RdfError, RdfResult, RdfTerm,
    NamespaceManager,
};

pub use sparql::{
    call_function, ExprValue, FunctionConfig, FunctionContext, FunctionError, FunctionResult,
    TimezoneFallback,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
