//! SPARQL built-in function library
//!
//! This module implements the function layer a SPARQL evaluator calls into:
//! string, numeric, hash and term functions, XSD casts, value comparison,
//! duration and date/time arithmetic, and language-tag handling. It holds no
//! state; every call returns or fails on its own.
//!
//! # Example
//!
//! ```rust
//! use samyama_sparql_functions::rdf::Literal;
//! use samyama_sparql_functions::sparql::{call_function, ExprValue, FunctionContext};
//!
//! let ctx = FunctionContext::default();
//! let a: ExprValue = Literal::new("2025-12-15", Some("xsd:date"), None).unwrap().into();
//! let b: ExprValue = Literal::new("2025-12-01", Some("xsd:date"), None).unwrap().into();
//!
//! let diff = call_function("dateDiff", &[a, b], &ctx).unwrap();
//! assert_eq!(diff.as_literal().unwrap().value(), "P14D");
//! ```

mod config;
mod error;
pub mod functions;
mod value;

pub use config::{FunctionConfig, FunctionContext, TimezoneFallback};
pub use error::{FunctionError, FunctionResult};
pub use functions::{call_function, compare, same_term};
pub use value::{ExprValue, StringArg};
