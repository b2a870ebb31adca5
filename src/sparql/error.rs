//! Function library errors

use crate::rdf::RdfError;
use thiserror::Error;

/// Failure of a single built-in function call
///
/// Errors are local to the call that raised them; the evaluator decides
/// whether they turn into a SPARQL expression error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Malformed construction input (empty literal, bad normalization form)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lexical form does not match the XSD duration grammar
    #[error("Invalid duration '{input}': bad {component}")]
    DurationFormat {
        /// Offending component or grammar element
        component: String,
        /// Original input
        input: String,
    },

    /// Cast input is not a valid lexical form of the target type
    #[error("Cannot cast '{input}' to {target}: {reason}")]
    Cast {
        /// Target datatype
        target: String,
        /// Original input
        input: String,
        /// What was wrong
        reason: String,
    },

    /// Unknown operator, function, or out-of-domain argument
    #[error("Argument error: {0}")]
    Argument(String),

    /// Value outside its valid range
    #[error("Range error: {0}")]
    Range(String),

    /// Division by zero or overflow
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

impl FunctionError {
    pub(crate) fn duration(component: impl Into<String>, input: &str) -> Self {
        FunctionError::DurationFormat {
            component: component.into(),
            input: input.to_string(),
        }
    }

    pub(crate) fn cast(target: &str, input: &str, reason: impl Into<String>) -> Self {
        FunctionError::Cast {
            target: target.to_string(),
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<RdfError> for FunctionError {
    fn from(e: RdfError) -> Self {
        FunctionError::Validation(e.to_string())
    }
}

pub type FunctionResult<T> = Result<T, FunctionError>;
