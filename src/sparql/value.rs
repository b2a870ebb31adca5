//! Loosely typed argument and return values of built-in functions
//!
//! SPARQL expressions mix RDF terms with plain strings, numbers and booleans;
//! `ExprValue` carries any of them, plus the unbound marker.

use super::error::{FunctionError, FunctionResult};
use super::functions::numeric::format_double;
use crate::rdf::namespace::xsd;
use crate::rdf::{Direction, Literal, NamedNode, RdfTerm};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Function argument or result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprValue {
    Term(RdfTerm),
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Unbound,
}

/// A string argument with the language tag and direction it carried
#[derive(Debug, Clone, PartialEq)]
pub struct StringArg<'a> {
    pub value: Cow<'a, str>,
    pub language: Option<&'a str>,
    pub direction: Option<Direction>,
}

impl<'a> StringArg<'a> {
    /// Whether `other` may be searched for inside `self` (SPARQL argument compatibility)
    pub fn is_compatible_with(&self, other: &StringArg<'_>) -> bool {
        match (self.language, other.language) {
            (_, None) => true,
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, Some(_)) => false,
        }
    }

    /// Build a result string carrying this argument's language and direction
    pub fn derive(&self, value: String) -> FunctionResult<ExprValue> {
        if value.is_empty() {
            return Ok(ExprValue::String(value));
        }
        let literal = match (self.language, self.direction) {
            (Some(lang), Some(dir)) => Literal::new_directional_language_tagged_literal(value, lang, dir)?,
            (Some(lang), None) => Literal::new_language_tagged_literal(value, lang)?,
            (None, _) => Literal::new_simple_literal(value)?,
        };
        Ok(ExprValue::Term(literal.into()))
    }
}

impl ExprValue {
    /// Simple string result; empty strings stay primitive since literals may not be empty
    pub fn simple(value: impl Into<String>) -> FunctionResult<Self> {
        let value = value.into();
        if value.is_empty() {
            Ok(ExprValue::String(value))
        } else {
            Ok(ExprValue::Term(Literal::new_simple_literal(value)?.into()))
        }
    }

    /// Typed literal result for a lexical form known to be valid
    pub(crate) fn typed(value: impl Into<String>, datatype: &str) -> Self {
        ExprValue::Term(Literal::typed_unchecked(value, datatype).into())
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self, ExprValue::Unbound)
    }

    pub fn as_term(&self) -> Option<&RdfTerm> {
        match self {
            ExprValue::Term(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        self.as_term().and_then(RdfTerm::as_literal)
    }

    pub fn as_named_node(&self) -> Option<&NamedNode> {
        self.as_term().and_then(RdfTerm::as_named_node)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ExprValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ExprValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ExprValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Lexical value of a literal or the text of a primitive
    ///
    /// Fails for IRIs, blank nodes, quoted triples and unbound values.
    pub fn lexical(&self, function: &str) -> FunctionResult<Cow<'_, str>> {
        match self {
            ExprValue::Term(RdfTerm::Literal(l)) => Ok(Cow::Borrowed(l.value())),
            ExprValue::String(s) => Ok(Cow::Borrowed(s)),
            ExprValue::Integer(i) => Ok(Cow::Owned(i.to_string())),
            ExprValue::Float(f) => Ok(Cow::Owned(format_double(*f))),
            ExprValue::Boolean(b) => Ok(Cow::Owned(b.to_string())),
            other => Err(FunctionError::Argument(format!(
                "{} expects a literal, got {}",
                function, other
            ))),
        }
    }

    /// String-literal argument: a simple, `xsd:string` or language-tagged literal, or a plain string
    pub fn string_arg(&self, function: &str) -> FunctionResult<StringArg<'_>> {
        match self {
            ExprValue::String(s) => Ok(StringArg {
                value: Cow::Borrowed(s),
                language: None,
                direction: None,
            }),
            ExprValue::Term(RdfTerm::Literal(l)) if l.is_string() || l.language().is_some() => {
                Ok(StringArg {
                    value: Cow::Borrowed(l.value()),
                    language: l.language(),
                    direction: l.direction(),
                })
            }
            other => Err(FunctionError::Argument(format!(
                "{} expects a string literal, got {}",
                function, other
            ))),
        }
    }

    /// The RDF term this value stands for; `None` when unbound or an empty string
    pub fn to_term(&self) -> Option<RdfTerm> {
        let literal = match self {
            ExprValue::Term(t) => return Some(t.clone()),
            ExprValue::Unbound => return None,
            ExprValue::String(s) => Literal::new_simple_literal(s.as_str()).ok()?,
            ExprValue::Integer(i) => Literal::typed_unchecked(i.to_string(), xsd::INTEGER),
            ExprValue::Float(f) => Literal::typed_unchecked(format_double(*f), xsd::DOUBLE),
            ExprValue::Boolean(b) => Literal::typed_unchecked(b.to_string(), xsd::BOOLEAN),
        };
        Some(literal.into())
    }

    /// Effective datatype IRI of a literal argument, `None` for primitives and non-literals
    pub fn datatype_iri(&self) -> Option<&str> {
        self.as_literal().map(Literal::datatype_iri)
    }
}

impl fmt::Display for ExprValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprValue::Term(t) => write!(f, "{}", t),
            ExprValue::String(s) => write!(f, "\"{}\"", s),
            ExprValue::Integer(i) => write!(f, "{}", i),
            ExprValue::Float(fl) => write!(f, "{}", fl),
            ExprValue::Boolean(b) => write!(f, "{}", b),
            ExprValue::Unbound => write!(f, "UNBOUND"),
        }
    }
}

impl From<RdfTerm> for ExprValue {
    fn from(term: RdfTerm) -> Self {
        ExprValue::Term(term)
    }
}

impl From<Literal> for ExprValue {
    fn from(lit: Literal) -> Self {
        ExprValue::Term(lit.into())
    }
}

impl From<NamedNode> for ExprValue {
    fn from(node: NamedNode) -> Self {
        ExprValue::Term(node.into())
    }
}

impl From<String> for ExprValue {
    fn from(s: String) -> Self {
        ExprValue::String(s)
    }
}

impl From<&str> for ExprValue {
    fn from(s: &str) -> Self {
        ExprValue::String(s.to_string())
    }
}

impl From<i64> for ExprValue {
    fn from(i: i64) -> Self {
        ExprValue::Integer(i)
    }
}

impl From<f64> for ExprValue {
    fn from(f: f64) -> Self {
        ExprValue::Float(f)
    }
}

impl From<bool> for ExprValue {
    fn from(b: bool) -> Self {
        ExprValue::Boolean(b)
    }
}

impl From<Option<RdfTerm>> for ExprValue {
    fn from(term: Option<RdfTerm>) -> Self {
        term.map(ExprValue::Term).unwrap_or(ExprValue::Unbound)
    }
}
