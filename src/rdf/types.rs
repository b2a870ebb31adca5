//! RDF term model
//!
//! The closed set of RDF values the function library operates on: IRIs, blank
//! nodes, literals (optionally language-tagged with a base direction) and
//! RDF-star quoted triples. Derived equality on these types is `sameTerm`.

use super::namespace::{rdf, xsd, NamespaceManager};
use oxiri::Iri;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// RDF errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct NamedNode(String);

impl NamedNode {
    /// Create a new named node from an absolute IRI string
    pub fn new(iri: impl Into<String>) -> RdfResult<Self> {
        let iri = iri.into();
        Iri::parse(iri.as_str()).map_err(|e| RdfError::InvalidIri(format!("{}: {}", iri, e)))?;
        Ok(Self(iri))
    }

    /// Create a named node from a full IRI or a compact name with a well-known prefix
    pub fn expand(iri: &str) -> RdfResult<Self> {
        Self::new(NamespaceManager::common().expand_or_keep(iri))
    }

    /// Create a named node without validation, for IRIs known to be valid
    pub(crate) fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the node, returning the IRI string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NamedNode {
    type Error = RdfError;

    fn try_from(iri: String) -> RdfResult<Self> {
        Self::new(iri)
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

/// Blank node (anonymous node)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct BlankNode(String);

impl BlankNode {
    /// Create a new blank node with a fresh unique identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BlankNode {
    type Err = RdfError;

    /// Create a blank node from an explicit label
    fn from_str(id: &str) -> RdfResult<Self> {
        let valid = !id.is_empty()
            && !id.starts_with(['-', '.'])
            && !id.ends_with('.')
            && id
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if valid {
            Ok(Self(id.to_string()))
        } else {
            Err(RdfError::InvalidBlankNode(id.to_string()))
        }
    }
}

impl TryFrom<String> for BlankNode {
    type Error = RdfError;

    fn try_from(id: String) -> RdfResult<Self> {
        id.parse()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

/// Base text direction of a directional language-tagged literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    Ltr,
    /// Right to left
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    /// Split a `lang--dir` tag on its first `--` separator
    ///
    /// A tag without separator has no direction. The direction part must be
    /// `ltr` or `rtl` (ASCII case-insensitive).
    pub fn split_tag(tag: &str) -> RdfResult<(&str, Option<Direction>)> {
        match tag.split_once("--") {
            Some((language, direction)) => Ok((language, Some(direction.parse()?))),
            None => Ok((tag, None)),
        }
    }
}

impl FromStr for Direction {
    type Err = RdfError;

    fn from_str(s: &str) -> RdfResult<Self> {
        if s.eq_ignore_ascii_case("ltr") {
            Ok(Direction::Ltr)
        } else if s.eq_ignore_ascii_case("rtl") {
            Ok(Direction::Rtl)
        } else {
            Err(RdfError::InvalidLiteral(format!(
                "base direction must be 'ltr' or 'rtl', got '{}'",
                s
            )))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn validate_language(language: &str) -> RdfResult<()> {
    let mut subtags = language.split('-');
    let primary_ok = subtags
        .next()
        .is_some_and(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()));
    let rest_ok = subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()));
    if primary_ok && rest_ok {
        Ok(())
    } else {
        Err(RdfError::InvalidLiteral(format!("invalid language tag '{}'", language)))
    }
}

/// RDF literal value
///
/// The datatype is kept as supplied: a simple literal has no explicit datatype,
/// which makes `"a"` and `"a"^^xsd:string` value-equal but not the same term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LiteralRepr")]
pub struct Literal {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    datatype: Option<NamedNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
}

/// Serialized shape of a [`Literal`], checked by the constructors on the way in
#[derive(Deserialize)]
struct LiteralRepr {
    value: String,
    #[serde(default)]
    datatype: Option<NamedNode>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    direction: Option<Direction>,
}

impl TryFrom<LiteralRepr> for Literal {
    type Error = RdfError;

    fn try_from(repr: LiteralRepr) -> RdfResult<Self> {
        let LiteralRepr { value, datatype, language, direction } = repr;
        match (datatype, language, direction) {
            (None, None, None) => Self::new_simple_literal(value),
            (Some(dt), None, None) => Self::new_typed_literal(value, dt),
            (None, Some(language), None) => Self::new_language_tagged_literal(value, language),
            (None, Some(language), Some(direction)) => {
                Self::new_directional_language_tagged_literal(value, language, direction)
            }
            (_, None, Some(direction)) => Err(RdfError::InvalidLiteral(format!(
                "direction '{}' requires a language tag",
                direction
            ))),
            (Some(dt), Some(language), _) => Err(RdfError::InvalidLiteral(format!(
                "a literal cannot carry both datatype {} and language '{}'",
                dt, language
            ))),
        }
    }
}

impl Literal {
    /// Create a literal from its raw parts
    ///
    /// `datatype` may be a full IRI or a compact `xsd:`/`rdf:` name; `language`
    /// may carry a direction suffix (`ar--rtl`). A datatype together with a
    /// language is only accepted when the datatype is `rdf:langString` or
    /// `rdf:dirLangString`.
    pub fn new(
        value: impl Into<String>,
        datatype: Option<&str>,
        language: Option<&str>,
    ) -> RdfResult<Self> {
        let datatype = datatype.map(NamedNode::expand).transpose()?;
        match (datatype, language) {
            (None, None) => Self::new_simple_literal(value),
            (Some(dt), None) => Self::new_typed_literal(value, dt),
            (dt, Some(tag)) => {
                if let Some(dt) = dt {
                    if dt.as_str() != rdf::LANG_STRING && dt.as_str() != rdf::DIR_LANG_STRING {
                        return Err(RdfError::InvalidLiteral(format!(
                            "a literal cannot carry both datatype {} and language '{}'",
                            dt, tag
                        )));
                    }
                }
                let (language, direction) = Direction::split_tag(tag)?;
                match direction {
                    Some(direction) => {
                        Self::new_directional_language_tagged_literal(value, language, direction)
                    }
                    None => Self::new_language_tagged_literal(value, language),
                }
            }
        }
    }

    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> RdfResult<Self> {
        Ok(Self {
            value: non_empty(value.into())?,
            datatype: None,
            language: None,
            direction: None,
        })
    }

    /// Create a typed literal
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> RdfResult<Self> {
        if datatype.as_str() == rdf::LANG_STRING || datatype.as_str() == rdf::DIR_LANG_STRING {
            return Err(RdfError::InvalidLiteral(format!(
                "datatype {} requires a language tag",
                datatype
            )));
        }
        Ok(Self {
            value: non_empty(value.into())?,
            datatype: Some(datatype),
            language: None,
            direction: None,
        })
    }

    /// Create a literal with language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        let language = language.into();
        validate_language(&language)?;
        Ok(Self {
            value: non_empty(value.into())?,
            datatype: None,
            language: Some(language),
            direction: None,
        })
    }

    /// Create a literal with language tag and base direction
    pub fn new_directional_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
        direction: Direction,
    ) -> RdfResult<Self> {
        let mut literal = Self::new_language_tagged_literal(value, language)?;
        literal.direction = Some(direction);
        Ok(literal)
    }

    pub(crate) fn typed_unchecked(value: impl Into<String>, datatype: &str) -> Self {
        Self {
            value: value.into(),
            datatype: Some(NamedNode::new_unchecked(datatype)),
            language: None,
            direction: None,
        }
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Get the base direction if present
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Get the datatype exactly as supplied at construction
    pub fn explicit_datatype(&self) -> Option<&NamedNode> {
        self.datatype.as_ref()
    }

    /// Get the effective datatype IRI
    pub fn datatype_iri(&self) -> &str {
        match (&self.datatype, &self.language, &self.direction) {
            (Some(dt), _, _) => dt.as_str(),
            (None, Some(_), Some(_)) => rdf::DIR_LANG_STRING,
            (None, Some(_), None) => rdf::LANG_STRING,
            (None, None, _) => xsd::STRING,
        }
    }

    /// Get the effective datatype
    pub fn datatype(&self) -> NamedNode {
        NamedNode::new_unchecked(self.datatype_iri())
    }

    /// Check whether this literal has the given effective datatype
    pub fn is_datatype(&self, iri: &str) -> bool {
        self.datatype_iri() == iri
    }

    /// Simple literal or `xsd:string`
    pub fn is_string(&self) -> bool {
        self.language.is_none() && self.datatype_iri() == xsd::STRING
    }

    /// Carries an XSD numeric datatype
    pub fn is_numeric(&self) -> bool {
        xsd::is_numeric(self.datatype_iri())
    }

    /// `lang--dir`, `lang`, or the empty string
    pub fn lang_dir_tag(&self) -> String {
        match (&self.language, self.direction) {
            (Some(lang), Some(dir)) => format!("{}--{}", lang, dir),
            (Some(lang), None) => lang.clone(),
            _ => String::new(),
        }
    }
}

fn non_empty(value: String) -> RdfResult<String> {
    if value.is_empty() {
        Err(RdfError::InvalidLiteral("literal value must not be empty".to_string()))
    } else {
        Ok(value)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, &self.value)?;
        if self.language.is_some() {
            write!(f, "@{}", self.lang_dir_tag())
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^{}", dt)
        } else {
            Ok(())
        }
    }
}

/// RDF-star quoted triple
///
/// Value type with no identity beyond its three components; any component may
/// itself be a quoted triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotedTriple {
    /// Subject
    pub subject: RdfTerm,
    /// Predicate
    pub predicate: RdfTerm,
    /// Object
    pub object: RdfTerm,
}

impl QuotedTriple {
    /// Create a new quoted triple
    pub fn new(subject: impl Into<RdfTerm>, predicate: impl Into<RdfTerm>, object: impl Into<RdfTerm>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Nesting depth; a triple of plain terms has depth 1
    pub fn depth(&self) -> usize {
        1 + [&self.subject, &self.predicate, &self.object]
            .iter()
            .map(|t| match t {
                RdfTerm::Triple(inner) => inner.depth(),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for QuotedTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<< {} {} {} >>", self.subject, self.predicate, self.object)
    }
}

/// RDF term (any RDF value)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RdfTerm {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
    /// Quoted triple (RDF-star)
    Triple(Box<QuotedTriple>),
}

impl RdfTerm {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfTerm::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfTerm::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfTerm::Literal(_))
    }

    /// Check if this is a quoted triple
    pub fn is_triple(&self) -> bool {
        matches!(self, RdfTerm::Triple(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            RdfTerm::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            RdfTerm::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_triple(&self) -> Option<&QuotedTriple> {
        match self {
            RdfTerm::Triple(t) => Some(t),
            _ => None,
        }
    }

    /// Structural term identity (`sameTerm`)
    pub fn same_term(&self, other: &RdfTerm) -> bool {
        self == other
    }

    /// String form used when comparing terms of unrelated kinds
    pub fn string_form(&self) -> String {
        match self {
            RdfTerm::NamedNode(n) => n.as_str().to_string(),
            RdfTerm::BlankNode(b) => b.as_str().to_string(),
            RdfTerm::Literal(l) => l.value().to_string(),
            RdfTerm::Triple(t) => t.to_string(),
        }
    }
}

impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfTerm::NamedNode(n) => write!(f, "{}", n),
            RdfTerm::BlankNode(b) => write!(f, "{}", b),
            RdfTerm::Literal(l) => write!(f, "{}", l),
            RdfTerm::Triple(t) => write!(f, "{}", t),
        }
    }
}

impl From<NamedNode> for RdfTerm {
    fn from(node: NamedNode) -> Self {
        RdfTerm::NamedNode(node)
    }
}

impl From<BlankNode> for RdfTerm {
    fn from(node: BlankNode) -> Self {
        RdfTerm::BlankNode(node)
    }
}

impl From<Literal> for RdfTerm {
    fn from(lit: Literal) -> Self {
        RdfTerm::Literal(lit)
    }
}

impl From<QuotedTriple> for RdfTerm {
    fn from(triple: QuotedTriple) -> Self {
        RdfTerm::Triple(Box::new(triple))
    }
}

// oxrdf interop, for evaluators built on oxrdf/spargebra terms

impl From<oxrdf::NamedNode> for NamedNode {
    fn from(node: oxrdf::NamedNode) -> Self {
        Self(node.into_string())
    }
}

impl From<NamedNode> for oxrdf::NamedNode {
    fn from(node: NamedNode) -> Self {
        oxrdf::NamedNode::new_unchecked(node.0)
    }
}

impl From<oxrdf::BlankNode> for BlankNode {
    fn from(node: oxrdf::BlankNode) -> Self {
        Self(node.as_str().to_string())
    }
}

impl From<BlankNode> for oxrdf::BlankNode {
    fn from(node: BlankNode) -> Self {
        oxrdf::BlankNode::new_unchecked(node.0)
    }
}

impl TryFrom<oxrdf::Literal> for Literal {
    type Error = RdfError;

    fn try_from(lit: oxrdf::Literal) -> RdfResult<Self> {
        if let Some(language) = lit.language() {
            Literal::new_language_tagged_literal(lit.value(), language)
        } else if lit.datatype().as_str() == xsd::STRING {
            Literal::new_simple_literal(lit.value())
        } else {
            Literal::new_typed_literal(lit.value(), NamedNode::new_unchecked(lit.datatype().as_str()))
        }
    }
}

impl TryFrom<&Literal> for oxrdf::Literal {
    type Error = RdfError;

    fn try_from(lit: &Literal) -> RdfResult<Self> {
        match (&lit.language, lit.direction, &lit.datatype) {
            (Some(_), Some(_), _) => Err(RdfError::InvalidLiteral(format!(
                "directional literal {} has no oxrdf counterpart",
                lit
            ))),
            (Some(lang), None, _) => oxrdf::Literal::new_language_tagged_literal(lit.value(), lang)
                .map_err(|e| RdfError::InvalidLiteral(e.to_string())),
            (None, _, Some(dt)) => Ok(oxrdf::Literal::new_typed_literal(
                lit.value(),
                oxrdf::NamedNode::new_unchecked(dt.as_str()),
            )),
            (None, _, None) => Ok(oxrdf::Literal::new_simple_literal(lit.value())),
        }
    }
}

impl TryFrom<oxrdf::Triple> for QuotedTriple {
    type Error = RdfError;

    fn try_from(triple: oxrdf::Triple) -> RdfResult<Self> {
        let subject = match triple.subject {
            oxrdf::Subject::NamedNode(n) => RdfTerm::NamedNode(n.into()),
            oxrdf::Subject::BlankNode(b) => RdfTerm::BlankNode(b.into()),
            oxrdf::Subject::Triple(t) => QuotedTriple::try_from(*t)?.into(),
        };
        Ok(QuotedTriple::new(
            subject,
            NamedNode::from(triple.predicate),
            RdfTerm::try_from(triple.object)?,
        ))
    }
}

impl TryFrom<&QuotedTriple> for oxrdf::Triple {
    type Error = RdfError;

    fn try_from(triple: &QuotedTriple) -> RdfResult<Self> {
        let subject = match &triple.subject {
            RdfTerm::NamedNode(n) => oxrdf::Subject::NamedNode(n.clone().into()),
            RdfTerm::BlankNode(b) => oxrdf::Subject::BlankNode(b.clone().into()),
            RdfTerm::Triple(t) => oxrdf::Subject::Triple(Box::new(oxrdf::Triple::try_from(t.as_ref())?)),
            RdfTerm::Literal(l) => {
                return Err(RdfError::InvalidLiteral(format!("literal {} cannot be a subject", l)))
            }
        };
        let predicate = match &triple.predicate {
            RdfTerm::NamedNode(n) => oxrdf::NamedNode::from(n.clone()),
            other => return Err(RdfError::InvalidIri(format!("predicate {} is not an IRI", other))),
        };
        Ok(oxrdf::Triple::new(subject, predicate, oxrdf::Term::try_from(&triple.object)?))
    }
}

impl TryFrom<oxrdf::Term> for RdfTerm {
    type Error = RdfError;

    fn try_from(term: oxrdf::Term) -> RdfResult<Self> {
        Ok(match term {
            oxrdf::Term::NamedNode(n) => RdfTerm::NamedNode(n.into()),
            oxrdf::Term::BlankNode(b) => RdfTerm::BlankNode(b.into()),
            oxrdf::Term::Literal(l) => RdfTerm::Literal(l.try_into()?),
            oxrdf::Term::Triple(t) => QuotedTriple::try_from(*t)?.into(),
        })
    }
}

impl TryFrom<&RdfTerm> for oxrdf::Term {
    type Error = RdfError;

    fn try_from(term: &RdfTerm) -> RdfResult<Self> {
        Ok(match term {
            RdfTerm::NamedNode(n) => oxrdf::Term::NamedNode(n.clone().into()),
            RdfTerm::BlankNode(b) => oxrdf::Term::BlankNode(b.clone().into()),
            RdfTerm::Literal(l) => oxrdf::Term::Literal(l.try_into()?),
            RdfTerm::Triple(t) => oxrdf::Term::Triple(Box::new(t.as_ref().try_into()?)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> NamedNode {
        NamedNode::new(s).unwrap()
    }

    #[test]
    fn test_named_node() {
        let node = iri("http://example.org/alice");
        assert_eq!(node.as_str(), "http://example.org/alice");
        assert_eq!(node.to_string(), "<http://example.org/alice>");
        assert!(NamedNode::new("not an iri").is_err());
        assert_eq!(NamedNode::expand("xsd:integer").unwrap().as_str(), xsd::INTEGER);
    }

    #[test]
    fn test_blank_node() {
        let node1 = BlankNode::new();
        let node2 = BlankNode::new();
        assert_ne!(node1, node2);

        let labeled: BlankNode = "b0".parse().unwrap();
        assert_eq!(labeled.to_string(), "_:b0");
        assert!("".parse::<BlankNode>().is_err());
        assert!("a b".parse::<BlankNode>().is_err());
    }

    #[test]
    fn test_literal() {
        let lit = Literal::new_simple_literal("Alice").unwrap();
        assert_eq!(lit.value(), "Alice");
        assert_eq!(lit.datatype_iri(), xsd::STRING);
        assert!(lit.explicit_datatype().is_none());

        let lit = Literal::new_language_tagged_literal("Alice", "en").unwrap();
        assert_eq!(lit.language(), Some("en"));
        assert_eq!(lit.datatype_iri(), rdf::LANG_STRING);

        let lit = Literal::new("مرحبا", None, Some("ar--rtl")).unwrap();
        assert_eq!(lit.language(), Some("ar"));
        assert_eq!(lit.direction(), Some(Direction::Rtl));
        assert_eq!(lit.datatype_iri(), rdf::DIR_LANG_STRING);
        assert_eq!(lit.lang_dir_tag(), "ar--rtl");
    }

    #[test]
    fn test_literal_validation() {
        assert!(Literal::new_simple_literal("").is_err());
        assert!(Literal::new("42", Some("xsd:integer"), Some("en")).is_err());
        assert!(Literal::new("x", None, Some("en--up")).is_err());
        assert!(Literal::new_typed_literal("x", iri(rdf::LANG_STRING)).is_err());
        assert!(Literal::new_language_tagged_literal("x", "not a tag").is_err());
    }

    #[test]
    fn test_same_term_vs_implicit_string() {
        let plain = Literal::new("a", None, None).unwrap();
        let typed = Literal::new("a", Some("xsd:string"), None).unwrap();
        assert!(plain.is_string() && typed.is_string());
        assert_ne!(RdfTerm::from(plain), RdfTerm::from(typed));
    }

    #[test]
    fn test_literal_display() {
        let lit = Literal::new("say \"hi\"", None, Some("en--ltr")).unwrap();
        assert_eq!(lit.to_string(), "\"say \\\"hi\\\"\"@en--ltr");
        let lit = Literal::new("1", Some("xsd:integer"), None).unwrap();
        assert_eq!(lit.to_string(), format!("\"1\"^^<{}>", xsd::INTEGER));
    }

    #[test]
    fn test_quoted_triple_display_and_depth() {
        let inner = QuotedTriple::new(
            iri("http://example.org/s"),
            iri("http://example.org/p"),
            Literal::new_simple_literal("o").unwrap(),
        );
        let outer = QuotedTriple::new(inner, iri("http://example.org/says"), BlankNode::from_str("b1").unwrap());
        assert_eq!(outer.depth(), 2);
        assert_eq!(
            outer.to_string(),
            "<< << <http://example.org/s> <http://example.org/p> \"o\" >> <http://example.org/says> _:b1 >>"
        );
    }

    #[test]
    fn test_oxrdf_round_trip() {
        let triple = QuotedTriple::new(
            iri("http://example.org/s"),
            iri("http://example.org/p"),
            Literal::new_language_tagged_literal("hello", "en").unwrap(),
        );
        let term = RdfTerm::from(triple);
        let ox = oxrdf::Term::try_from(&term).unwrap();
        assert_eq!(RdfTerm::try_from(ox).unwrap(), term);
    }

    #[test]
    fn test_oxrdf_rejects_directional() {
        let lit = Literal::new("x", None, Some("he--rtl")).unwrap();
        assert!(oxrdf::Literal::try_from(&lit).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let lit: Literal = serde_json::from_str(r#"{"value":"x","language":"ar","direction":"rtl"}"#).unwrap();
        assert_eq!(lit.lang_dir_tag(), "ar--rtl");

        assert!(serde_json::from_str::<Literal>(r#"{"value":""}"#).is_err());
        assert!(serde_json::from_str::<Literal>(
            r#"{"value":"x","datatype":"http://www.w3.org/2001/XMLSchema#integer","language":"en"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Literal>(r#"{"value":"x","direction":"ltr"}"#).is_err());
        assert!(serde_json::from_str::<Literal>(r#"{"value":"x","language":"e n"}"#).is_err());
        assert!(serde_json::from_str::<NamedNode>(r#""not an iri""#).is_err());
        assert!(serde_json::from_str::<BlankNode>(r#""-b0""#).is_err());
    }
}
