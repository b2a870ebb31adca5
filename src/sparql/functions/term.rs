//! Term functions: accessors, type tests, constructors and RDF-star triples

use crate::rdf::namespace::xsd;
use crate::rdf::{BlankNode, Direction, Literal, NamedNode, QuotedTriple, RdfTerm};
use crate::sparql::config::FunctionContext;
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;
use oxiri::Iri;
use uuid::Uuid;

/// `STR`: lexical form of a literal, or the text of an IRI
pub fn str_of(value: &ExprValue) -> FunctionResult<ExprValue> {
    match value {
        ExprValue::Term(RdfTerm::NamedNode(node)) => ExprValue::simple(node.as_str()),
        ExprValue::Term(RdfTerm::Literal(l)) => ExprValue::simple(l.value()),
        ExprValue::Term(_) | ExprValue::Unbound => {
            Err(FunctionError::Argument(format!("STR is not defined on {}", value)))
        }
        other => ExprValue::simple(other.lexical("STR")?),
    }
}

/// `DATATYPE`: effective datatype IRI of a literal
pub fn datatype(value: &ExprValue) -> FunctionResult<ExprValue> {
    let iri = match value {
        ExprValue::Term(RdfTerm::Literal(l)) => l.datatype_iri(),
        ExprValue::String(_) => xsd::STRING,
        ExprValue::Integer(_) => xsd::INTEGER,
        ExprValue::Float(_) => xsd::DOUBLE,
        ExprValue::Boolean(_) => xsd::BOOLEAN,
        other => return Err(FunctionError::Argument(format!("DATATYPE expects a literal, got {}", other))),
    };
    Ok(NamedNode::new_unchecked(iri).into())
}

/// `IRI`/`URI`: an IRI from a string, resolved against the configured base
pub fn iri(value: &ExprValue, ctx: &FunctionContext) -> FunctionResult<ExprValue> {
    let text = match value {
        ExprValue::Term(RdfTerm::NamedNode(_)) => return Ok(value.clone()),
        ExprValue::Term(RdfTerm::BlankNode(_)) => {
            return Err(FunctionError::Argument("IRI cannot be applied to a blank node".to_string()))
        }
        other => other.string_arg("IRI")?.value,
    };
    let resolved = match &ctx.config.base_iri {
        Some(base) => {
            let base = Iri::parse(base.as_str())
                .map_err(|e| FunctionError::Validation(format!("invalid base IRI '{}': {}", base, e)))?;
            base.resolve(&text)
                .map_err(|e| FunctionError::Argument(format!("cannot resolve '{}': {}", text, e)))?
                .into_inner()
        }
        None => text.into_owned(),
    };
    Ok(NamedNode::new(resolved)?.into())
}

/// `BNODE`: a fresh blank node, or one labelled by the argument
pub fn bnode(label: Option<&ExprValue>) -> FunctionResult<ExprValue> {
    let node = match label {
        None | Some(ExprValue::Unbound) => BlankNode::new(),
        Some(label) => label.string_arg("BNODE")?.value.parse::<BlankNode>()?,
    };
    Ok(RdfTerm::from(node).into())
}

fn simple_lexical<'a>(value: &'a ExprValue, function: &str) -> FunctionResult<std::borrow::Cow<'a, str>> {
    let arg = value.string_arg(function)?;
    if arg.language.is_some() {
        return Err(FunctionError::Argument(format!(
            "{} expects a string without language tag, got {}",
            function, value
        )));
    }
    Ok(arg.value)
}

/// `STRDT(lexical, datatype)`
pub fn strdt(value: &ExprValue, datatype: &ExprValue) -> FunctionResult<ExprValue> {
    let lexical = simple_lexical(value, "STRDT")?;
    let datatype = match datatype {
        ExprValue::Term(RdfTerm::NamedNode(node)) => node.clone(),
        other => NamedNode::expand(&other.lexical("STRDT")?)?,
    };
    Ok(Literal::new_typed_literal(lexical, datatype)?.into())
}

/// `STRLANG(lexical, language)`
pub fn strlang(value: &ExprValue, language: &ExprValue) -> FunctionResult<ExprValue> {
    let lexical = simple_lexical(value, "STRLANG")?;
    let language = language.lexical("STRLANG")?;
    Ok(Literal::new_language_tagged_literal(lexical, language)?.into())
}

/// `STRLANGDIR(lexical, language, direction)`; direction must be `ltr` or `rtl`
pub fn strlangdir(value: &ExprValue, language: &ExprValue, direction: &ExprValue) -> FunctionResult<ExprValue> {
    let lexical = simple_lexical(value, "STRLANGDIR")?;
    let language = language.lexical("STRLANGDIR")?;
    let direction: Direction = direction.lexical("STRLANGDIR")?.parse()?;
    Ok(Literal::new_directional_language_tagged_literal(lexical, language, direction)?.into())
}

/// `UUID`: a fresh `urn:uuid:` IRI
pub fn uuid() -> ExprValue {
    NamedNode::new_unchecked(format!("urn:uuid:{}", Uuid::new_v4())).into()
}

/// `STRUUID`: a fresh UUID as a simple literal
pub fn struuid() -> FunctionResult<ExprValue> {
    ExprValue::simple(Uuid::new_v4().to_string())
}

pub fn is_iri(value: &ExprValue) -> bool {
    value.as_term().is_some_and(RdfTerm::is_named_node)
}

pub fn is_blank(value: &ExprValue) -> bool {
    value.as_term().is_some_and(RdfTerm::is_blank_node)
}

/// `isLITERAL`: literal terms and plain primitive values
pub fn is_literal(value: &ExprValue) -> bool {
    match value {
        ExprValue::Term(t) => t.is_literal(),
        ExprValue::Unbound => false,
        _ => true,
    }
}

pub fn is_triple(value: &ExprValue) -> bool {
    value.as_term().is_some_and(RdfTerm::is_triple)
}

pub fn bound(value: &ExprValue) -> bool {
    !value.is_unbound()
}

/// `TRIPLE(s, p, o)`: the subject may not be a literal, the predicate must be an IRI
pub fn triple(subject: &ExprValue, predicate: &ExprValue, object: &ExprValue) -> FunctionResult<ExprValue> {
    let subject = match subject {
        ExprValue::Term(t) if !t.is_literal() => t.clone(),
        other => {
            return Err(FunctionError::Argument(format!(
                "TRIPLE subject must be an IRI, blank node or triple, got {}",
                other
            )))
        }
    };
    let predicate = predicate
        .as_named_node()
        .cloned()
        .ok_or_else(|| FunctionError::Argument(format!("TRIPLE predicate must be an IRI, got {}", predicate)))?;
    let object = object
        .to_term()
        .ok_or_else(|| FunctionError::Argument(format!("TRIPLE object must be an RDF term, got {}", object)))?;
    Ok(RdfTerm::from(QuotedTriple::new(subject, predicate, object)).into())
}

fn triple_arg<'a>(value: &'a ExprValue, function: &str) -> FunctionResult<&'a QuotedTriple> {
    value
        .as_term()
        .and_then(RdfTerm::as_triple)
        .ok_or_else(|| FunctionError::Argument(format!("{} expects a quoted triple, got {}", function, value)))
}

pub fn subject(value: &ExprValue) -> FunctionResult<ExprValue> {
    Ok(triple_arg(value, "SUBJECT")?.subject.clone().into())
}

pub fn predicate(value: &ExprValue) -> FunctionResult<ExprValue> {
    Ok(triple_arg(value, "PREDICATE")?.predicate.clone().into())
}

pub fn object(value: &ExprValue) -> FunctionResult<ExprValue> {
    Ok(triple_arg(value, "OBJECT")?.object.clone().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::config::FunctionConfig;

    fn named(iri: &str) -> ExprValue {
        NamedNode::new(iri).unwrap().into()
    }

    #[test]
    fn test_str_and_datatype() {
        let lit: ExprValue = Literal::new("chat", None, Some("fr")).unwrap().into();
        let s = str_of(&lit).unwrap();
        assert_eq!(s.as_literal().unwrap().value(), "chat");
        assert_eq!(s.as_literal().unwrap().language(), None);
        assert_eq!(str_of(&named("http://example.org/")).unwrap().as_literal().unwrap().value(), "http://example.org/");
        assert!(str_of(&bnode(None).unwrap()).is_err());

        assert_eq!(datatype(&lit).unwrap(), named(crate::rdf::namespace::rdf::LANG_STRING));
        assert_eq!(datatype(&ExprValue::Integer(1)).unwrap(), named(xsd::INTEGER));
        assert!(datatype(&named("http://example.org/")).is_err());
    }

    #[test]
    fn test_iri() {
        let ctx = FunctionContext::default();
        assert_eq!(iri(&"http://example.org/a".into(), &ctx).unwrap(), named("http://example.org/a"));
        assert!(iri(&"relative".into(), &ctx).is_err());
        assert!(matches!(iri(&bnode(None).unwrap(), &ctx), Err(FunctionError::Argument(_))));

        let ctx = FunctionContext::new(FunctionConfig {
            base_iri: Some("http://example.org/base/".to_string()),
            ..FunctionConfig::default()
        });
        assert_eq!(iri(&"item".into(), &ctx).unwrap(), named("http://example.org/base/item"));
    }

    #[test]
    fn test_bnode() {
        let a = bnode(None).unwrap();
        let b = bnode(None).unwrap();
        assert!(is_blank(&a));
        assert_ne!(a, b);
        assert_eq!(bnode(Some(&"x1".into())).unwrap(), bnode(Some(&"x1".into())).unwrap());
    }

    #[test]
    fn test_constructors() {
        let r = strdt(&"42".into(), &"xsd:integer".into()).unwrap();
        assert_eq!(r.as_literal().unwrap().datatype_iri(), xsd::INTEGER);
        let r = strlang(&"chat".into(), &"fr".into()).unwrap();
        assert_eq!(r.as_literal().unwrap().language(), Some("fr"));
        let r = strlangdir(&"שלום".into(), &"he".into(), &"rtl".into()).unwrap();
        assert_eq!(r.as_literal().unwrap().direction(), Some(Direction::Rtl));
        assert!(matches!(
            strlangdir(&"x".into(), &"en".into(), &"up".into()),
            Err(FunctionError::Validation(_))
        ));
        assert!(strdt(&"".into(), &"xsd:string".into()).is_err());
    }

    #[test]
    fn test_uuid() {
        let u = uuid();
        assert!(u.as_named_node().unwrap().as_str().starts_with("urn:uuid:"));
        let s = struuid().unwrap();
        assert_eq!(s.as_literal().unwrap().value().len(), 36);
        assert_ne!(struuid().unwrap(), s);
    }

    #[test]
    fn test_type_tests() {
        assert!(is_iri(&named("http://example.org/")));
        assert!(is_literal(&ExprValue::Integer(1)));
        assert!(!is_literal(&ExprValue::Unbound));
        assert!(!bound(&ExprValue::Unbound));
        assert!(bound(&"x".into()));
    }

    #[test]
    fn test_triple_accessors() {
        let t = triple(&named("http://example.org/s"), &named("http://example.org/p"), &ExprValue::Integer(7)).unwrap();
        assert!(is_triple(&t));
        assert_eq!(subject(&t).unwrap(), named("http://example.org/s"));
        assert_eq!(predicate(&t).unwrap(), named("http://example.org/p"));
        assert_eq!(object(&t).unwrap().as_literal().unwrap().value(), "7");

        let nested = triple(&t, &named("http://example.org/q"), &"o".into()).unwrap();
        assert_eq!(subject(&nested).unwrap(), t);
        assert!(triple(&"lit".into(), &named("http://example.org/p"), &"o".into()).is_err());
        assert!(triple(&named("http://example.org/s"), &"p".into(), &"o".into()).is_err());
        assert!(subject(&named("http://example.org/s")).is_err());
    }
}
