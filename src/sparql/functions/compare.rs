//! Value comparison operators and `sameTerm`

use super::duration::{parse_day_time_duration, parse_year_month_duration};
use super::numeric::{format_double, numeric_value};
use super::temporal::{TemporalKind, TemporalValue};
use crate::rdf::namespace::xsd;
use crate::rdf::{Literal, RdfTerm};
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;
use std::cmp::Ordering;
use std::str::FromStr;

/// SPARQL comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    /// Apply to an ordering; `None` (incomparable, e.g. NaN) only satisfies `!=`
    fn holds(&self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (CompareOp::Ne, ord) => ord != Some(Ordering::Equal),
            (_, None) => false,
            (CompareOp::Eq, Some(ord)) => ord == Ordering::Equal,
            (CompareOp::Lt, Some(ord)) => ord == Ordering::Less,
            (CompareOp::Gt, Some(ord)) => ord == Ordering::Greater,
            (CompareOp::Le, Some(ord)) => ord != Ordering::Greater,
            (CompareOp::Ge, Some(ord)) => ord != Ordering::Less,
        }
    }
}

impl FromStr for CompareOp {
    type Err = FunctionError;

    fn from_str(s: &str) -> FunctionResult<Self> {
        match s {
            "=" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::Ne),
            "<" => Ok(CompareOp::Lt),
            ">" => Ok(CompareOp::Gt),
            "<=" => Ok(CompareOp::Le),
            ">=" => Ok(CompareOp::Ge),
            other => Err(FunctionError::Argument(format!("unsupported comparison operator '{}'", other))),
        }
    }
}

fn string_form(value: &ExprValue) -> FunctionResult<String> {
    match value {
        ExprValue::Term(term) => Ok(term.string_form()),
        ExprValue::String(s) => Ok(s.clone()),
        ExprValue::Integer(i) => Ok(i.to_string()),
        ExprValue::Float(f) => Ok(format_double(*f)),
        ExprValue::Boolean(b) => Ok(b.to_string()),
        ExprValue::Unbound => Err(FunctionError::Argument("cannot compare an unbound value".to_string())),
    }
}

fn both_typed<'a>(a: &'a ExprValue, b: &'a ExprValue, datatype: &str) -> Option<(&'a Literal, &'a Literal)> {
    match (a.as_literal(), b.as_literal()) {
        (Some(x), Some(y)) if x.is_datatype(datatype) && y.is_datatype(datatype) => Some((x, y)),
        _ => None,
    }
}

/// Ordering of two values under SPARQL value comparison
///
/// Durations compare by magnitude, same-kind temporal values by instant,
/// numbers numerically; everything else by string form.
pub fn value_ordering(a: &ExprValue, b: &ExprValue) -> FunctionResult<Option<Ordering>> {
    if let Some((x, y)) = both_typed(a, b, xsd::DAY_TIME_DURATION) {
        let x = parse_day_time_duration(x.value())?;
        let y = parse_day_time_duration(y.value())?;
        return Ok(Some(x.cmp(&y)));
    }
    if let Some((x, y)) = both_typed(a, b, xsd::YEAR_MONTH_DURATION) {
        let x = parse_year_month_duration(x.value())?;
        let y = parse_year_month_duration(y.value())?;
        return Ok(Some(x.cmp(&y)));
    }
    if let (Some(x), Some(y)) = (a.as_literal(), b.as_literal()) {
        if let Some(kind) = TemporalKind::from_datatype(x.datatype_iri()) {
            if y.is_datatype(kind.datatype()) {
                let x = TemporalValue::parse(x.value(), kind)?;
                let y = TemporalValue::parse(y.value(), kind)?;
                return Ok(Some(x.compare(&y)));
            }
        }
    }
    if let (Some(x), Some(y)) = (numeric_value(a), numeric_value(b)) {
        return Ok(x.partial_cmp(&y));
    }
    Ok(Some(string_form(a)?.cmp(&string_form(b)?)))
}

/// Compare two values with an operator given as text (`=`, `!=`, `<`, `>`, `<=`, `>=`)
pub fn compare(a: &ExprValue, b: &ExprValue, op: &str) -> FunctionResult<bool> {
    compare_with(a, b, op.parse()?)
}

pub fn compare_with(a: &ExprValue, b: &ExprValue, op: CompareOp) -> FunctionResult<bool> {
    Ok(op.holds(value_ordering(a, b)?))
}

/// `sameTerm` over possibly-unbound terms: two unbound values are the same
pub fn same_term_opt(a: Option<&RdfTerm>, b: Option<&RdfTerm>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.same_term(y),
        _ => false,
    }
}

/// `sameTerm` over argument values
pub fn same_term(a: &ExprValue, b: &ExprValue) -> bool {
    match (a, b) {
        (ExprValue::Term(x), ExprValue::Term(y)) => x.same_term(y),
        (ExprValue::Unbound, _) | (_, ExprValue::Unbound) => a.is_unbound() && b.is_unbound(),
        (ExprValue::String(x), ExprValue::String(y)) => x == y,
        _ => match (a.to_term(), b.to_term()) {
            (Some(x), Some(y)) => x.same_term(&y),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::NamedNode;

    fn typed(value: &str, datatype: &str) -> ExprValue {
        Literal::new(value, Some(datatype), None).unwrap().into()
    }

    #[test]
    fn test_numeric_coercion() {
        let a = typed("42", "xsd:integer");
        let b = typed("42.0", "xsd:decimal");
        assert!(compare(&a, &b, "=").unwrap());
        assert!(!same_term(&a, &b));
        assert!(compare(&typed("9", "xsd:integer"), &typed("10", "xsd:integer"), "<").unwrap());
        assert!(compare(&ExprValue::Integer(3), &typed("2.5E0", "xsd:double"), ">=").unwrap());
    }

    #[test]
    fn test_nan_is_only_unequal() {
        let nan = typed("NaN", "xsd:double");
        assert!(!compare(&nan, &nan, "=").unwrap());
        assert!(compare(&nan, &nan, "!=").unwrap());
        assert!(!compare(&nan, &ExprValue::Integer(1), "<").unwrap());
    }

    #[test]
    fn test_duration_comparison() {
        let day = typed("P1D", "xsd:dayTimeDuration");
        let hours = typed("PT25H", "xsd:dayTimeDuration");
        assert!(compare(&day, &hours, "<").unwrap());
        assert!(compare(&typed("PT24H", "xsd:dayTimeDuration"), &day, "=").unwrap());
        assert!(compare(&typed("P1Y", "xsd:yearMonthDuration"), &typed("P12M", "xsd:yearMonthDuration"), "=").unwrap());
    }

    #[test]
    fn test_temporal_comparison() {
        let a = typed("2025-01-01T12:00:00+02:00", "xsd:dateTime");
        let b = typed("2025-01-01T10:00:00Z", "xsd:dateTime");
        assert!(compare(&a, &b, "=").unwrap());
        assert!(compare(&typed("2024-12-31", "xsd:date"), &typed("2025-01-01", "xsd:date"), "<").unwrap());
    }

    #[test]
    fn test_string_forms() {
        let iri = ExprValue::from(NamedNode::new("http://example.org/a").unwrap());
        assert!(compare(&iri, &"http://example.org/a".into(), "=").unwrap());
        assert!(compare(&"apple".into(), &"banana".into(), "<").unwrap());
        assert!(compare(&typed("abc", "xsd:string"), &"abc".into(), "=").unwrap());
    }

    #[test]
    fn test_unknown_operator() {
        assert!(matches!(
            compare(&ExprValue::Integer(1), &ExprValue::Integer(1), "=="),
            Err(FunctionError::Argument(_))
        ));
    }

    #[test]
    fn test_same_term_unbound() {
        assert!(same_term(&ExprValue::Unbound, &ExprValue::Unbound));
        assert!(!same_term(&ExprValue::Unbound, &"a".into()));
        assert!(same_term_opt(None, None));
        let t = RdfTerm::from(NamedNode::new("http://example.org/x").unwrap());
        assert!(!same_term_opt(Some(&t), None));
        assert!(same_term_opt(Some(&t), Some(&t.clone())));
    }

    #[test]
    fn test_same_term_primitives() {
        let simple: ExprValue = Literal::new_simple_literal("a").unwrap().into();
        assert!(same_term(&"a".into(), &simple));
        assert!(!same_term(&"a".into(), &typed("a", "xsd:string")));
        assert!(same_term(&ExprValue::Integer(5), &typed("5", "xsd:integer")));
    }
}
