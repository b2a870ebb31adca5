//! Numeric built-ins: ABS, ROUND, CEIL, FLOOR, RAND, isNUMERIC
//!
//! Typed numeric literals keep their datatype family in the result (derived
//! integer types promote to `xsd:integer`); primitive numbers stay primitive.

use crate::rdf::namespace::xsd;
use crate::rdf::RdfTerm;
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;

/// Numeric value of a number or numeric-typed literal, parsed locale-independently
pub fn numeric_value(value: &ExprValue) -> Option<f64> {
    match value {
        ExprValue::Integer(i) => Some(*i as f64),
        ExprValue::Float(f) => Some(*f),
        ExprValue::Term(RdfTerm::Literal(l)) if l.is_numeric() => l.value().trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Canonical `xsd:decimal` lexical form of a finite float
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Canonical `xsd:double` lexical form (`4.2E1`, `INF`, `NaN`)
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let formatted = format!("{:E}", value);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => format!("{}.0E{}", mantissa, exponent),
        _ => formatted,
    }
}

fn numeric_unary(
    value: &ExprValue,
    function: &str,
    on_integer: fn(i64) -> Option<i64>,
    on_float: fn(f64) -> f64,
) -> FunctionResult<ExprValue> {
    let not_numeric = || FunctionError::Argument(format!("{} expects a numeric argument, got {}", function, value));
    match value {
        ExprValue::Integer(i) => on_integer(*i)
            .map(ExprValue::Integer)
            .ok_or_else(|| FunctionError::Arithmetic(format!("{} overflow on {}", function, i))),
        ExprValue::Float(f) => Ok(ExprValue::Float(on_float(*f))),
        ExprValue::Term(RdfTerm::Literal(l)) if l.is_numeric() => {
            let datatype = l.datatype_iri();
            let lexical = l.value().trim();
            if xsd::is_integer(datatype) {
                let i = lexical.parse::<i64>().map_err(|_| not_numeric())?;
                let result = on_integer(i)
                    .ok_or_else(|| FunctionError::Arithmetic(format!("{} overflow on {}", function, i)))?;
                Ok(ExprValue::typed(result.to_string(), xsd::INTEGER))
            } else {
                let f = lexical.parse::<f64>().map_err(|_| not_numeric())?;
                let result = on_float(f);
                if datatype == xsd::DECIMAL {
                    Ok(ExprValue::typed(format_decimal(result), xsd::DECIMAL))
                } else {
                    Ok(ExprValue::typed(format_double(result), datatype))
                }
            }
        }
        _ => Err(not_numeric()),
    }
}

pub fn abs(value: &ExprValue) -> FunctionResult<ExprValue> {
    numeric_unary(value, "ABS", i64::checked_abs, f64::abs)
}

/// Round half toward positive infinity
pub fn round(value: &ExprValue) -> FunctionResult<ExprValue> {
    numeric_unary(value, "ROUND", Some, |f| (f + 0.5).floor())
}

pub fn ceil(value: &ExprValue) -> FunctionResult<ExprValue> {
    numeric_unary(value, "CEIL", Some, f64::ceil)
}

pub fn floor(value: &ExprValue) -> FunctionResult<ExprValue> {
    numeric_unary(value, "FLOOR", Some, f64::floor)
}

/// Uniform random double in [0, 1)
pub fn rand() -> ExprValue {
    ExprValue::Float(rand::random::<f64>())
}

pub fn is_numeric(value: &ExprValue) -> bool {
    numeric_value(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    fn typed(value: &str, datatype: &str) -> ExprValue {
        Literal::new(value, Some(datatype), None).unwrap().into()
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value(&typed("42", "xsd:integer")), Some(42.0));
        assert_eq!(numeric_value(&typed("42.5", "xsd:decimal")), Some(42.5));
        assert_eq!(numeric_value(&typed("1.5E2", "xsd:double")), Some(150.0));
        assert_eq!(numeric_value(&typed("7", "http://www.w3.org/2001/XMLSchema#int")), Some(7.0));
        assert_eq!(numeric_value(&ExprValue::from("42")), None);
        assert_eq!(numeric_value(&typed("abc", "xsd:integer")), None);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_decimal(42.0), "42.0");
        assert_eq!(format_decimal(-0.25), "-0.25");
        assert_eq!(format_double(42.0), "4.2E1");
        assert_eq!(format_double(1.0), "1.0E0");
        assert_eq!(format_double(f64::NEG_INFINITY), "-INF");
        assert_eq!(format_double(f64::NAN), "NaN");
    }

    #[test]
    fn test_rounding_functions() {
        assert_eq!(round(&ExprValue::Float(2.5)).unwrap(), ExprValue::Float(3.0));
        assert_eq!(round(&ExprValue::Float(-2.5)).unwrap(), ExprValue::Float(-2.0));
        assert_eq!(ceil(&ExprValue::Float(1.1)).unwrap(), ExprValue::Float(2.0));
        assert_eq!(floor(&ExprValue::Float(-1.1)).unwrap(), ExprValue::Float(-2.0));
        assert_eq!(abs(&ExprValue::Integer(-7)).unwrap(), ExprValue::Integer(7));
    }

    #[test]
    fn test_literal_datatype_preserved() {
        let r = round(&typed("2.4", "xsd:decimal")).unwrap();
        let lit = r.as_literal().unwrap();
        assert_eq!(lit.value(), "2.0");
        assert_eq!(lit.datatype_iri(), xsd::DECIMAL);

        let r = abs(&typed("-3", "http://www.w3.org/2001/XMLSchema#short")).unwrap();
        assert_eq!(r.as_literal().unwrap().value(), "3");
        assert_eq!(r.as_literal().unwrap().datatype_iri(), xsd::INTEGER);

        let r = floor(&typed("1.5E0", "xsd:double")).unwrap();
        assert_eq!(r.as_literal().unwrap().value(), "1.0E0");
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(matches!(abs(&ExprValue::from("x")), Err(FunctionError::Argument(_))));
        assert!(matches!(abs(&ExprValue::Integer(i64::MIN)), Err(FunctionError::Arithmetic(_))));
    }

    #[test]
    fn test_rand_range() {
        for _ in 0..100 {
            let r = rand().as_float().unwrap();
            assert!((0.0..1.0).contains(&r));
        }
    }
}
