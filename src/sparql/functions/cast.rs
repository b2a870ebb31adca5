//! XSD constructor casts: `xsd:integer(x)`, `xsd:dateTime(x)`, ...
//!
//! Each cast validates the source lexical form against the target grammar
//! and returns a literal in the target's canonical form.

use super::duration::{
    format_day_time_duration, format_year_month_duration, parse_day_time_duration, parse_duration,
    parse_year_month_duration,
};
use super::numeric::{format_decimal, format_double};
use super::temporal::{TemporalKind, TemporalValue};
use crate::rdf::namespace::{xsd, NamespaceManager};
use crate::rdf::RdfTerm;
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;
use chrono::NaiveTime;
use std::borrow::Cow;

/// Cast targets supported by [`cast`]
pub const CAST_TARGETS: &[&str] = &[
    xsd::STRING,
    xsd::BOOLEAN,
    xsd::INTEGER,
    xsd::DECIMAL,
    xsd::DOUBLE,
    xsd::FLOAT,
    xsd::DATE_TIME,
    xsd::DATE,
    xsd::TIME,
    xsd::DAY_TIME_DURATION,
    xsd::YEAR_MONTH_DURATION,
];

/// Lexical form and datatype of a cast source
struct Source<'a> {
    lexical: Cow<'a, str>,
    datatype: &'a str,
}

impl<'a> Source<'a> {
    fn of(value: &'a ExprValue, target: &str) -> FunctionResult<Self> {
        let (lexical, datatype) = match value {
            ExprValue::Term(RdfTerm::Literal(l)) => (Cow::Borrowed(l.value()), l.datatype_iri()),
            ExprValue::String(s) => (Cow::Borrowed(s.as_str()), xsd::STRING),
            ExprValue::Integer(i) => (Cow::Owned(i.to_string()), xsd::INTEGER),
            ExprValue::Float(f) => (Cow::Owned(format_double(*f)), xsd::DOUBLE),
            ExprValue::Boolean(b) => (Cow::Owned(b.to_string()), xsd::BOOLEAN),
            other => {
                return Err(FunctionError::cast(target, &other.to_string(), "only literals can be cast"))
            }
        };
        Ok(Self { lexical, datatype })
    }

    fn text(&self) -> &str {
        self.lexical.trim()
    }

    fn is_string(&self) -> bool {
        self.datatype == xsd::STRING
    }

    fn is(&self, datatype: &str) -> bool {
        self.datatype == datatype
    }

    fn fail(&self, target: &str, reason: impl Into<String>) -> FunctionError {
        FunctionError::cast(target, &self.lexical, reason)
    }

    fn unsupported(&self, target: &str) -> FunctionError {
        self.fail(target, format!("no cast from <{}>", self.datatype))
    }
}

/// Cast `value` to the XSD datatype `target`, given as a full IRI or `xsd:` name
pub fn cast(target: &str, value: &ExprValue) -> FunctionResult<ExprValue> {
    let target = NamespaceManager::common().expand_or_keep(target);
    match target.as_str() {
        xsd::STRING => to_string(value),
        xsd::BOOLEAN => to_boolean(value),
        xsd::INTEGER => to_integer(value),
        xsd::DECIMAL => to_decimal(value),
        xsd::DOUBLE => to_double(value),
        xsd::FLOAT => to_float(value),
        xsd::DATE_TIME => to_temporal(value, TemporalKind::DateTime),
        xsd::DATE => to_temporal(value, TemporalKind::Date),
        xsd::TIME => to_temporal(value, TemporalKind::Time),
        xsd::DAY_TIME_DURATION => to_day_time_duration(value),
        xsd::YEAR_MONTH_DURATION => to_year_month_duration(value),
        other => Err(FunctionError::Argument(format!("unsupported cast target <{}>", other))),
    }
}

/// `xsd:string`: lexical form of a literal, or the IRI text of a named node
pub fn to_string(value: &ExprValue) -> FunctionResult<ExprValue> {
    let text = match value.as_named_node() {
        Some(node) => node.as_str().to_string(),
        None => Source::of(value, xsd::STRING)?.lexical.into_owned(),
    };
    if text.is_empty() {
        return Ok(ExprValue::String(text));
    }
    Ok(ExprValue::typed(text, xsd::STRING))
}

pub fn to_boolean(value: &ExprValue) -> FunctionResult<ExprValue> {
    let source = Source::of(value, xsd::BOOLEAN)?;
    let result = if source.is_string() || source.is(xsd::BOOLEAN) {
        match source.text() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => return Err(source.fail(xsd::BOOLEAN, "expected true, false, 1 or 0")),
        }
    } else if xsd::is_numeric(source.datatype) {
        let number = parse_xsd_double(source.text()).ok_or_else(|| source.fail(xsd::BOOLEAN, "not a number"))?;
        !(number == 0.0 || number.is_nan())
    } else {
        return Err(source.unsupported(xsd::BOOLEAN));
    };
    Ok(ExprValue::typed(result.to_string(), xsd::BOOLEAN))
}

fn is_integer_lexical(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Canonical `xsd:decimal` form of a valid decimal lexical, or `None`
fn canonical_decimal(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole = whole.trim_start_matches('0');
    let fraction = fraction.trim_end_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    let sign = if negative && (whole != "0" || fraction != "0") { "-" } else { "" };
    Some(format!("{}{}.{}", sign, whole, fraction))
}

/// Parse the XSD double grammar, including `INF`, `-INF` and `NaN`
fn parse_xsd_double(text: &str) -> Option<f64> {
    match text {
        "INF" | "+INF" => return Some(f64::INFINITY),
        "-INF" => return Some(f64::NEG_INFINITY),
        "NaN" => return Some(f64::NAN),
        _ => {}
    }
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(pos) => (&text[..pos], Some(&text[pos + 1..])),
        None => (text, None),
    };
    if canonical_decimal(mantissa).is_none() {
        return None;
    }
    if let Some(exponent) = exponent {
        if !is_integer_lexical(exponent) {
            return None;
        }
    }
    text.parse::<f64>().ok()
}

pub fn to_integer(value: &ExprValue) -> FunctionResult<ExprValue> {
    let source = Source::of(value, xsd::INTEGER)?;
    let text = source.text();
    let integer = if source.is_string() || xsd::is_integer(source.datatype) {
        if !is_integer_lexical(text) {
            return Err(source.fail(xsd::INTEGER, "not an integer"));
        }
        text.parse::<i64>()
            .map_err(|_| source.fail(xsd::INTEGER, "out of the 64-bit range"))?
    } else if xsd::is_numeric(source.datatype) {
        let number = parse_xsd_double(text).ok_or_else(|| source.fail(xsd::INTEGER, "not a number"))?;
        if !number.is_finite() {
            return Err(source.fail(xsd::INTEGER, "not a finite number"));
        }
        let truncated = number.trunc();
        if truncated.abs() >= i64::MAX as f64 {
            return Err(source.fail(xsd::INTEGER, "out of the 64-bit range"));
        }
        truncated as i64
    } else if source.is(xsd::BOOLEAN) {
        match text {
            "true" | "1" => 1,
            "false" | "0" => 0,
            _ => return Err(source.fail(xsd::INTEGER, "invalid boolean")),
        }
    } else {
        return Err(source.unsupported(xsd::INTEGER));
    };
    Ok(ExprValue::typed(integer.to_string(), xsd::INTEGER))
}

pub fn to_decimal(value: &ExprValue) -> FunctionResult<ExprValue> {
    let source = Source::of(value, xsd::DECIMAL)?;
    let text = source.text();
    let lexical = if source.is_string() || source.is(xsd::DECIMAL) || xsd::is_integer(source.datatype) {
        canonical_decimal(text).ok_or_else(|| source.fail(xsd::DECIMAL, "not a decimal"))?
    } else if xsd::is_numeric(source.datatype) {
        let number = parse_xsd_double(text).ok_or_else(|| source.fail(xsd::DECIMAL, "not a number"))?;
        if !number.is_finite() {
            return Err(source.fail(xsd::DECIMAL, "not a finite number"));
        }
        format_decimal(number)
    } else if source.is(xsd::BOOLEAN) {
        match text {
            "true" | "1" => "1.0".to_string(),
            "false" | "0" => "0.0".to_string(),
            _ => return Err(source.fail(xsd::DECIMAL, "invalid boolean")),
        }
    } else {
        return Err(source.unsupported(xsd::DECIMAL));
    };
    Ok(ExprValue::typed(lexical, xsd::DECIMAL))
}

fn floating(value: &ExprValue, target: &str) -> FunctionResult<f64> {
    let source = Source::of(value, target)?;
    let text = source.text();
    if source.is_string() || xsd::is_numeric(source.datatype) {
        parse_xsd_double(text).ok_or_else(|| source.fail(target, "not a floating-point number"))
    } else if source.is(xsd::BOOLEAN) {
        match text {
            "true" | "1" => Ok(1.0),
            "false" | "0" => Ok(0.0),
            _ => Err(source.fail(target, "invalid boolean")),
        }
    } else {
        Err(source.unsupported(target))
    }
}

pub fn to_double(value: &ExprValue) -> FunctionResult<ExprValue> {
    let number = floating(value, xsd::DOUBLE)?;
    Ok(ExprValue::typed(format_double(number), xsd::DOUBLE))
}

/// `xsd:float`: rounded to single precision, printed with its shortest form
pub fn to_float(value: &ExprValue) -> FunctionResult<ExprValue> {
    let number = floating(value, xsd::FLOAT)? as f32;
    let lexical = if number.is_finite() {
        let formatted = format!("{:E}", number);
        match formatted.split_once('E') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => format!("{}.0E{}", mantissa, exponent),
            _ => formatted,
        }
    } else {
        format_double(number as f64)
    };
    Ok(ExprValue::typed(lexical, xsd::FLOAT))
}

pub fn to_temporal(value: &ExprValue, kind: TemporalKind) -> FunctionResult<ExprValue> {
    let target = kind.datatype();
    let source = Source::of(value, target)?;
    let text = source.text();
    let parsed = match TemporalKind::from_datatype(source.datatype) {
        _ if source.is_string() => TemporalValue::parse(text, kind)?,
        Some(from) if from == kind => TemporalValue::parse(text, kind)?,
        Some(TemporalKind::DateTime) if kind != TemporalKind::DateTime => {
            let date_time = TemporalValue::parse(text, TemporalKind::DateTime)?;
            let local = match kind {
                TemporalKind::Date => date_time.local.date().and_time(NaiveTime::default()),
                _ => date_time.local,
            };
            TemporalValue { kind, local, ..date_time }
        }
        Some(TemporalKind::Date) if kind == TemporalKind::DateTime => {
            let date = TemporalValue::parse(text, TemporalKind::Date)?;
            TemporalValue { kind, ..date }
        }
        _ => return Err(source.unsupported(target)),
    };
    // times carry the reference date; re-parse the canonical form to normalize it
    let parsed = if kind == TemporalKind::Time {
        TemporalValue::parse(&parsed.lexical(), kind)?
    } else {
        parsed
    };
    Ok(parsed.to_value())
}

pub fn to_day_time_duration(value: &ExprValue) -> FunctionResult<ExprValue> {
    let target = xsd::DAY_TIME_DURATION;
    let source = Source::of(value, target)?;
    let text = source.text();
    let millis = if source.is_string() || source.is(target) {
        parse_day_time_duration(text).map_err(|e| source.fail(target, e.to_string()))?
    } else if source.is(xsd::DURATION) {
        parse_duration(text).map_err(|e| source.fail(target, e.to_string()))?.1
    } else if source.is(xsd::YEAR_MONTH_DURATION) {
        parse_year_month_duration(text).map_err(|e| source.fail(target, e.to_string()))?;
        0
    } else {
        return Err(source.unsupported(target));
    };
    Ok(ExprValue::typed(format_day_time_duration(millis), target))
}

pub fn to_year_month_duration(value: &ExprValue) -> FunctionResult<ExprValue> {
    let target = xsd::YEAR_MONTH_DURATION;
    let source = Source::of(value, target)?;
    let text = source.text();
    let months = if source.is_string() || source.is(target) {
        parse_year_month_duration(text).map_err(|e| source.fail(target, e.to_string()))?
    } else if source.is(xsd::DURATION) {
        parse_duration(text).map_err(|e| source.fail(target, e.to_string()))?.0
    } else if source.is(xsd::DAY_TIME_DURATION) {
        parse_day_time_duration(text).map_err(|e| source.fail(target, e.to_string()))?;
        0
    } else {
        return Err(source.unsupported(target));
    };
    Ok(ExprValue::typed(format_year_month_duration(months), target))
}
