//! XSD duration lexical forms and arithmetic
//!
//! Day-time durations (`[-]P[nD][T[nH][nM][n[.n]S]]`) are held as signed
//! milliseconds, year-month durations (`[-]P[nY][nM]`) as signed months.

use super::numeric::numeric_value;
use crate::rdf::namespace::xsd;
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

fn parse_digits(digits: &str, component: &str, input: &str) -> FunctionResult<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FunctionError::duration(component, input));
    }
    digits
        .parse::<i64>()
        .map_err(|_| FunctionError::duration(format!("{} (overflow)", component), input))
}

/// Seconds with optional fraction, in milliseconds; digits past the millisecond are truncated
fn parse_seconds(text: &str, input: &str) -> FunctionResult<i64> {
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text, None),
    };
    let seconds = parse_digits(whole, "seconds component", input)?;
    let millis = match fraction {
        None => 0,
        Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => {
            let padded: String = f.chars().chain("00".chars()).take(3).collect();
            padded.parse::<i64>().unwrap_or(0)
        }
        Some(_) => return Err(FunctionError::duration("fractional seconds", input)),
    };
    seconds
        .checked_mul(MILLIS_PER_SECOND)
        .and_then(|s| s.checked_add(millis))
        .ok_or_else(|| FunctionError::duration("seconds component (overflow)", input))
}

fn accumulate(total: i64, amount: i64, unit: i64, component: &str, input: &str) -> FunctionResult<i64> {
    amount
        .checked_mul(unit)
        .and_then(|v| total.checked_add(v))
        .ok_or_else(|| FunctionError::duration(format!("{} (overflow)", component), input))
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}

/// Parse an `xsd:dayTimeDuration` lexical form into milliseconds
///
/// Durations are held at millisecond precision: fractional-second digits past
/// the third are accepted and truncated toward zero, so `PT0.0015S` reads as 1 ms.
pub fn parse_day_time_duration(text: &str) -> FunctionResult<i64> {
    let (negative, rest) = split_sign(text);
    let rest = rest
        .strip_prefix('P')
        .ok_or_else(|| FunctionError::duration("'P' designator", text))?;

    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (rest, None),
    };

    let mut total = 0i64;
    let mut seen = false;

    if !date_part.is_empty() {
        let days = date_part
            .strip_suffix('D')
            .ok_or_else(|| FunctionError::duration("days component", text))?;
        total = accumulate(total, parse_digits(days, "days component", text)?, MILLIS_PER_DAY, "days component", text)?;
        seen = true;
    }

    if let Some(mut time) = time_part {
        if time.is_empty() {
            return Err(FunctionError::duration("time component after 'T'", text));
        }
        for (designator, unit, component) in [
            ('H', MILLIS_PER_HOUR, "hours component"),
            ('M', MILLIS_PER_MINUTE, "minutes component"),
        ] {
            if let Some(pos) = time.find(designator) {
                let amount = parse_digits(&time[..pos], component, text)?;
                total = accumulate(total, amount, unit, component, text)?;
                time = &time[pos + 1..];
            }
        }
        if !time.is_empty() {
            let seconds = time
                .strip_suffix('S')
                .ok_or_else(|| FunctionError::duration("seconds component", text))?;
            total = accumulate(total, parse_seconds(seconds, text)?, 1, "seconds component", text)?;
        }
        seen = true;
    }

    if !seen {
        return Err(FunctionError::duration("missing component", text));
    }
    Ok(if negative { -total } else { total })
}

fn push_seconds(out: &mut String, millis: u64) {
    let whole = millis / 1_000;
    let fraction = millis % 1_000;
    if fraction == 0 {
        out.push_str(&whole.to_string());
    } else {
        let digits = format!("{:03}", fraction);
        out.push_str(&format!("{}.{}", whole, digits.trim_end_matches('0')));
    }
    out.push('S');
}

/// Canonical `xsd:dayTimeDuration` lexical form of a millisecond count
pub fn format_day_time_duration(millis: i64) -> String {
    if millis == 0 {
        return "PT0S".to_string();
    }
    let magnitude = millis.unsigned_abs();
    let day = MILLIS_PER_DAY as u64;
    let hour = MILLIS_PER_HOUR as u64;
    let minute = MILLIS_PER_MINUTE as u64;

    let days = magnitude / day;
    let remainder = magnitude % day;

    let mut out = String::from(if millis < 0 { "-P" } else { "P" });
    if days > 0 {
        out.push_str(&format!("{}D", days));
    }
    if remainder > 0 {
        out.push('T');
        let hours = remainder / hour;
        let minutes = (remainder % hour) / minute;
        let seconds = remainder % minute;
        if hours > 0 {
            out.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            out.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 || (hours == 0 && minutes == 0) {
            push_seconds(&mut out, seconds);
        }
    }
    out
}

/// Day-only form used for date differences: `P14D`, `-P3D`, `P0D`
pub fn format_day_count(days: i64) -> String {
    if days < 0 {
        format!("-P{}D", days.unsigned_abs())
    } else {
        format!("P{}D", days)
    }
}

/// Parse an `xsd:yearMonthDuration` lexical form into months
pub fn parse_year_month_duration(text: &str) -> FunctionResult<i64> {
    let (negative, rest) = split_sign(text);
    let mut rest = rest
        .strip_prefix('P')
        .ok_or_else(|| FunctionError::duration("'P' designator", text))?;

    let mut total = 0i64;
    let mut seen = false;
    if let Some(pos) = rest.find('Y') {
        let years = parse_digits(&rest[..pos], "years component", text)?;
        total = accumulate(total, years, 12, "years component", text)?;
        rest = &rest[pos + 1..];
        seen = true;
    }
    if !rest.is_empty() {
        let months = rest
            .strip_suffix('M')
            .ok_or_else(|| FunctionError::duration("months component", text))?;
        total = accumulate(total, parse_digits(months, "months component", text)?, 1, "months component", text)?;
        seen = true;
    }
    if !seen {
        return Err(FunctionError::duration("missing component", text));
    }
    Ok(if negative { -total } else { total })
}

/// Canonical `xsd:yearMonthDuration` lexical form of a month count
pub fn format_year_month_duration(months: i64) -> String {
    let magnitude = months.unsigned_abs();
    let years = magnitude / 12;
    let rest = magnitude % 12;
    let mut out = String::from(if months < 0 { "-P" } else { "P" });
    if years > 0 {
        out.push_str(&format!("{}Y", years));
    }
    if rest > 0 || years == 0 {
        out.push_str(&format!("{}M", rest));
    }
    out
}

/// Parse a general `xsd:duration` into its (months, milliseconds) parts
pub fn parse_duration(text: &str) -> FunctionResult<(i64, i64)> {
    let (negative, rest) = split_sign(text);
    let body = rest
        .strip_prefix('P')
        .ok_or_else(|| FunctionError::duration("'P' designator", text))?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (body, None),
    };
    // the day count and everything after it belong to the day-time part
    let split_at = date_part.rfind('M').map(|i| i + 1).or_else(|| date_part.find('Y').map(|i| i + 1));
    let (year_month, days) = date_part.split_at(split_at.unwrap_or(0));

    let months = if year_month.is_empty() {
        0
    } else {
        parse_year_month_duration(&format!("P{}", year_month))
            .map_err(|_| FunctionError::duration("year-month part", text))?
    };
    let millis = if days.is_empty() && time_part.is_none() {
        if year_month.is_empty() {
            return Err(FunctionError::duration("missing component", text));
        }
        0
    } else {
        let day_time = match time_part {
            Some(t) => format!("P{}T{}", days, t),
            None => format!("P{}", days),
        };
        parse_day_time_duration(&day_time).map_err(|_| FunctionError::duration("day-time part", text))?
    };
    Ok(if negative { (-months, -millis) } else { (months, millis) })
}

/// A parsed duration of either family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    /// Milliseconds
    DayTime(i64),
    /// Months
    YearMonth(i64),
}

impl Duration {
    /// Read a duration from a typed literal, or from a plain string of either grammar
    pub fn from_value(value: &ExprValue) -> FunctionResult<Self> {
        let text = value.lexical("duration")?;
        match value.datatype_iri() {
            Some(xsd::DAY_TIME_DURATION) => Ok(Duration::DayTime(parse_day_time_duration(&text)?)),
            Some(xsd::YEAR_MONTH_DURATION) => {
                Ok(Duration::YearMonth(parse_year_month_duration(&text)?))
            }
            Some(xsd::STRING) | Some(xsd::DURATION) | None => {
                match parse_day_time_duration(&text) {
                    Ok(ms) => Ok(Duration::DayTime(ms)),
                    Err(day_time_err) => parse_year_month_duration(&text)
                        .map(Duration::YearMonth)
                        .map_err(|_| day_time_err),
                }
            }
            Some(other) => Err(FunctionError::Argument(format!(
                "expected a duration, got a literal of type <{}>",
                other
            ))),
        }
    }

    /// Typed literal holding the canonical lexical form
    pub fn to_value(self) -> ExprValue {
        match self {
            Duration::DayTime(ms) => ExprValue::typed(format_day_time_duration(ms), xsd::DAY_TIME_DURATION),
            Duration::YearMonth(m) => {
                ExprValue::typed(format_year_month_duration(m), xsd::YEAR_MONTH_DURATION)
            }
        }
    }

    fn amount(self) -> i64 {
        match self {
            Duration::DayTime(v) | Duration::YearMonth(v) => v,
        }
    }

    fn with_amount(self, amount: i64) -> Self {
        match self {
            Duration::DayTime(_) => Duration::DayTime(amount),
            Duration::YearMonth(_) => Duration::YearMonth(amount),
        }
    }

    fn same_family(self, other: Duration) -> FunctionResult<(i64, i64)> {
        match (self, other) {
            (Duration::DayTime(a), Duration::DayTime(b)) | (Duration::YearMonth(a), Duration::YearMonth(b)) => {
                Ok((a, b))
            }
            _ => Err(FunctionError::Argument(
                "cannot combine a dayTimeDuration with a yearMonthDuration".to_string(),
            )),
        }
    }
}

fn overflow() -> FunctionError {
    FunctionError::Arithmetic("duration overflow".to_string())
}

pub fn duration_add(a: &ExprValue, b: &ExprValue) -> FunctionResult<ExprValue> {
    let a = Duration::from_value(a)?;
    let (x, y) = a.same_family(Duration::from_value(b)?)?;
    let sum = x.checked_add(y).ok_or_else(overflow)?;
    Ok(a.with_amount(sum).to_value())
}

pub fn duration_subtract(a: &ExprValue, b: &ExprValue) -> FunctionResult<ExprValue> {
    let a = Duration::from_value(a)?;
    let (x, y) = a.same_family(Duration::from_value(b)?)?;
    let difference = x.checked_sub(y).ok_or_else(overflow)?;
    Ok(a.with_amount(difference).to_value())
}

fn scaled(amount: i64, factor: f64) -> FunctionResult<i64> {
    let result = (amount as f64 * factor).round();
    if !result.is_finite() || result.abs() >= i64::MAX as f64 {
        return Err(overflow());
    }
    Ok(result as i64)
}

/// Multiply a duration by a number
pub fn duration_multiply(duration: &ExprValue, factor: &ExprValue) -> FunctionResult<ExprValue> {
    let duration = Duration::from_value(duration)?;
    let factor = numeric_value(factor)
        .ok_or_else(|| FunctionError::Argument(format!("duration factor {} is not numeric", factor)))?;
    if factor.is_nan() {
        return Err(FunctionError::Arithmetic("cannot multiply a duration by NaN".to_string()));
    }
    Ok(duration.with_amount(scaled(duration.amount(), factor)?).to_value())
}

/// Divide a duration by a number, or by a duration of the same family
///
/// Duration ÷ duration yields their ratio as a number.
pub fn duration_divide(duration: &ExprValue, divisor: &ExprValue) -> FunctionResult<ExprValue> {
    let dividend = Duration::from_value(duration)?;
    if let Some(number) = numeric_value(divisor) {
        if number == 0.0 {
            return Err(FunctionError::Arithmetic("division of a duration by zero".to_string()));
        }
        if number.is_nan() {
            return Err(FunctionError::Arithmetic("cannot divide a duration by NaN".to_string()));
        }
        return Ok(dividend.with_amount(scaled(dividend.amount(), 1.0 / number)?).to_value());
    }
    let (x, y) = dividend.same_family(Duration::from_value(divisor)?)?;
    if y == 0 {
        return Err(FunctionError::Arithmetic("division by a zero duration".to_string()));
    }
    Ok(ExprValue::Float(x as f64 / y as f64))
}

fn sign_of(amount: i64) -> i64 {
    if amount < 0 {
        -1
    } else {
        1
    }
}

/// Day component of a millisecond duration
pub fn days(millis: i64) -> i64 {
    sign_of(millis) * (millis.unsigned_abs() / MILLIS_PER_DAY as u64) as i64
}

/// Hour component in [0, 23], signed like the duration
pub fn hours(millis: i64) -> i64 {
    sign_of(millis) * ((millis.unsigned_abs() % MILLIS_PER_DAY as u64) / MILLIS_PER_HOUR as u64) as i64
}

/// Minute component in [0, 59], signed like the duration
pub fn minutes(millis: i64) -> i64 {
    sign_of(millis) * ((millis.unsigned_abs() % MILLIS_PER_HOUR as u64) / MILLIS_PER_MINUTE as u64) as i64
}

/// Seconds component with fraction, signed like the duration
pub fn seconds(millis: i64) -> f64 {
    sign_of(millis) as f64 * (millis.unsigned_abs() % MILLIS_PER_MINUTE as u64) as f64 / 1_000.0
}

/// Whole years of a month duration, signed like the duration
pub fn years(months: i64) -> i64 {
    sign_of(months) * (months.unsigned_abs() / 12) as i64
}

/// Month component in [0, 11], signed like the duration
pub fn months(months: i64) -> i64 {
    sign_of(months) * (months.unsigned_abs() % 12) as i64
}

/// Component accessor on a duration value (`DAYS`, `HOURS`, `MINUTES`, `SECONDS`, `YEARS`, `MONTHS`)
pub fn duration_component(value: &ExprValue, component: &str) -> FunctionResult<ExprValue> {
    let duration = Duration::from_value(value)?;
    let result = match (component.to_ascii_uppercase().as_str(), duration) {
        ("DAYS", Duration::DayTime(ms)) => ExprValue::Integer(days(ms)),
        ("HOURS", Duration::DayTime(ms)) => ExprValue::Integer(hours(ms)),
        ("MINUTES", Duration::DayTime(ms)) => ExprValue::Integer(minutes(ms)),
        ("SECONDS", Duration::DayTime(ms)) => ExprValue::Float(seconds(ms)),
        ("YEARS", Duration::YearMonth(m)) => ExprValue::Integer(years(m)),
        ("MONTHS", Duration::YearMonth(m)) => ExprValue::Integer(months(m)),
        // the other family has a zero component by definition
        ("DAYS" | "HOURS" | "MINUTES", Duration::YearMonth(_))
        | ("YEARS" | "MONTHS", Duration::DayTime(_)) => ExprValue::Integer(0),
        ("SECONDS", Duration::YearMonth(_)) => ExprValue::Float(0.0),
        (other, _) => {
            return Err(FunctionError::Argument(format!("unknown duration component {}", other)))
        }
    };
    Ok(result)
}
