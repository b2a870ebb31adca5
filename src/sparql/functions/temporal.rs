//! `xsd:date`, `xsd:time` and `xsd:dateTime` values and their arithmetic
//!
//! A temporal value keeps its wall-clock fields as written plus the optional
//! timezone offset. Values with a timezone compare and subtract on their UTC
//! instant; values without one use their wall-clock fields as if they were UTC.
//! Month arithmetic clamps to the last day of the target month.

use super::duration::{
    format_day_count, format_day_time_duration, parse_day_time_duration, Duration, MILLIS_PER_DAY,
    MILLIS_PER_MINUTE,
};
use crate::rdf::namespace::xsd;
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;
use chrono::{
    Datelike, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike, Utc,
};
use std::cmp::Ordering;
use tracing::warn;

/// Largest timezone offset XSD allows, in minutes
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Which XSD temporal datatype a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
}

impl TemporalKind {
    pub fn datatype(&self) -> &'static str {
        match self {
            TemporalKind::Date => xsd::DATE,
            TemporalKind::Time => xsd::TIME,
            TemporalKind::DateTime => xsd::DATE_TIME,
        }
    }

    pub fn from_datatype(iri: &str) -> Option<Self> {
        match iri {
            xsd::DATE => Some(TemporalKind::Date),
            xsd::TIME => Some(TemporalKind::Time),
            xsd::DATE_TIME => Some(TemporalKind::DateTime),
            _ => None,
        }
    }

    /// Guess the kind of an untyped lexical form
    fn sniff(text: &str) -> Self {
        if text.contains('T') {
            TemporalKind::DateTime
        } else if text.len() > 2 && text.as_bytes()[2] == b':' {
            TemporalKind::Time
        } else {
            TemporalKind::Date
        }
    }
}

/// Wall-clock fields plus optional timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalValue {
    pub kind: TemporalKind,
    /// Fields as written; times sit on a fixed reference date
    pub local: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1972, 12, 31).unwrap_or_default()
}

fn offset_from_minutes(minutes: i32) -> FunctionResult<FixedOffset> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(FunctionError::Range(format!(
            "timezone offset of {} minutes is outside ±14:00",
            minutes
        )));
    }
    FixedOffset::east_opt(minutes * 60)
        .ok_or_else(|| FunctionError::Range(format!("invalid timezone offset of {} minutes", minutes)))
}

/// Split a trailing `Z` or `±HH:MM` off a lexical form
fn split_timezone(text: &str, kind: TemporalKind) -> FunctionResult<(&str, Option<FixedOffset>)> {
    if let Some(body) = text.strip_suffix('Z') {
        return Ok((body, Some(Utc.fix())));
    }
    let bytes = text.as_bytes();
    if bytes.len() >= 6 {
        let sign_at = bytes.len() - 6;
        let tz_bytes = &bytes[sign_at + 1..];
        if matches!(bytes[sign_at], b'+' | b'-')
            && tz_bytes[2] == b':'
            && tz_bytes.iter().all(|b| b.is_ascii_digit() || *b == b':')
        {
            let (body, tz) = text.split_at(sign_at);
            let bad_tz = || FunctionError::cast(kind.datatype(), text, format!("invalid timezone '{}'", tz));
            let hours: i32 = tz[1..3].parse().map_err(|_| bad_tz())?;
            let minutes: i32 = tz[4..6].parse().map_err(|_| bad_tz())?;
            if minutes > 59 {
                return Err(bad_tz());
            }
            let total = hours * 60 + minutes;
            let total = if bytes[sign_at] == b'-' { -total } else { total };
            return Ok((body, Some(offset_from_minutes(total)?)));
        }
    }
    Ok((text, None))
}

fn is_digits(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `-?YYYY-MM-DD`; years may have more than four digits but then no leading zero
fn parse_date_fields(text: &str) -> Option<NaiveDate> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let mut parts = unsigned.splitn(3, '-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    let year_ok = year.len() >= 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && (year.len() == 4 || !year.starts_with('0'));
    if !year_ok || !is_digits(month, 2) || !is_digits(day, 2) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let year = if negative { -year } else { year };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

/// Check the `HH:MM:SS[.f+]` shape before handing the text to chrono
fn is_time_shape(body: &str) -> bool {
    let (clock, fraction) = match body.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (body, None),
    };
    let mut fields = clock.split(':');
    let clock_ok = (0..3).all(|_| fields.next().is_some_and(|f| is_digits(f, 2))) && fields.next().is_none();
    clock_ok && fraction.map_or(true, |f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse `HH:MM:SS[.f]`, mapping `24:00:00` to midnight of the following day
fn parse_time_of_day(body: &str) -> Option<(NaiveTime, bool)> {
    if !is_time_shape(body) {
        return None;
    }
    if let Some(rest) = body.strip_prefix("24:00:00") {
        let zero_fraction = rest.is_empty() || rest[1..].bytes().all(|b| b == b'0');
        return zero_fraction.then_some((NaiveTime::default(), true));
    }
    NaiveTime::parse_from_str(body, "%H:%M:%S%.f").ok().map(|t| (t, false))
}

/// `YYYY-MM-DD`, with a leading `-` for years before 1 CE and no `+` above 9999
fn format_date_fields(date: NaiveDate) -> String {
    let year = date.year();
    let sign = if year < 0 { "-" } else { "" };
    format!("{}{:04}-{:02}-{:02}", sign, year.unsigned_abs(), date.month(), date.day())
}

impl TemporalValue {
    /// Parse a lexical form of the given kind
    pub fn parse(text: &str, kind: TemporalKind) -> FunctionResult<Self> {
        let text = text.trim();
        let (body, offset) = split_timezone(text, kind)?;
        let invalid = || FunctionError::cast(kind.datatype(), text, "does not match the lexical grammar");

        let local = match kind {
            TemporalKind::Date => parse_date_fields(body).ok_or_else(invalid)?.and_time(NaiveTime::default()),
            TemporalKind::Time => {
                let (time, _) = parse_time_of_day(body).ok_or_else(invalid)?;
                reference_date().and_time(time)
            }
            TemporalKind::DateTime => {
                let (date, time) = body.split_once('T').ok_or_else(invalid)?;
                let date = parse_date_fields(date).ok_or_else(invalid)?;
                let (time, next_day) = parse_time_of_day(time).ok_or_else(invalid)?;
                let date = if next_day { date.succ_opt().ok_or_else(invalid)? } else { date };
                date.and_time(time)
            }
        };
        Ok(Self { kind, local, offset })
    }

    /// Read a value of the given kind from a typed literal or a plain string
    pub fn from_value(value: &ExprValue, kind: TemporalKind) -> FunctionResult<Self> {
        match value.datatype_iri() {
            Some(dt) if dt != xsd::STRING && TemporalKind::from_datatype(dt) != Some(kind) => {
                // a date is accepted where a dateTime is expected, at midnight
                if kind == TemporalKind::DateTime && dt == xsd::DATE {
                    let date = Self::parse(&value.lexical("dateTime")?, TemporalKind::Date)?;
                    return Ok(Self { kind, ..date });
                }
                Err(FunctionError::Argument(format!(
                    "expected an {} value, got {}",
                    kind.datatype(),
                    value
                )))
            }
            _ => Self::parse(&value.lexical(kind.datatype())?, kind),
        }
    }

    /// Read a value whose kind comes from its datatype, or from the shape of a plain string
    pub fn from_any(value: &ExprValue) -> FunctionResult<Self> {
        let text = value.lexical("temporal accessor")?;
        let kind = match value.datatype_iri() {
            Some(dt) if dt != xsd::STRING => TemporalKind::from_datatype(dt).ok_or_else(|| {
                FunctionError::Argument(format!("expected a date, time or dateTime, got {}", value))
            })?,
            _ => TemporalKind::sniff(&text),
        };
        Self::parse(&text, kind)
    }

    pub fn utc(local: NaiveDateTime, kind: TemporalKind) -> Self {
        Self {
            kind,
            local,
            offset: Some(Utc.fix()),
        }
    }

    /// The UTC instant; wall-clock fields are taken as UTC when there is no timezone
    pub fn instant(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => self.local - TimeDelta::seconds(offset.local_minus_utc() as i64),
            None => self.local,
        }
    }

    /// Canonical lexical form
    pub fn lexical(&self) -> String {
        let mut out = match self.kind {
            TemporalKind::Date => format_date_fields(self.local.date()),
            TemporalKind::Time => self.local.format("%H:%M:%S").to_string(),
            TemporalKind::DateTime => {
                format!("{}T{}", format_date_fields(self.local.date()), self.local.format("%H:%M:%S"))
            }
        };
        let nanos = self.local.nanosecond() % 1_000_000_000;
        if self.kind != TemporalKind::Date && nanos > 0 {
            out.push('.');
            out.push_str(format!("{:09}", nanos).trim_end_matches('0'));
        }
        if let Some(offset) = self.offset {
            out.push_str(&format_offset(offset));
        }
        out
    }

    /// Typed literal of this value
    pub fn to_value(&self) -> ExprValue {
        ExprValue::typed(self.lexical(), self.kind.datatype())
    }

    fn with_local(&self, local: NaiveDateTime) -> Self {
        Self { local, ..*self }
    }

    /// Order by UTC instant
    pub fn compare(&self, other: &TemporalValue) -> Ordering {
        self.instant().cmp(&other.instant())
    }

    fn millis_since(&self, other: &TemporalValue) -> i64 {
        (self.instant() - other.instant()).num_milliseconds()
    }

    fn add_millis(&self, millis: i64) -> FunctionResult<Self> {
        let local = TimeDelta::try_milliseconds(millis)
            .and_then(|delta| self.local.checked_add_signed(delta))
            .ok_or_else(|| FunctionError::Range(format!("{} + {} ms is out of range", self.lexical(), millis)))?;
        let local = match self.kind {
            TemporalKind::Date => local.date().and_time(NaiveTime::default()),
            TemporalKind::Time => reference_date().and_time(local.time()),
            TemporalKind::DateTime => local,
        };
        Ok(self.with_local(local))
    }

    fn add_months(&self, months: i64) -> FunctionResult<Self> {
        let out_of_range = || FunctionError::Range(format!("{} + {} months is out of range", self.lexical(), months));
        let magnitude = Months::new(u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range())?);
        let local = if months < 0 {
            self.local.checked_sub_months(magnitude)
        } else {
            self.local.checked_add_months(magnitude)
        }
        .ok_or_else(out_of_range)?;
        Ok(self.with_local(local))
    }
}

/// `Z` for UTC, `±HH:MM` otherwise
fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "Z".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

fn diff(a: &ExprValue, b: &ExprValue, kind: TemporalKind) -> FunctionResult<ExprValue> {
    let a = TemporalValue::from_value(a, kind)?;
    let b = TemporalValue::from_value(b, kind)?;
    let millis = a.millis_since(&b);
    let lexical = match kind {
        TemporalKind::Date => {
            let days = (millis as f64 / MILLIS_PER_DAY as f64).round() as i64;
            format_day_count(days)
        }
        _ => format_day_time_duration(millis),
    };
    Ok(ExprValue::typed(lexical, xsd::DAY_TIME_DURATION))
}

/// Whole days between two dates, as a day-only `xsd:dayTimeDuration`
pub fn date_diff(a: &ExprValue, b: &ExprValue) -> FunctionResult<ExprValue> {
    diff(a, b, TemporalKind::Date)
}

pub fn date_time_diff(a: &ExprValue, b: &ExprValue) -> FunctionResult<ExprValue> {
    diff(a, b, TemporalKind::DateTime)
}

pub fn time_diff(a: &ExprValue, b: &ExprValue) -> FunctionResult<ExprValue> {
    diff(a, b, TemporalKind::Time)
}

fn day_time_millis(duration: &ExprValue) -> FunctionResult<i64> {
    match Duration::from_value(duration)? {
        Duration::DayTime(ms) => Ok(ms),
        Duration::YearMonth(_) => Err(FunctionError::Argument(format!(
            "expected a dayTimeDuration, got {}",
            duration
        ))),
    }
}

fn year_month_months(duration: &ExprValue) -> FunctionResult<i64> {
    match Duration::from_value(duration)? {
        Duration::YearMonth(m) => Ok(m),
        Duration::DayTime(_) => Err(FunctionError::Argument(format!(
            "expected a yearMonthDuration, got {}",
            duration
        ))),
    }
}

fn shift_millis(value: &ExprValue, duration: &ExprValue, kind: TemporalKind, sign: i64) -> FunctionResult<ExprValue> {
    let base = TemporalValue::from_value(value, kind)?;
    let millis = day_time_millis(duration)?
        .checked_mul(sign)
        .ok_or_else(|| FunctionError::Arithmetic("duration overflow".to_string()))?;
    Ok(base.add_millis(millis)?.to_value())
}

fn shift_months(value: &ExprValue, duration: &ExprValue, kind: TemporalKind, sign: i64) -> FunctionResult<ExprValue> {
    let base = TemporalValue::from_value(value, kind)?;
    let months = year_month_months(duration)?
        .checked_mul(sign)
        .ok_or_else(|| FunctionError::Arithmetic("duration overflow".to_string()))?;
    Ok(base.add_months(months)?.to_value())
}

pub fn date_add(date: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_millis(date, duration, TemporalKind::Date, 1)
}

pub fn date_subtract(date: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_millis(date, duration, TemporalKind::Date, -1)
}

pub fn date_time_add(date_time: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_millis(date_time, duration, TemporalKind::DateTime, 1)
}

pub fn date_time_subtract(date_time: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_millis(date_time, duration, TemporalKind::DateTime, -1)
}

pub fn time_add(time: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_millis(time, duration, TemporalKind::Time, 1)
}

pub fn time_subtract(time: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_millis(time, duration, TemporalKind::Time, -1)
}

/// Add calendar months, clamping to the last day of a shorter target month
pub fn date_add_year_month(date: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_months(date, duration, TemporalKind::Date, 1)
}

pub fn date_subtract_year_month(date: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_months(date, duration, TemporalKind::Date, -1)
}

pub fn date_time_add_year_month(date_time: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_months(date_time, duration, TemporalKind::DateTime, 1)
}

pub fn date_time_subtract_year_month(date_time: &ExprValue, duration: &ExprValue) -> FunctionResult<ExprValue> {
    shift_months(date_time, duration, TemporalKind::DateTime, -1)
}

/// Parse an ADJUST target: a dayTimeDuration, `Z`, `±HH:MM`, or nothing
fn parse_target_offset(target: &ExprValue) -> FunctionResult<Option<FixedOffset>> {
    if target.is_unbound() {
        return Ok(None);
    }
    let text = target.lexical("ADJUST")?;
    if text.is_empty() {
        return Ok(None);
    }
    if text.contains('P') {
        let millis = parse_day_time_duration(&text)?;
        if millis % MILLIS_PER_MINUTE != 0 {
            return Err(FunctionError::Range(format!(
                "timezone offset {} is not a whole number of minutes",
                text
            )));
        }
        let minutes = i32::try_from(millis / MILLIS_PER_MINUTE)
            .map_err(|_| FunctionError::Range(format!("timezone offset {} is outside ±14:00", text)))?;
        return offset_from_minutes(minutes).map(Some);
    }
    match split_timezone(&text, TemporalKind::DateTime)? {
        ("", offset @ Some(_)) => Ok(offset),
        _ => Err(FunctionError::Argument(format!("'{}' is not a timezone offset", text))),
    }
}

/// Re-express a value in another timezone, preserving its instant
///
/// With no target the timezone is dropped and the UTC wall-clock fields are
/// kept. A value without timezone takes the target timezone unchanged.
pub fn adjust(value: &ExprValue, target: Option<&ExprValue>) -> FunctionResult<ExprValue> {
    let source = TemporalValue::from_any(value)?;
    let target = match target {
        Some(t) => parse_target_offset(t)?,
        None => None,
    };
    let adjusted = match (source.offset, target) {
        (Some(_), None) => TemporalValue {
            local: source.instant(),
            offset: None,
            ..source
        },
        (Some(_), Some(offset)) => TemporalValue {
            local: source.instant() + TimeDelta::seconds(offset.local_minus_utc() as i64),
            offset: Some(offset),
            ..source
        },
        (None, offset) => TemporalValue { offset, ..source },
    };
    let adjusted = match adjusted.kind {
        TemporalKind::Time => adjusted.with_local(reference_date().and_time(adjusted.local.time())),
        TemporalKind::Date => adjusted.with_local(adjusted.local.date().and_time(NaiveTime::default())),
        TemporalKind::DateTime => adjusted,
    };
    Ok(adjusted.to_value())
}

fn offset_duration(offset: FixedOffset) -> ExprValue {
    let millis = offset.local_minus_utc() as i64 * 1_000;
    ExprValue::typed(format_day_time_duration(millis), xsd::DAY_TIME_DURATION)
}

/// `TIMEZONE`: the offset as a dayTimeDuration; an error when there is none
pub fn timezone(value: &ExprValue) -> FunctionResult<ExprValue> {
    let source = TemporalValue::from_any(value)?;
    match source.offset {
        Some(offset) => Ok(offset_duration(offset)),
        None => Err(FunctionError::Argument(format!("{} has no timezone", value))),
    }
}

/// `TIMEZONE` with the legacy fallback to the local process offset
pub fn timezone_or_local(value: &ExprValue) -> FunctionResult<ExprValue> {
    let source = TemporalValue::from_any(value)?;
    match source.offset {
        Some(offset) => Ok(offset_duration(offset)),
        None => {
            let local = Local.offset_from_utc_datetime(&source.local).fix();
            warn!(
                "TIMEZONE called on {} without timezone, falling back to local offset {}",
                value,
                format_offset(local)
            );
            Ok(offset_duration(local))
        }
    }
}

/// `TZ`: the offset as a plain string, empty when there is none
pub fn tz(value: &ExprValue) -> FunctionResult<ExprValue> {
    let source = TemporalValue::from_any(value)?;
    let text = source.offset.map(format_offset).unwrap_or_default();
    ExprValue::simple(text)
}

/// `NOW`: the current instant as a UTC dateTime with millisecond precision
pub fn now() -> ExprValue {
    let now = Utc::now().naive_utc();
    let millis = now.nanosecond() / 1_000_000 * 1_000_000;
    let now = now.with_nanosecond(millis).unwrap_or(now);
    TemporalValue::utc(now, TemporalKind::DateTime).to_value()
}

/// Calendar and clock field accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalField {
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
}

/// `YEAR`, `MONTH`, `DAY`, `HOURS`, `MINUTES`, `SECONDS` on the value's own fields
pub fn temporal_field(value: &ExprValue, field: TemporalField) -> FunctionResult<ExprValue> {
    let source = TemporalValue::from_any(value)?;
    let date_field = matches!(field, TemporalField::Year | TemporalField::Month | TemporalField::Day);
    if date_field && source.kind == TemporalKind::Time {
        return Err(FunctionError::Argument(format!("{:?} is not defined on xsd:time", field)));
    }
    let local = source.local;
    Ok(match field {
        TemporalField::Year => ExprValue::Integer(local.year() as i64),
        TemporalField::Month => ExprValue::Integer(local.month() as i64),
        TemporalField::Day => ExprValue::Integer(local.day() as i64),
        TemporalField::Hours => ExprValue::Integer(local.hour() as i64),
        TemporalField::Minutes => ExprValue::Integer(local.minute() as i64),
        TemporalField::Seconds => {
            let nanos = local.second() as i64 * 1_000_000_000 + local.nanosecond() as i64;
            ExprValue::Float(nanos as f64 / 1_000_000_000.0)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    fn lexical(value: &ExprValue) -> &str {
        value.as_literal().unwrap().value()
    }

    fn date_time(s: &str) -> ExprValue {
        Literal::new(s, Some(xsd::DATE_TIME), None).unwrap().into()
    }

    #[test]
    fn test_parse_and_lexical() {
        let v = TemporalValue::parse("2025-01-01T12:30:00.250+05:30", TemporalKind::DateTime).unwrap();
        assert_eq!(v.lexical(), "2025-01-01T12:30:00.25+05:30");
        assert_eq!(v.instant().to_string(), "2025-01-01 07:00:00.250");

        let v = TemporalValue::parse("2025-12-15", TemporalKind::Date).unwrap();
        assert!(v.offset.is_none());
        assert_eq!(v.lexical(), "2025-12-15");

        let v = TemporalValue::parse("23:59:59Z", TemporalKind::Time).unwrap();
        assert_eq!(v.lexical(), "23:59:59Z");

        let v = TemporalValue::parse("2024-12-31T24:00:00", TemporalKind::DateTime).unwrap();
        assert_eq!(v.lexical(), "2025-01-01T00:00:00");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            TemporalValue::parse("2025-02-30", TemporalKind::Date),
            Err(FunctionError::Cast { .. })
        ));
        assert!(TemporalValue::parse("2025-01-01T25:00:00", TemporalKind::DateTime).is_err());
        assert!(matches!(
            TemporalValue::parse("2025-01-01T00:00:00+15:00", TemporalKind::DateTime),
            Err(FunctionError::Range(_))
        ));
    }

    #[test]
    fn test_date_diff_is_day_only() {
        let d = date_diff(&"2025-12-15".into(), &"2025-12-01".into()).unwrap();
        assert_eq!(lexical(&d), "P14D");
        assert!(d.as_literal().unwrap().is_datatype(xsd::DAY_TIME_DURATION));

        let d = date_diff(&"2025-12-01".into(), &"2025-12-01".into()).unwrap();
        assert_eq!(lexical(&d), "P0D");
    }

    #[test]
    fn test_date_time_diff() {
        let d = date_time_diff(&"2025-01-01T12:00:00Z".into(), &"2025-01-01T10:00:00Z".into()).unwrap();
        assert_eq!(lexical(&d), "PT2H");

        let d = date_time_diff(&"2025-01-01T12:00:00+02:00".into(), &"2025-01-01T10:00:00Z".into()).unwrap();
        assert_eq!(lexical(&d), "PT0S");

        let d = time_diff(&"08:00:00".into(), &"09:30:00".into()).unwrap();
        assert_eq!(lexical(&d), "-PT1H30M");
    }

    #[test]
    fn test_month_end_clamping() {
        let r = date_add_year_month(&"2025-01-31".into(), &"P1M".into()).unwrap();
        assert_eq!(lexical(&r), "2025-02-28");
        assert!(r.as_literal().unwrap().is_datatype(xsd::DATE));

        let r = date_add_year_month(&"2024-01-31".into(), &"P1M".into()).unwrap();
        assert_eq!(lexical(&r), "2024-02-29");

        let r = date_subtract_year_month(&"2024-03-31".into(), &"P1M".into()).unwrap();
        assert_eq!(lexical(&r), "2024-02-29");

        let r = date_time_add_year_month(&"2023-08-31T10:00:00Z".into(), &"P1Y1M".into()).unwrap();
        assert_eq!(lexical(&r), "2024-09-30T10:00:00Z");
    }

    #[test]
    fn test_add_day_time() {
        let r = date_add(&"2025-02-27".into(), &"P2D".into()).unwrap();
        assert_eq!(lexical(&r), "2025-03-01");

        let r = date_time_subtract(&date_time("2025-01-01T00:30:00-05:00"), &"PT1H".into()).unwrap();
        assert_eq!(lexical(&r), "2024-12-31T23:30:00-05:00");

        let r = time_add(&"23:00:00".into(), &"PT2H".into()).unwrap();
        assert_eq!(lexical(&r), "01:00:00");

        assert!(matches!(
            date_add(&"2025-01-01".into(), &"P1M".into()),
            Err(FunctionError::Argument(_))
        ));
    }

    #[test]
    fn test_adjust() {
        let r = adjust(&date_time("2025-01-01T12:00:00Z"), Some(&"-PT5H".into())).unwrap();
        assert_eq!(lexical(&r), "2025-01-01T07:00:00-05:00");

        let r = adjust(&date_time("2025-01-01T12:00:00+02:00"), None).unwrap();
        assert_eq!(lexical(&r), "2025-01-01T10:00:00");

        let r = adjust(&date_time("2025-01-01T12:00:00"), Some(&"+01:00".into())).unwrap();
        assert_eq!(lexical(&r), "2025-01-01T12:00:00+01:00");

        assert!(matches!(
            adjust(&date_time("2025-01-01T12:00:00Z"), Some(&"PT15H".into())),
            Err(FunctionError::Range(_))
        ));
    }

    #[test]
    fn test_timezone_and_tz() {
        let r = timezone(&date_time("2025-01-01T12:00:00-05:00")).unwrap();
        assert_eq!(lexical(&r), "-PT5H");
        let r = timezone(&date_time("2025-01-01T12:00:00Z")).unwrap();
        assert_eq!(lexical(&r), "PT0S");
        assert!(timezone(&date_time("2025-01-01T12:00:00")).is_err());
        assert!(timezone_or_local(&date_time("2025-01-01T12:00:00")).is_ok());

        assert_eq!(lexical(&tz(&date_time("2025-01-01T12:00:00+05:30")).unwrap()), "+05:30");
        assert_eq!(lexical(&tz(&date_time("2025-01-01T12:00:00Z")).unwrap()), "Z");
        assert_eq!(tz(&date_time("2025-01-01T12:00:00")).unwrap(), ExprValue::String(String::new()));
    }

    #[test]
    fn test_fields() {
        let v = date_time("2011-01-10T14:45:13.815-05:00");
        assert_eq!(temporal_field(&v, TemporalField::Year).unwrap(), ExprValue::Integer(2011));
        assert_eq!(temporal_field(&v, TemporalField::Hours).unwrap(), ExprValue::Integer(14));
        assert_eq!(temporal_field(&v, TemporalField::Seconds).unwrap(), ExprValue::Float(13.815));
        assert!(temporal_field(&"10:00:00".into(), TemporalField::Year).is_err());
    }

    #[test]
    fn test_now_is_utc_date_time() {
        let n = now();
        let lit = n.as_literal().unwrap();
        assert!(lit.is_datatype(xsd::DATE_TIME));
        assert!(lit.value().ends_with('Z'));
    }
}
