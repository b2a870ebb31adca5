use samyama_sparql_functions::rdf::namespace::xsd;
use samyama_sparql_functions::sparql::functions::temporal;
use samyama_sparql_functions::{call_function, ExprValue, FunctionContext, FunctionError, Literal};

fn typed(value: &str, datatype: &str) -> ExprValue {
    Literal::new(value, Some(datatype), None).unwrap().into()
}

fn lexical(value: &ExprValue) -> &str {
    value.as_literal().unwrap().value()
}

fn call(name: &str, args: &[ExprValue]) -> Result<ExprValue, FunctionError> {
    call_function(name, args, &FunctionContext::default())
}

#[test]
fn test_month_end_clamping() {
    let month = typed("P1M", "xsd:yearMonthDuration");
    let r = temporal::date_add_year_month(&typed("2025-01-31", "xsd:date"), &month).unwrap();
    assert_eq!(lexical(&r), "2025-02-28");
    let r = temporal::date_add_year_month(&typed("2024-01-31", "xsd:date"), &month).unwrap();
    assert_eq!(lexical(&r), "2024-02-29");
    let r = temporal::date_subtract_year_month(&typed("2025-03-31", "xsd:date"), &month).unwrap();
    assert_eq!(lexical(&r), "2025-02-28");
    let r = temporal::date_time_add_year_month(
        &typed("2023-08-31T09:00:00Z", "xsd:dateTime"),
        &typed("P1Y6M", "xsd:yearMonthDuration"),
    )
    .unwrap();
    assert_eq!(lexical(&r), "2025-02-28T09:00:00Z");
}

#[test]
fn test_differences() {
    let r = temporal::date_diff(&typed("2025-12-15", "xsd:date"), &typed("2025-12-01", "xsd:date")).unwrap();
    assert_eq!(lexical(&r), "P14D");
    assert_eq!(r.as_literal().unwrap().datatype_iri(), xsd::DAY_TIME_DURATION);

    let r = temporal::date_time_diff(
        &typed("2025-01-01T12:00:00Z", "xsd:dateTime"),
        &typed("2025-01-01T10:00:00Z", "xsd:dateTime"),
    )
    .unwrap();
    assert_eq!(lexical(&r), "PT2H");

    let r = temporal::date_time_diff(
        &typed("2025-01-01T12:00:00+02:00", "xsd:dateTime"),
        &typed("2025-01-01T10:00:00Z", "xsd:dateTime"),
    )
    .unwrap();
    assert_eq!(lexical(&r), "PT0S");
}

#[test]
fn test_day_time_shift() {
    let r = call("dateTimeAdd", &[typed("2025-12-31T23:30:00Z", "xsd:dateTime"), typed("PT45M", "xsd:dayTimeDuration")]).unwrap();
    assert_eq!(lexical(&r), "2026-01-01T00:15:00Z");
    let r = call("dateSubtract", &[typed("2025-03-01", "xsd:date"), typed("P1D", "xsd:dayTimeDuration")]).unwrap();
    assert_eq!(lexical(&r), "2025-02-28");
}

#[test]
fn test_adjust() {
    let value = typed("2025-01-01T12:00:00+02:00", "xsd:dateTime");
    let r = call("ADJUST", &[value.clone(), typed("-PT5H", "xsd:dayTimeDuration")]).unwrap();
    assert_eq!(lexical(&r), "2025-01-01T05:00:00-05:00");
    let r = call("ADJUST", &[value]).unwrap();
    assert_eq!(lexical(&r), "2025-01-01T10:00:00");
    assert!(matches!(
        call("ADJUST", &[typed("2025-01-01T12:00:00Z", "xsd:dateTime"), typed("PT15H", "xsd:dayTimeDuration")]),
        Err(FunctionError::Range(_))
    ));
}

#[test]
fn test_timezone_and_tz() {
    let value = typed("2025-01-01T12:00:00-05:30", "xsd:dateTime");
    assert_eq!(lexical(&call("TIMEZONE", &[value.clone()]).unwrap()), "-PT5H30M");
    assert_eq!(lexical(&call("TZ", &[value]).unwrap()), "-05:30");
    assert_eq!(lexical(&call("TIMEZONE", &[typed("2025-01-01T00:00:00Z", "xsd:dateTime")]).unwrap()), "PT0S");

    let naive = typed("2025-01-01T12:00:00", "xsd:dateTime");
    assert_eq!(call("TZ", &[naive.clone()]).unwrap(), ExprValue::String(String::new()));
    assert!(call("TIMEZONE", &[naive]).is_err());
}

#[test]
fn test_field_accessors() {
    let value = typed("2024-02-29T23:59:30.25Z", "xsd:dateTime");
    assert_eq!(call("YEAR", &[value.clone()]).unwrap(), ExprValue::Integer(2024));
    assert_eq!(call("MONTH", &[value.clone()]).unwrap(), ExprValue::Integer(2));
    assert_eq!(call("DAY", &[value.clone()]).unwrap(), ExprValue::Integer(29));
    assert_eq!(call("MINUTES", &[value.clone()]).unwrap(), ExprValue::Integer(59));
    assert_eq!(call("SECONDS", &[value]).unwrap(), ExprValue::Float(30.25));
}

#[test]
fn test_now_is_utc_date_time() {
    let now = call("NOW", &[]).unwrap();
    let lit = now.as_literal().unwrap();
    assert_eq!(lit.datatype_iri(), xsd::DATE_TIME);
    assert!(lit.value().ends_with('Z'));
}

#[test]
fn test_duration_lexical_round_trip() {
    use samyama_sparql_functions::sparql::functions::duration::{
        format_day_time_duration, format_year_month_duration, parse_day_time_duration, parse_year_month_duration,
    };
    for millis in [0i64, 1, 999, 60_000, 3_600_000, 86_400_000, 93_784_500, -5_400_000, -172_800_001] {
        assert_eq!(parse_day_time_duration(&format_day_time_duration(millis)).unwrap(), millis);
    }
    for months in [0i64, 1, 11, 12, 14, 120, -7, -25] {
        assert_eq!(parse_year_month_duration(&format_year_month_duration(months)).unwrap(), months);
    }
    assert_eq!(format_day_time_duration(0), "PT0S");
    assert_eq!(format_year_month_duration(0), "P0M");
}

#[test]
fn test_duration_arithmetic() {
    let r = call("durationAdd", &[typed("PT90M", "xsd:dayTimeDuration"), typed("PT30M", "xsd:dayTimeDuration")]).unwrap();
    assert_eq!(lexical(&r), "PT2H");
    let r = call("durationDivide", &[typed("P1Y", "xsd:yearMonthDuration"), typed("P3M", "xsd:yearMonthDuration")]).unwrap();
    assert_eq!(r, ExprValue::Float(4.0));
    assert!(matches!(
        call("durationDivide", &[typed("PT1H", "xsd:dayTimeDuration"), ExprValue::Integer(0)]),
        Err(FunctionError::Arithmetic(_))
    ));
    assert_eq!(call("HOURS", &[typed("-P1DT5H", "xsd:dayTimeDuration")]).unwrap(), ExprValue::Integer(-5));
}
