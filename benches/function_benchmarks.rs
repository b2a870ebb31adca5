use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use samyama_sparql_functions::sparql::functions::duration::{format_day_time_duration, parse_day_time_duration};
use samyama_sparql_functions::{call_function, ExprValue, FunctionContext, Literal};

fn typed(value: &str, datatype: &str) -> ExprValue {
    Literal::new(value, Some(datatype), None).unwrap().into()
}

fn bench_dispatch(c: &mut Criterion) {
    let ctx = FunctionContext::default();
    let mut group = c.benchmark_group("dispatch");

    let calls: Vec<(&str, Vec<ExprValue>)> = vec![
        ("STRLEN", vec!["the quick brown fox".into()]),
        ("UCASE", vec!["the quick brown fox".into()]),
        ("FOLD", vec!["Straße ΣΊΣΥΦΟΣ".into()]),
        ("REGEX", vec!["Alice Smith".into(), "^ali".into(), "i".into()]),
        ("SHA256", vec!["abc".into()]),
        (
            "dateAddYearMonth",
            vec![typed("2024-01-31", "xsd:date"), typed("P1M", "xsd:yearMonthDuration")],
        ),
        (
            "dateTimeDiff",
            vec![
                typed("2025-01-01T12:00:00+02:00", "xsd:dateTime"),
                typed("2024-12-31T10:00:00Z", "xsd:dateTime"),
            ],
        ),
        ("xsd:double", vec!["1.5e3".into()]),
    ];

    for (name, args) in &calls {
        group.bench_with_input(BenchmarkId::new("call", name), args, |b, args| {
            b.iter(|| call_function(criterion::black_box(name), criterion::black_box(args), &ctx))
        });
    }

    group.finish();
}

fn bench_durations(c: &mut Criterion) {
    let mut group = c.benchmark_group("duration");

    for text in ["PT2H", "P14D", "-P1DT2H3M4.5S"] {
        group.bench_with_input(BenchmarkId::new("parse", text), &text, |b, text| {
            b.iter(|| parse_day_time_duration(criterion::black_box(text)))
        });
    }

    for millis in [7_200_000i64, 1_209_600_000, -93_784_500] {
        group.bench_with_input(BenchmarkId::new("format", millis), &millis, |b, &millis| {
            b.iter(|| format_day_time_duration(criterion::black_box(millis)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_durations);
criterion_main!(benches);
