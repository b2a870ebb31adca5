//! Function façade: routes a SPARQL function name to its implementation
//!
//! Names match case-insensitively. XSD casts are reachable by full datatype
//! IRI or `xsd:` compact name.

use super::cast::{cast, CAST_TARGETS};
use super::compare::{compare, same_term};
use super::duration::{
    duration_add, duration_component, duration_divide, duration_multiply, duration_subtract,
};
use super::hash::{hash, HashAlgorithm};
use super::language::{fold, has_lang, has_langdir, lang, lang_matches_value, langdir, normalize};
use super::numeric::{abs, ceil, floor, is_numeric, rand, round};
use super::string::{
    concat, contains, encode_for_uri, lcase, regex, replace, strafter, strbefore, strends, strlen,
    strstarts, substr, ucase,
};
use super::temporal::{
    adjust, date_add, date_add_year_month, date_diff, date_subtract, date_subtract_year_month,
    date_time_add, date_time_add_year_month, date_time_diff, date_time_subtract,
    date_time_subtract_year_month, now, temporal_field, time_add, time_diff, time_subtract, timezone,
    timezone_or_local, tz, TemporalField,
};
use super::term::{
    bnode, bound, datatype, iri, is_blank, is_iri, is_literal, is_triple, object, predicate, str_of,
    strdt, strlang, strlangdir, struuid, subject, triple, uuid,
};
use crate::rdf::namespace::{xsd, NamespaceManager};
use crate::sparql::config::{FunctionContext, TimezoneFallback};
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;
use tracing::debug;

/// Check that a function got between `min` and `max` arguments
fn check_arity(name: &str, args: &[ExprValue], min: usize, max: usize) -> FunctionResult<()> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        format!("exactly {}", min)
    } else if max == usize::MAX {
        format!("at least {}", min)
    } else {
        format!("{} to {}", min, max)
    };
    Err(FunctionError::Argument(format!(
        "{} requires {} argument{}, got {}",
        name,
        expected,
        if max == 1 { "" } else { "s" },
        args.len()
    )))
}

/// Whether an argument should be read as a duration rather than a temporal value
fn is_duration(value: &ExprValue) -> bool {
    match value.datatype_iri() {
        Some(xsd::DAY_TIME_DURATION | xsd::YEAR_MONTH_DURATION | xsd::DURATION) => true,
        Some(xsd::STRING) | None => value
            .lexical("duration")
            .is_ok_and(|text| text.starts_with('P') || text.starts_with("-P")),
        Some(_) => false,
    }
}

/// Resolve a cast target named by IRI or compact name
fn cast_target(name: &str) -> Option<String> {
    let expanded = NamespaceManager::common().expand_or_keep(name);
    CAST_TARGETS.contains(&expanded.as_str()).then_some(expanded)
}

/// Evaluate the built-in function `name` on `args`
pub fn call_function(name: &str, args: &[ExprValue], ctx: &FunctionContext) -> FunctionResult<ExprValue> {
    debug!("calling {} with {} argument(s)", name, args.len());

    if let Some(target) = cast_target(name) {
        check_arity(name, args, 1, 1)?;
        return cast(&target, &args[0]);
    }

    let upper = name.to_ascii_uppercase();
    let n = upper.as_str();
    let arg = |i: usize| args.get(i);

    match n {
        // term accessors and tests
        "STR" => {
            check_arity(n, args, 1, 1)?;
            str_of(&args[0])
        }
        "LANG" => {
            check_arity(n, args, 1, 1)?;
            lang(&args[0])
        }
        "LANGDIR" => {
            check_arity(n, args, 1, 1)?;
            langdir(&args[0])
        }
        "DATATYPE" => {
            check_arity(n, args, 1, 1)?;
            datatype(&args[0])
        }
        "HASLANG" => {
            check_arity(n, args, 1, 1)?;
            Ok(has_lang(&args[0]).into())
        }
        "HASLANGDIR" => {
            check_arity(n, args, 1, 1)?;
            Ok(has_langdir(&args[0]).into())
        }
        "ISIRI" | "ISURI" => {
            check_arity(n, args, 1, 1)?;
            Ok(is_iri(&args[0]).into())
        }
        "ISBLANK" => {
            check_arity(n, args, 1, 1)?;
            Ok(is_blank(&args[0]).into())
        }
        "ISLITERAL" => {
            check_arity(n, args, 1, 1)?;
            Ok(is_literal(&args[0]).into())
        }
        "ISNUMERIC" => {
            check_arity(n, args, 1, 1)?;
            Ok(is_numeric(&args[0]).into())
        }
        "ISTRIPLE" => {
            check_arity(n, args, 1, 1)?;
            Ok(is_triple(&args[0]).into())
        }
        "BOUND" => {
            check_arity(n, args, 1, 1)?;
            Ok(bound(&args[0]).into())
        }
        "SAMETERM" => {
            check_arity(n, args, 2, 2)?;
            Ok(same_term(&args[0], &args[1]).into())
        }
        "LANGMATCHES" => {
            check_arity(n, args, 2, 2)?;
            Ok(lang_matches_value(&args[0], &args[1])?.into())
        }
        "COMPARE" => {
            check_arity(n, args, 3, 3)?;
            let op = args[2].lexical(n)?;
            Ok(compare(&args[0], &args[1], &op)?.into())
        }

        // constructors
        "IRI" | "URI" => {
            check_arity(n, args, 1, 1)?;
            iri(&args[0], ctx)
        }
        "BNODE" => {
            check_arity(n, args, 0, 1)?;
            bnode(arg(0))
        }
        "STRDT" => {
            check_arity(n, args, 2, 2)?;
            strdt(&args[0], &args[1])
        }
        "STRLANG" => {
            check_arity(n, args, 2, 2)?;
            strlang(&args[0], &args[1])
        }
        "STRLANGDIR" => {
            check_arity(n, args, 3, 3)?;
            strlangdir(&args[0], &args[1], &args[2])
        }
        "UUID" => {
            check_arity(n, args, 0, 0)?;
            Ok(uuid())
        }
        "STRUUID" => {
            check_arity(n, args, 0, 0)?;
            struuid()
        }

        // RDF-star
        "TRIPLE" => {
            check_arity(n, args, 3, 3)?;
            triple(&args[0], &args[1], &args[2])
        }
        "SUBJECT" => {
            check_arity(n, args, 1, 1)?;
            subject(&args[0])
        }
        "PREDICATE" => {
            check_arity(n, args, 1, 1)?;
            predicate(&args[0])
        }
        "OBJECT" => {
            check_arity(n, args, 1, 1)?;
            object(&args[0])
        }

        // strings
        "STRLEN" => {
            check_arity(n, args, 1, 1)?;
            strlen(&args[0])
        }
        "SUBSTR" => {
            check_arity(n, args, 2, 3)?;
            substr(&args[0], &args[1], arg(2))
        }
        "UCASE" => {
            check_arity(n, args, 1, 1)?;
            ucase(&args[0])
        }
        "LCASE" => {
            check_arity(n, args, 1, 1)?;
            lcase(&args[0])
        }
        "STRSTARTS" => {
            check_arity(n, args, 2, 2)?;
            Ok(strstarts(&args[0], &args[1])?.into())
        }
        "STRENDS" => {
            check_arity(n, args, 2, 2)?;
            Ok(strends(&args[0], &args[1])?.into())
        }
        "CONTAINS" => {
            check_arity(n, args, 2, 2)?;
            Ok(contains(&args[0], &args[1])?.into())
        }
        "STRBEFORE" => {
            check_arity(n, args, 2, 2)?;
            strbefore(&args[0], &args[1])
        }
        "STRAFTER" => {
            check_arity(n, args, 2, 2)?;
            strafter(&args[0], &args[1])
        }
        "ENCODE_FOR_URI" => {
            check_arity(n, args, 1, 1)?;
            encode_for_uri(&args[0])
        }
        "CONCAT" => concat(args),
        "REGEX" => {
            check_arity(n, args, 2, 3)?;
            Ok(regex(&args[0], &args[1], arg(2), ctx)?.into())
        }
        "REPLACE" => {
            check_arity(n, args, 3, 4)?;
            replace(&args[0], &args[1], &args[2], arg(3), ctx)
        }
        "FOLD" => {
            check_arity(n, args, 1, 1)?;
            fold(&args[0])
        }
        "NORMALIZE" => {
            check_arity(n, args, 1, 2)?;
            normalize(&args[0], arg(1))
        }

        // numerics
        "ABS" => {
            check_arity(n, args, 1, 1)?;
            abs(&args[0])
        }
        "ROUND" => {
            check_arity(n, args, 1, 1)?;
            round(&args[0])
        }
        "CEIL" => {
            check_arity(n, args, 1, 1)?;
            ceil(&args[0])
        }
        "FLOOR" => {
            check_arity(n, args, 1, 1)?;
            floor(&args[0])
        }
        "RAND" => {
            check_arity(n, args, 0, 0)?;
            Ok(rand())
        }

        // hashes
        "MD5" | "SHA1" | "SHA256" | "SHA384" | "SHA512" => {
            check_arity(n, args, 1, 1)?;
            let algorithm = match n {
                "MD5" => HashAlgorithm::Md5,
                "SHA1" => HashAlgorithm::Sha1,
                "SHA256" => HashAlgorithm::Sha256,
                "SHA384" => HashAlgorithm::Sha384,
                _ => HashAlgorithm::Sha512,
            };
            hash(&args[0], algorithm)
        }

        // temporal accessors
        "NOW" => {
            check_arity(n, args, 0, 0)?;
            Ok(now())
        }
        "YEAR" | "MONTH" | "DAY" => {
            check_arity(n, args, 1, 1)?;
            let field = match n {
                "YEAR" => TemporalField::Year,
                "MONTH" => TemporalField::Month,
                _ => TemporalField::Day,
            };
            temporal_field(&args[0], field)
        }
        "HOURS" | "MINUTES" | "SECONDS" => {
            check_arity(n, args, 1, 1)?;
            if is_duration(&args[0]) {
                return duration_component(&args[0], n);
            }
            let field = match n {
                "HOURS" => TemporalField::Hours,
                "MINUTES" => TemporalField::Minutes,
                _ => TemporalField::Seconds,
            };
            temporal_field(&args[0], field)
        }
        "DAYS" | "YEARS" | "MONTHS" => {
            check_arity(n, args, 1, 1)?;
            duration_component(&args[0], n)
        }
        "TIMEZONE" => {
            check_arity(n, args, 1, 1)?;
            match ctx.config.timezone_fallback {
                TimezoneFallback::Strict => timezone(&args[0]),
                TimezoneFallback::LocalOffset => timezone_or_local(&args[0]),
            }
        }
        "TZ" => {
            check_arity(n, args, 1, 1)?;
            tz(&args[0])
        }
        "ADJUST" => {
            check_arity(n, args, 1, 2)?;
            adjust(&args[0], arg(1))
        }

        // temporal arithmetic
        "DATEDIFF" => {
            check_arity(n, args, 2, 2)?;
            date_diff(&args[0], &args[1])
        }
        "DATETIMEDIFF" => {
            check_arity(n, args, 2, 2)?;
            date_time_diff(&args[0], &args[1])
        }
        "TIMEDIFF" => {
            check_arity(n, args, 2, 2)?;
            time_diff(&args[0], &args[1])
        }
        "DATEADD" => {
            check_arity(n, args, 2, 2)?;
            date_add(&args[0], &args[1])
        }
        "DATESUBTRACT" => {
            check_arity(n, args, 2, 2)?;
            date_subtract(&args[0], &args[1])
        }
        "DATETIMEADD" => {
            check_arity(n, args, 2, 2)?;
            date_time_add(&args[0], &args[1])
        }
        "DATETIMESUBTRACT" => {
            check_arity(n, args, 2, 2)?;
            date_time_subtract(&args[0], &args[1])
        }
        "TIMEADD" => {
            check_arity(n, args, 2, 2)?;
            time_add(&args[0], &args[1])
        }
        "TIMESUBTRACT" => {
            check_arity(n, args, 2, 2)?;
            time_subtract(&args[0], &args[1])
        }
        "DATEADDYEARMONTH" => {
            check_arity(n, args, 2, 2)?;
            date_add_year_month(&args[0], &args[1])
        }
        "DATESUBTRACTYEARMONTH" => {
            check_arity(n, args, 2, 2)?;
            date_subtract_year_month(&args[0], &args[1])
        }
        "DATETIMEADDYEARMONTH" => {
            check_arity(n, args, 2, 2)?;
            date_time_add_year_month(&args[0], &args[1])
        }
        "DATETIMESUBTRACTYEARMONTH" => {
            check_arity(n, args, 2, 2)?;
            date_time_subtract_year_month(&args[0], &args[1])
        }

        // duration arithmetic
        "DURATIONADD" => {
            check_arity(n, args, 2, 2)?;
            duration_add(&args[0], &args[1])
        }
        "DURATIONSUBTRACT" => {
            check_arity(n, args, 2, 2)?;
            duration_subtract(&args[0], &args[1])
        }
        "DURATIONMULTIPLY" => {
            check_arity(n, args, 2, 2)?;
            duration_multiply(&args[0], &args[1])
        }
        "DURATIONDIVIDE" => {
            check_arity(n, args, 2, 2)?;
            duration_divide(&args[0], &args[1])
        }

        _ => Err(FunctionError::Argument(format!("unknown function '{}'", name))),
    }
}
