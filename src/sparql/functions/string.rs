//! String built-ins: STRLEN, SUBSTR, UCASE, LCASE, STRSTARTS, STRENDS,
//! CONTAINS, STRBEFORE, STRAFTER, ENCODE_FOR_URI, CONCAT, REGEX, REPLACE
//!
//! Results derived from a single string argument keep its language tag and
//! base direction. Two-argument functions require compatible arguments: the
//! second must be untagged or carry the same language as the first.

use crate::sparql::config::FunctionContext;
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::{ExprValue, StringArg};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::{Regex, RegexBuilder};

/// Characters ENCODE_FOR_URI leaves alone: RFC 3986 unreserved
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn compatible_pair<'a>(
    a: &'a ExprValue,
    b: &'a ExprValue,
    function: &str,
) -> FunctionResult<(StringArg<'a>, StringArg<'a>)> {
    let a = a.string_arg(function)?;
    let b = b.string_arg(function)?;
    if !a.is_compatible_with(&b) {
        return Err(FunctionError::Argument(format!(
            "{}: incompatible language tags {:?} and {:?}",
            function, a.language, b.language
        )));
    }
    Ok((a, b))
}

/// `STRLEN`: length in characters
pub fn strlen(value: &ExprValue) -> FunctionResult<ExprValue> {
    let arg = value.string_arg("STRLEN")?;
    Ok(ExprValue::Integer(arg.value.chars().count() as i64))
}

fn xpath_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// `SUBSTR(string, start, length?)` with 1-based positions and XPath rounding
pub fn substr(value: &ExprValue, start: &ExprValue, length: Option<&ExprValue>) -> FunctionResult<ExprValue> {
    let arg = value.string_arg("SUBSTR")?;
    let number = |v: &ExprValue| {
        super::numeric::numeric_value(v)
            .ok_or_else(|| FunctionError::Argument(format!("SUBSTR expects a numeric position, got {}", v)))
    };
    let first = xpath_round(number(start)?);
    let end = match length {
        Some(len) if !len.is_unbound() => first + xpath_round(number(len)?),
        _ => f64::INFINITY,
    };
    let result: String = arg
        .value
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let position = (*i + 1) as f64;
            position >= first && position < end
        })
        .map(|(_, c)| c)
        .collect();
    arg.derive(result)
}

pub fn ucase(value: &ExprValue) -> FunctionResult<ExprValue> {
    let arg = value.string_arg("UCASE")?;
    arg.derive(arg.value.to_uppercase())
}

pub fn lcase(value: &ExprValue) -> FunctionResult<ExprValue> {
    let arg = value.string_arg("LCASE")?;
    arg.derive(arg.value.to_lowercase())
}

pub fn strstarts(value: &ExprValue, prefix: &ExprValue) -> FunctionResult<bool> {
    let (a, b) = compatible_pair(value, prefix, "STRSTARTS")?;
    Ok(a.value.starts_with(b.value.as_ref()))
}

pub fn strends(value: &ExprValue, suffix: &ExprValue) -> FunctionResult<bool> {
    let (a, b) = compatible_pair(value, suffix, "STRENDS")?;
    Ok(a.value.ends_with(b.value.as_ref()))
}

pub fn contains(value: &ExprValue, needle: &ExprValue) -> FunctionResult<bool> {
    let (a, b) = compatible_pair(value, needle, "CONTAINS")?;
    Ok(a.value.contains(b.value.as_ref()))
}

/// `STRBEFORE`: text before the first match, or the empty string
pub fn strbefore(value: &ExprValue, needle: &ExprValue) -> FunctionResult<ExprValue> {
    let (a, b) = compatible_pair(value, needle, "STRBEFORE")?;
    match a.value.find(b.value.as_ref()) {
        Some(pos) => a.derive(a.value[..pos].to_string()),
        None => Ok(ExprValue::String(String::new())),
    }
}

/// `STRAFTER`: text after the first match, or the empty string
pub fn strafter(value: &ExprValue, needle: &ExprValue) -> FunctionResult<ExprValue> {
    let (a, b) = compatible_pair(value, needle, "STRAFTER")?;
    match a.value.find(b.value.as_ref()) {
        Some(pos) => a.derive(a.value[pos + b.value.len()..].to_string()),
        None => Ok(ExprValue::String(String::new())),
    }
}

pub fn encode_for_uri(value: &ExprValue) -> FunctionResult<ExprValue> {
    let arg = value.string_arg("ENCODE_FOR_URI")?;
    ExprValue::simple(utf8_percent_encode(&arg.value, URI_COMPONENT).to_string())
}

/// `CONCAT`: keeps a language tag only when every argument shares it
pub fn concat(values: &[ExprValue]) -> FunctionResult<ExprValue> {
    let args = values
        .iter()
        .map(|v| v.string_arg("CONCAT"))
        .collect::<FunctionResult<Vec<_>>>()?;
    let text: String = args.iter().map(|a| a.value.as_ref()).collect();
    match args.split_first() {
        Some((first, rest))
            if first.language.is_some()
                && rest.iter().all(|a| a.language == first.language && a.direction == first.direction) =>
        {
            first.derive(text)
        }
        _ => ExprValue::simple(text),
    }
}

/// Compile a SPARQL regex with XPath flags (`i`, `m`, `s`, `x`, `q`)
pub fn build_regex(pattern: &str, flags: &str, size_limit: usize) -> FunctionResult<Regex> {
    let literal = flags.contains('q');
    let escaped;
    let pattern = if literal {
        escaped = regex::escape(pattern);
        escaped.as_str()
    } else {
        pattern
    };
    let mut builder = RegexBuilder::new(pattern);
    builder.size_limit(size_limit);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'q' => {}
            c => return Err(FunctionError::Argument(format!("unknown regex flag '{}'", c))),
        }
    }
    builder
        .build()
        .map_err(|e| FunctionError::Argument(format!("invalid regex '{}': {}", pattern, e)))
}

fn flags_of(flags: Option<&ExprValue>, function: &str) -> FunctionResult<String> {
    match flags {
        Some(f) if !f.is_unbound() => Ok(f.lexical(function)?.into_owned()),
        _ => Ok(String::new()),
    }
}

/// `REGEX(text, pattern, flags?)`
pub fn regex(
    value: &ExprValue,
    pattern: &ExprValue,
    flags: Option<&ExprValue>,
    ctx: &FunctionContext,
) -> FunctionResult<bool> {
    let text = value.string_arg("REGEX")?;
    let pattern = pattern.lexical("REGEX")?;
    let re = build_regex(&pattern, &flags_of(flags, "REGEX")?, ctx.config.regex_size_limit)?;
    Ok(re.is_match(&text.value))
}

/// Rewrite an XPath replacement string (`$1`, `\$`, `\\`) into `regex` syntax
fn replacement_template(replacement: &str) -> FunctionResult<String> {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('$') => out.push_str("$$"),
                Some('\\') => out.push('\\'),
                _ => {
                    return Err(FunctionError::Argument(format!(
                        "invalid escape in replacement '{}'",
                        replacement
                    )))
                }
            },
            '$' => {
                let mut group = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    group.push(*d);
                    chars.next();
                }
                if group.is_empty() {
                    return Err(FunctionError::Argument(format!(
                        "'$' without group number in replacement '{}'",
                        replacement
                    )));
                }
                out.push_str(&format!("${{{}}}", group));
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// `REPLACE(text, pattern, replacement, flags?)`
pub fn replace(
    value: &ExprValue,
    pattern: &ExprValue,
    replacement: &ExprValue,
    flags: Option<&ExprValue>,
    ctx: &FunctionContext,
) -> FunctionResult<ExprValue> {
    let text = value.string_arg("REPLACE")?;
    let pattern = pattern.lexical("REPLACE")?;
    let flags = flags_of(flags, "REPLACE")?;
    let re = build_regex(&pattern, &flags, ctx.config.regex_size_limit)?;
    if re.is_match("") {
        return Err(FunctionError::Argument(format!(
            "REPLACE pattern '{}' matches the empty string",
            pattern
        )));
    }
    let replacement = replacement.lexical("REPLACE")?;
    let result = if flags.contains('q') {
        re.replace_all(&text.value, regex::NoExpand(replacement.as_ref())).into_owned()
    } else {
        re.replace_all(&text.value, replacement_template(&replacement)?.as_str())
            .into_owned()
    };
    text.derive(result)
}
