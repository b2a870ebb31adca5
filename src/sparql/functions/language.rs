//! Language tags, base direction, case folding and Unicode normalization

use crate::rdf::{Direction, RdfTerm};
use crate::sparql::error::{FunctionError, FunctionResult};
use crate::sparql::value::ExprValue;
use unicode_normalization::UnicodeNormalization;

/// Split a directional tag `lang--dir` into language and direction
pub fn parse_directional_lang_tag(tag: &str) -> FunctionResult<(String, Option<Direction>)> {
    let (language, direction) = Direction::split_tag(tag)?;
    Ok((language.to_string(), direction))
}

/// Like `split_tag`, but keeps an unrecognized direction as text so matching can reject it
fn split_loose(tag: &str) -> (&str, Option<&str>) {
    match tag.split_once("--") {
        Some((language, direction)) => (language, Some(direction)),
        None => (tag, None),
    }
}

/// RFC4647 basic filtering, extended with `--dir` direction suffixes
///
/// A range with a direction only matches tags with the same direction; a range
/// without one matches any direction.
pub fn lang_matches(tag: &str, range: &str) -> bool {
    let (tag_lang, tag_dir) = split_loose(tag);
    let (range_lang, range_dir) = split_loose(range);

    if let Some(range_dir) = range_dir {
        if !tag_dir.is_some_and(|d| d.eq_ignore_ascii_case(range_dir)) {
            return false;
        }
    }
    if range_lang == "*" {
        return !tag_lang.is_empty();
    }
    if tag_lang.is_empty() {
        return range_lang.is_empty();
    }
    if tag_lang.eq_ignore_ascii_case(range_lang) {
        return true;
    }
    match (tag_lang.get(..range_lang.len()), tag_lang.as_bytes().get(range_lang.len())) {
        (Some(prefix), Some(b'-')) => !range_lang.is_empty() && prefix.eq_ignore_ascii_case(range_lang),
        _ => false,
    }
}

/// `langMatches` over argument values
pub fn lang_matches_value(tag: &ExprValue, range: &ExprValue) -> FunctionResult<bool> {
    Ok(lang_matches(&tag.lexical("langMatches")?, &range.lexical("langMatches")?))
}

fn literal_arg<'a>(value: &'a ExprValue, function: &str) -> FunctionResult<Option<&'a crate::rdf::Literal>> {
    match value {
        ExprValue::Term(RdfTerm::Literal(l)) => Ok(Some(l)),
        ExprValue::String(_) | ExprValue::Integer(_) | ExprValue::Float(_) | ExprValue::Boolean(_) => Ok(None),
        other => Err(FunctionError::Argument(format!("{} expects a literal, got {}", function, other))),
    }
}

/// `LANG`: the language tag without direction, or the empty string
pub fn lang(value: &ExprValue) -> FunctionResult<ExprValue> {
    let language = literal_arg(value, "LANG")?.and_then(|l| l.language()).unwrap_or("");
    ExprValue::simple(language)
}

/// `LANGDIR`: `lang--dir`, `lang`, or the empty string
pub fn langdir(value: &ExprValue) -> FunctionResult<ExprValue> {
    let tag = literal_arg(value, "LANGDIR")?.map(|l| l.lang_dir_tag()).unwrap_or_default();
    ExprValue::simple(tag)
}

/// `hasLANG`: a literal carrying a language tag
pub fn has_lang(value: &ExprValue) -> bool {
    value.as_literal().is_some_and(|l| l.language().is_some())
}

/// `hasLANGDIR`: a literal carrying both language and direction
pub fn has_langdir(value: &ExprValue) -> bool {
    value
        .as_literal()
        .is_some_and(|l| l.language().is_some() && l.direction().is_some())
}

/// Full case folding for characters whose folding differs from lowercasing
fn fold_exception(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' | '\u{1E9E}' => "ss",
        'ŉ' => "\u{2BC}n",
        'ǰ' => "j\u{30C}",
        'ΐ' => "\u{3B9}\u{308}\u{301}",
        'ΰ' => "\u{3C5}\u{308}\u{301}",
        'ς' => "σ",
        'ϐ' => "β",
        'ϑ' => "θ",
        'ϕ' => "φ",
        'ϖ' => "π",
        'ϰ' => "κ",
        'ϱ' => "ρ",
        'ϵ' => "ε",
        '\u{345}' | '\u{1FBE}' => "ι",
        '\u{B5}' => "\u{3BC}",
        'ſ' => "s",
        'ẛ' => "ṡ",
        'և' => "եւ",
        'ẖ' => "h\u{331}",
        'ẗ' => "t\u{308}",
        'ẘ' => "w\u{30A}",
        'ẙ' => "y\u{30A}",
        'ẚ' => "a\u{2BE}",
        'ﬀ' => "ff",
        'ﬁ' => "fi",
        'ﬂ' => "fl",
        'ﬃ' => "ffi",
        'ﬄ' => "ffl",
        'ﬅ' | 'ﬆ' => "st",
        'ﬓ' => "մն",
        'ﬔ' => "մե",
        'ﬕ' => "մի",
        'ﬖ' => "վն",
        'ﬗ' => "մխ",
        _ => return None,
    })
}

/// Unicode full case folding of a string
pub fn fold_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match fold_exception(c) {
            Some(folded) => out.push_str(folded),
            None => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// `FOLD`: case-folded copy, keeping language and direction
pub fn fold(value: &ExprValue) -> FunctionResult<ExprValue> {
    let arg = value.string_arg("FOLD")?;
    arg.derive(fold_str(&arg.value))
}

/// Unicode normalization forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl std::str::FromStr for NormalizationForm {
    type Err = FunctionError;

    /// Form names are case-insensitive; an empty name means NFC
    fn from_str(s: &str) -> FunctionResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "NFC" => Ok(NormalizationForm::Nfc),
            "NFD" => Ok(NormalizationForm::Nfd),
            "NFKC" => Ok(NormalizationForm::Nfkc),
            "NFKD" => Ok(NormalizationForm::Nfkd),
            other => Err(FunctionError::Validation(format!(
                "unknown normalization form '{}', expected NFC, NFD, NFKC or NFKD",
                other
            ))),
        }
    }
}

pub fn normalize_str(s: &str, form: NormalizationForm) -> String {
    match form {
        NormalizationForm::Nfc => s.nfc().collect(),
        NormalizationForm::Nfd => s.nfd().collect(),
        NormalizationForm::Nfkc => s.nfkc().collect(),
        NormalizationForm::Nfkd => s.nfkd().collect(),
    }
}

/// `NORMALIZE(string, form?)`, defaulting to NFC
pub fn normalize(value: &ExprValue, form: Option<&ExprValue>) -> FunctionResult<ExprValue> {
    let arg = value.string_arg("NORMALIZE")?;
    let form: NormalizationForm = match form {
        Some(f) if !f.is_unbound() => f.lexical("NORMALIZE")?.parse()?,
        _ => NormalizationForm::Nfc,
    };
    arg.derive(normalize_str(&arg.value, form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    #[test]
    fn test_parse_directional_tag() {
        assert_eq!(
            parse_directional_lang_tag("ar--rtl").unwrap(),
            ("ar".to_string(), Some(Direction::Rtl))
        );
        assert_eq!(parse_directional_lang_tag("en-US").unwrap(), ("en-US".to_string(), None));
        assert!(parse_directional_lang_tag("en--up").is_err());
    }

    #[test]
    fn test_lang_matches() {
        assert!(lang_matches("ar--rtl", "ar"));
        assert!(!lang_matches("ar--rtl", "ar--ltr"));
        assert!(lang_matches("ar--rtl", "AR--RTL"));
        assert!(!lang_matches("ar", "ar--rtl"));
        assert!(lang_matches("en-US", "en"));
        assert!(lang_matches("EN-us", "en-US"));
        assert!(!lang_matches("english", "en"));
        assert!(lang_matches("en", "*"));
        assert!(!lang_matches("", "*"));
        assert!(lang_matches("", ""));
        assert!(!lang_matches("en", ""));
        assert!(!lang_matches("", "en"));
    }

    #[test]
    fn test_lang_and_langdir() {
        let dir: ExprValue = Literal::new("שלום", None, Some("he--rtl")).unwrap().into();
        assert_eq!(langdir(&dir).unwrap().as_literal().unwrap().value(), "he--rtl");
        assert_eq!(lang(&dir).unwrap().as_literal().unwrap().value(), "he");
        assert!(has_langdir(&dir));
        assert!(has_lang(&dir));

        let en: ExprValue = Literal::new("hi", None, Some("en")).unwrap().into();
        assert_eq!(langdir(&en).unwrap().as_literal().unwrap().value(), "en");
        assert!(!has_langdir(&en));

        let plain = ExprValue::from("hi");
        assert_eq!(langdir(&plain).unwrap(), ExprValue::String(String::new()));
        assert!(!has_lang(&plain));
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold_str("Straße"), "strasse");
        assert_eq!(fold_str("ﬁle"), "file");
        assert_eq!(fold_str("ﬂow ﬀ"), "flow ff");
        assert_eq!(fold_str("ΣΊΣΥΦΟΣ"), fold_str("σίσυφος"));
        assert_eq!(fold(&"Straße".into()).unwrap().as_literal().unwrap().value(), "strasse");
    }

    #[test]
    fn test_fold_keeps_language() {
        let value: ExprValue = Literal::new("GRO\u{1E9E}", None, Some("de")).unwrap().into();
        let folded = fold(&value).unwrap();
        let lit = folded.as_literal().unwrap();
        assert_eq!(lit.value(), "gross");
        assert_eq!(lit.language(), Some("de"));
    }

    #[test]
    fn test_normalize() {
        let decomposed = "e\u{301}";
        let r = normalize(&decomposed.into(), None).unwrap();
        assert_eq!(r.as_literal().unwrap().value(), "\u{e9}");

        let r = normalize(&"\u{e9}".into(), Some(&"nfd".into())).unwrap();
        assert_eq!(r.as_literal().unwrap().value(), decomposed);

        let r = normalize(&"ﬁ".into(), Some(&"NFKC".into())).unwrap();
        assert_eq!(r.as_literal().unwrap().value(), "fi");

        assert!(matches!(
            normalize(&"x".into(), Some(&"NFX".into())),
            Err(FunctionError::Validation(_))
        ));
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = ["Åström", "ﬁ\u{301}", "e\u{301}\u{323}", "한국어", "①②"];
        for form in [
            NormalizationForm::Nfc,
            NormalizationForm::Nfd,
            NormalizationForm::Nfkc,
            NormalizationForm::Nfkd,
        ] {
            for s in samples {
                let once = normalize_str(s, form);
                assert_eq!(normalize_str(&once, form), once);
            }
        }
    }
}
