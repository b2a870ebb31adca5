//! SPARQL 1.1/1.2 built-in functions, one module per subsystem
//!
//! Every function is a stateless free function over [`ExprValue`](super::ExprValue)
//! arguments. [`call_function`] is the name-based entry point an evaluator uses.

pub mod cast;
pub mod compare;
pub mod dispatch;
pub mod duration;
pub mod hash;
pub mod language;
pub mod numeric;
pub mod string;
pub mod temporal;
pub mod term;

pub use compare::{compare, same_term, same_term_opt, CompareOp};
pub use dispatch::call_function;
pub use duration::{
    format_day_time_duration, format_year_month_duration, parse_day_time_duration,
    parse_year_month_duration, Duration,
};
pub use language::{lang_matches, parse_directional_lang_tag, NormalizationForm};
pub use temporal::{TemporalKind, TemporalValue};
