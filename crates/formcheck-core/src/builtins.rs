//! Built-in validators.
//!
//! Every format validator passes on an empty value; only `required` rejects
//! emptiness. That keeps optional fields optional without extra markup.

use crate::context::FieldContext;
use crate::descriptor::ValidatorDef;
use crate::error::PatternError;
use crate::registry::ValidatorRegistry;
use regex::Regex;
use std::sync::OnceLock;

/// Priority of `required`; it runs before everything else.
pub const REQUIRED_PRIORITY: i32 = 99;
/// Priority of `number`.
pub const NUMBER_PRIORITY: i32 = 2;
/// Priority of `text`.
pub const TEXT_PRIORITY: i32 = 0;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static INTEGER_REGEX: OnceLock<Regex> = OnceLock::new();
static PATTERN_LITERAL: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$").unwrap()
    })
}

fn integer_regex() -> &'static Regex {
    INTEGER_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap())
}

fn pattern_literal() -> &'static Regex {
    PATTERN_LITERAL.get_or_init(|| Regex::new(r"^/(.*?)/([gimsuy]*)$").unwrap())
}

/// Parse a number the way form values are read: whole string, trimmed,
/// finite only (`NaN` and `inf` spellings are rejected).
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_count(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}

/// Compile a `/body/flags` literal.
///
/// The body may use lookaround and backreferences. `i`, `m`, `s` become
/// inline flags; `g`, `u` and `y` have no meaning for a single match test
/// and are accepted but ignored.
pub fn compile_pattern(literal: &str) -> Result<fancy_regex::Regex, PatternError> {
    let caps = pattern_literal()
        .captures(literal.trim())
        .ok_or_else(|| PatternError::Malformed(literal.to_string()))?;
    let flags: String = caps[2].chars().filter(|f| matches!(f, 'i' | 'm' | 's')).collect();
    let body = if flags.is_empty() {
        caps[1].to_string()
    } else {
        format!("(?{flags}){}", &caps[1])
    };

    fancy_regex::Regex::new(&body).map_err(|e| PatternError::Compile {
        literal: literal.to_string(),
        reason: e.to_string(),
    })
}

pub fn text(_value: &str, _params: &[String], _ctx: &FieldContext<'_>) -> bool {
    true
}

/// Checkbox and radio groups need one checked member; other controls need a
/// non-empty value.
pub fn required(value: &str, _params: &[String], ctx: &FieldContext<'_>) -> bool {
    if ctx.kind().is_grouped() {
        ctx.group_checked_count() > 0
    } else {
        !value.is_empty()
    }
}

pub fn email(value: &str, _params: &[String], _ctx: &FieldContext<'_>) -> bool {
    value.is_empty() || email_regex().is_match(value)
}

pub fn number(value: &str, _params: &[String], _ctx: &FieldContext<'_>) -> bool {
    value.is_empty() || parse_number(value).is_some()
}

pub fn integer(value: &str, _params: &[String], _ctx: &FieldContext<'_>) -> bool {
    value.is_empty() || integer_regex().is_match(value)
}

pub fn minlength(value: &str, params: &[String], _ctx: &FieldContext<'_>) -> bool {
    if value.is_empty() {
        return true;
    }
    let len = value.chars().count();
    params
        .first()
        .and_then(|p| parse_count(p))
        .is_some_and(|min| len >= min)
}

pub fn maxlength(value: &str, params: &[String], _ctx: &FieldContext<'_>) -> bool {
    if value.is_empty() {
        return true;
    }
    let len = value.chars().count();
    params
        .first()
        .and_then(|p| parse_count(p))
        .is_some_and(|max| len <= max)
}

/// Checkbox groups compare the checked count, other controls their numeric
/// value.
pub fn min(value: &str, params: &[String], ctx: &FieldContext<'_>) -> bool {
    bound(value, params, ctx, |actual, limit| actual >= limit)
}

pub fn max(value: &str, params: &[String], ctx: &FieldContext<'_>) -> bool {
    bound(value, params, ctx, |actual, limit| actual <= limit)
}

fn bound(value: &str, params: &[String], ctx: &FieldContext<'_>, cmp: fn(f64, f64) -> bool) -> bool {
    let limit = params.first().map(String::as_str).unwrap_or_default();

    if ctx.kind().is_checkbox() {
        return parse_count(limit)
            .is_some_and(|limit| cmp(ctx.group_checked_count() as f64, limit as f64));
    }

    if value.is_empty() {
        return true;
    }

    match (parse_number(value), parse_number(limit)) {
        (Some(actual), Some(limit)) => cmp(actual, limit),
        _ => false,
    }
}

/// Fails closed on a malformed literal. Parameters are re-joined, so commas
/// inside the literal (`/a{1,3}/`) survive attribute splitting.
pub fn pattern(value: &str, params: &[String], ctx: &FieldContext<'_>) -> bool {
    if value.is_empty() {
        return true;
    }
    let literal = params.join(",");
    let matched = compile_pattern(&literal).and_then(|regex| {
        regex.is_match(value).map_err(|e| PatternError::Compile {
            literal: literal.clone(),
            reason: e.to_string(),
        })
    });
    match matched {
        Ok(matched) => matched,
        Err(error) => {
            crate::trace_warn!(element = %ctx.element(), %error, "pattern validator cannot run");
            false
        }
    }
}

/// Register the built-in validators on a registry.
pub(crate) fn install(registry: &mut ValidatorRegistry) {
    registry.register("text", ValidatorDef::new(text).priority(TEXT_PRIORITY));
    registry.register(
        "required",
        ValidatorDef::new(required)
            .priority(REQUIRED_PRIORITY)
            .halt_on_failure(true),
    );
    registry.register("email", ValidatorDef::new(email));
    registry.register("number", ValidatorDef::new(number).priority(NUMBER_PRIORITY));
    registry.register("integer", ValidatorDef::new(integer));
    registry.register("minlength", ValidatorDef::new(minlength));
    registry.register("maxlength", ValidatorDef::new(maxlength));
    registry.register("min", ValidatorDef::new(min));
    registry.register("max", ValidatorDef::new(max));
    registry.register("pattern", ValidatorDef::new(pattern));
}
