//! Request body validation
//!
//! Each resource declares a slice of [`FieldRule`]s. [`validate`] checks a
//! record against them and reports every offending field at once, so a
//! client can fix a form in one round trip.

pub mod rules;

use crate::core::error::{Error, FieldViolation, Result};
use crate::storage::record::{Record, ID_FIELD};
use chrono::NaiveDate;
use serde_json::Value;

pub use rules::*;

/// Longest accepted caller-supplied id
pub const MAX_ID_LEN: usize = 100;

/// Shape a field value must have
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    /// String whose length in characters lies in `min..=max`. A non-zero
    /// `min` also rejects whitespace-only strings.
    Text {
        /// Minimum length
        min: usize,
        /// Maximum length
        max: usize,
    },
    /// String equal to one of the listed values
    OneOf(&'static [&'static str]),
    /// Integer in `min..=max`
    Integer {
        /// Smallest accepted value
        min: i64,
        /// Largest accepted value
        max: i64,
    },
    /// Any number not below `min`
    Number {
        /// Smallest accepted value
        min: f64,
    },
    /// `true` or `false`
    Boolean,
    /// Array whose items are all strings
    TextList,
    /// Any array
    Array,
    /// Absolute `http` or `https` URL
    Url,
    /// Email address
    Email,
    /// Calendar date written `YYYY-MM-DD`, optionally allowing `null`
    Date {
        /// Whether `null` is accepted
        nullable: bool,
    },
    /// Object whose values are all URLs
    UrlMap,
}

/// Constraint on one named field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Field name
    pub name: &'static str,
    /// Expected value shape
    pub kind: Kind,
    /// Must be present when creating
    pub required: bool,
}

impl FieldRule {
    /// A field that must be present on create
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self { name, kind, required: true }
    }

    /// A field that is checked only when present
    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self { name, kind, required: false }
    }
}

/// Whether required fields must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full body, required fields enforced, `id` checked
    Create,
    /// Full body, required fields enforced. Not a stored record, so `id`
    /// is just another unknown field.
    Submit,
    /// Partial body, only present fields checked
    Update,
}

/// Check `record` against `rules`. Fields without a rule pass through
/// untouched.
pub fn validate(record: &Record, rules: &[FieldRule], mode: Mode) -> Result<()> {
    let mut violations = Vec::new();

    if mode == Mode::Create {
        if let Some(value) = record.get(ID_FIELD) {
            if let Err(message) = check(value, Kind::Text { min: 1, max: MAX_ID_LEN }) {
                violations.push(FieldViolation::new(ID_FIELD, message));
            }
        }
    }

    for rule in rules {
        match record.get(rule.name) {
            Some(value) => {
                if let Err(message) = check(value, rule.kind) {
                    violations.push(FieldViolation::new(rule.name, message));
                }
            }
            None if rule.required && mode != Mode::Update => {
                violations.push(FieldViolation::new(rule.name, format!("{} is required", rule.name)));
            }
            None => {}
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(violations))
    }
}

/// Check a project id taken from a route path
pub fn validate_project_id(project_id: &str) -> Result<()> {
    check(&Value::String(project_id.to_string()), Kind::Text { min: 1, max: MAX_ID_LEN })
        .map_err(|message| Error::validation(vec![FieldViolation::new("projectId", message)]))
}

fn check(value: &Value, kind: Kind) -> std::result::Result<(), String> {
    match kind {
        Kind::Text { min, max } => {
            let text = value.as_str().ok_or("must be a string")?;
            check_length(text, min, max)
        }
        Kind::OneOf(allowed) => match value.as_str() {
            Some(text) if allowed.contains(&text) => Ok(()),
            _ => Err(format!("must be one of: {}", allowed.join(", "))),
        },
        Kind::Integer { min, max } => match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => Ok(()),
            _ => Err(format!("must be an integer between {} and {}", min, max)),
        },
        Kind::Number { min } => match value.as_f64() {
            Some(n) if n >= min => Ok(()),
            _ => Err(format!("must be a number greater than or equal to {}", min)),
        },
        Kind::Boolean => value.as_bool().map(|_| ()).ok_or_else(|| "must be a boolean".to_string()),
        Kind::TextList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => Ok(()),
            _ => Err("must be an array of strings".to_string()),
        },
        Kind::Array => value.as_array().map(|_| ()).ok_or_else(|| "must be an array".to_string()),
        Kind::Url => match value.as_str() {
            Some(text) if is_url(text) => Ok(()),
            _ => Err("must be a valid http(s) URL".to_string()),
        },
        Kind::Email => match value.as_str() {
            Some(text) if is_email(text) => Ok(()),
            _ => Err("must be a valid email address".to_string()),
        },
        Kind::Date { nullable } => match value {
            Value::Null if nullable => Ok(()),
            Value::String(text) if is_date(text) => Ok(()),
            _ => Err("must be a date in YYYY-MM-DD format".to_string()),
        },
        Kind::UrlMap => match value.as_object() {
            Some(links) if links.values().all(|v| v.as_str().is_some_and(is_url)) => Ok(()),
            _ => Err("must be an object of URL strings".to_string()),
        },
    }
}

fn check_length(text: &str, min: usize, max: usize) -> std::result::Result<(), String> {
    if min > 0 && text.trim().is_empty() {
        return Err("must not be blank".to_string());
    }

    let len = text.chars().count();
    if len < min || len > max {
        if min == 0 {
            return Err(format!("must be at most {} characters", max));
        }
        return Err(format!("must be between {} and {} characters", min, max));
    }

    Ok(())
}

fn is_url(text: &str) -> bool {
    let rest = text
        .strip_prefix("https://")
        .or_else(|| text.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !text.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn is_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }

    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn is_date(text: &str) -> bool {
    text.len() == 10 && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}
