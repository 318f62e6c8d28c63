//! Datetime schema validation.
//!
//! Datetimes arrive as RFC 3339 strings and validate to
//! `chrono::DateTime<FixedOffset>`, so bound comparisons respect offsets.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::string::value_type_name;
use crate::schema::traits::SchemaLike;

/// A constraint applied to datetime values.
#[derive(Clone)]
enum DateTimeConstraint {
    Min {
        bound: DateTime<FixedOffset>,
        message: Option<String>,
    },
    Max {
        bound: DateTime<FixedOffset>,
        message: Option<String>,
    },
}

/// A schema for validating RFC 3339 datetime strings.
///
/// The value must be a string that parses as RFC 3339; parse failures report
/// `invalid_format`. Bounds are inclusive and report `date_too_early` /
/// `date_too_late`. The erased output is the canonical RFC 3339 rendering.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::datetime();
///
/// let result = schema.validate(&json!("2024-06-01T12:00:00Z"), &JsonPath::root());
/// assert!(result.is_success());
///
/// let result = schema.validate(&json!("not a date"), &JsonPath::root());
/// assert!(result.is_failure());
/// ```
#[derive(Clone)]
pub struct DateTimeSchema {
    constraints: Vec<DateTimeConstraint>,
    type_error_message: Option<String>,
}

impl DateTimeSchema {
    /// Creates a new datetime schema.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires the datetime to be at or after `bound` (`date_too_early`).
    pub fn min(mut self, bound: DateTime<FixedOffset>) -> Self {
        self.constraints.push(DateTimeConstraint::Min {
            bound,
            message: None,
        });
        self
    }

    /// Requires the datetime to be at or before `bound` (`date_too_late`).
    pub fn max(mut self, bound: DateTime<FixedOffset>) -> Self {
        self.constraints.push(DateTimeConstraint::Max {
            bound,
            message: None,
        });
        self
    }

    /// Sets a custom message for the most recent constraint, or the parse
    /// error message when no constraints have been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                DateTimeConstraint::Min { message: m, .. } => *m = Some(message.into()),
                DateTimeConstraint::Max { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }
}

impl Default for DateTimeSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for DateTimeSchema {
    type Output = DateTime<FixedOffset>;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
    ) -> Validation<DateTime<FixedOffset>, Issues> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), "expected datetime string")
                        .with_code(codes::INVALID_TYPE)
                        .with_got(value_type_name(value))
                        .with_expected("string"),
                ));
            }
        };

        let dt = match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt,
            Err(e) => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| format!("invalid RFC 3339 datetime: {}", e));
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code(codes::INVALID_FORMAT)
                        .with_got(s.to_string())
                        .with_expected("RFC 3339 datetime"),
                ));
            }
        };

        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, dt, path))
            .collect();

        match Issues::from_vec(issues) {
            None => Validation::Success(dt),
            Some(issues) => Validation::Failure(issues),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path)
            .map(|dt| Value::String(dt.to_rfc3339()))
    }
}

/// Checks a single constraint and returns an issue if it fails.
fn check_constraint(
    constraint: &DateTimeConstraint,
    value: DateTime<FixedOffset>,
    path: &JsonPath,
) -> Option<Issue> {
    match constraint {
        DateTimeConstraint::Min { bound, message } => {
            if value < *bound {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must not be before {}", bound.to_rfc3339()));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::DATE_TOO_EARLY)
                        .with_expected(format!("at or after {}", bound.to_rfc3339()))
                        .with_got(value.to_rfc3339()),
                )
            } else {
                None
            }
        }
        DateTimeConstraint::Max { bound, message } => {
            if value > *bound {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must not be after {}", bound.to_rfc3339()));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::DATE_TOO_LATE)
                        .with_expected(format!("at or before {}", bound.to_rfc3339()))
                        .with_got(value.to_rfc3339()),
                )
            } else {
                None
            }
        }
    }
}
