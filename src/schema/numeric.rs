//! Numeric schema validation.
//!
//! This module provides [`IntegerSchema`] and [`FloatSchema`] for validating
//! numeric values with constraints like bounds, sign requirements, and
//! divisibility.

use serde_json::Value;
use std::ops::RangeInclusive;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::string::value_type_name;
use crate::schema::traits::SchemaLike;

/// A constraint applied to integer values.
#[derive(Clone)]
enum IntegerConstraint {
    Min { value: i64, message: Option<String> },
    Max { value: i64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
    Negative { message: Option<String> },
    MultipleOf { value: i64, message: Option<String> },
}

/// A schema for validating integer values.
///
/// `IntegerSchema` validates that values are integers (floats are rejected,
/// including ones with a zero fraction) and optionally applies constraints.
/// All constraint violations are accumulated rather than short-circuiting on
/// the first failure.
///
/// With [`coerce`](IntegerSchema::coerce), string inputs are parsed before
/// the type check; constraints then run on the parsed value.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::integer().min(0).max(100);
///
/// let result = schema.validate(&json!(-50), &JsonPath::root());
/// assert!(result.is_failure());
/// ```
#[derive(Clone)]
pub struct IntegerSchema {
    constraints: Vec<IntegerConstraint>,
    coerce: bool,
    type_error_message: Option<String>,
}

impl IntegerSchema {
    /// Creates a new integer schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            coerce: false,
            type_error_message: None,
        }
    }

    /// Enables coercion: string inputs are parsed as integers before the
    /// type check. Unparseable strings report `invalid_coercion`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::integer().coerce().min(10);
    ///
    /// // "5" parses to 5, which then fails the min constraint
    /// let result = schema.validate(&json!("5"), &JsonPath::root());
    /// let issues = result.into_result().unwrap_err();
    /// assert_eq!(issues.first().code, "too_small");
    /// ```
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Adds a minimum value constraint (inclusive).
    ///
    /// Violations report `too_small`.
    pub fn min(mut self, value: i64) -> Self {
        self.constraints.push(IntegerConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds a maximum value constraint (inclusive).
    ///
    /// Violations report `too_big`.
    pub fn max(mut self, value: i64) -> Self {
        self.constraints.push(IntegerConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Adds both minimum and maximum constraints (inclusive range).
    ///
    /// Equivalent to `.min(start).max(end)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::integer().range(1..=100);
    ///
    /// assert!(schema.validate(&json!(50), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!(150), &JsonPath::root()).is_failure());
    /// ```
    pub fn range(self, range: RangeInclusive<i64>) -> Self {
        self.min(*range.start()).max(*range.end())
    }

    /// Requires the integer to be greater than 0 (`too_small` otherwise).
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::Positive { message: None });
        self
    }

    /// Requires the integer to be at least 0 (`too_small` otherwise).
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::NonNegative { message: None });
        self
    }

    /// Requires the integer to be less than 0 (`too_big` otherwise).
    pub fn negative(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::Negative { message: None });
        self
    }

    /// Requires the integer to be divisible by `value`.
    ///
    /// Violations report `not_multiple_of`.
    pub fn multiple_of(mut self, value: i64) -> Self {
        self.constraints.push(IntegerConstraint::MultipleOf {
            value,
            message: None,
        });
        self
    }

    /// Sets a custom message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error
    /// message (used when the value is not an integer).
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::Schema;
    ///
    /// let schema = Schema::integer()
    ///     .min(18)
    ///     .error("must be at least 18 years old");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                IntegerConstraint::Min { message: m, .. } => *m = Some(message.into()),
                IntegerConstraint::Max { message: m, .. } => *m = Some(message.into()),
                IntegerConstraint::Positive { message: m } => *m = Some(message.into()),
                IntegerConstraint::NonNegative { message: m } => *m = Some(message.into()),
                IntegerConstraint::Negative { message: m } => *m = Some(message.into()),
                IntegerConstraint::MultipleOf { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    fn type_issue(&self, got: &str, path: &JsonPath) -> Issue {
        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| format!("expected integer, got {}", got));
        Issue::new(path.clone(), message)
            .with_code(codes::INVALID_TYPE)
            .with_got(got)
            .with_expected("integer")
    }

    fn extract(&self, value: &Value, path: &JsonPath) -> Result<i64, Issues> {
        if self.coerce {
            if let Value::String(s) = value {
                return s.trim().parse::<i64>().map_err(|_| {
                    Issues::single(
                        Issue::new(path.clone(), "cannot coerce to integer")
                            .with_code(codes::INVALID_COERCION)
                            .with_got(s.clone())
                            .with_expected("integer"),
                    )
                });
            }
        }

        match value {
            Value::Number(num) if num.is_i64() => Ok(num.as_i64().unwrap_or_default()),
            Value::Number(num) if num.is_u64() => {
                // u64 values beyond i64::MAX are integers we cannot represent
                match num.as_u64() {
                    Some(u) if u <= i64::MAX as u64 => Ok(u as i64),
                    _ => Err(Issues::single(
                        self.type_issue("number", path)
                            .with_message("integer value out of supported range")
                            .with_expected("integer in i64 range"),
                    )),
                }
            }
            Value::Number(_) => Err(Issues::single(self.type_issue("float", path))),
            _ => Err(Issues::single(self.type_issue(value_type_name(value), path))),
        }
    }
}

impl Default for IntegerSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for IntegerSchema {
    type Output = i64;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<i64, Issues> {
        let n = match self.extract(value, path) {
            Ok(n) => n,
            Err(issues) => return Validation::Failure(issues),
        };

        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_integer_constraint(c, n, path))
            .collect();

        match Issues::from_vec(issues) {
            None => Validation::Success(n),
            Some(issues) => Validation::Failure(issues),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path).map(|n| Value::Number(n.into()))
    }
}

/// Checks a single integer constraint and returns an issue if it fails.
fn check_integer_constraint(
    constraint: &IntegerConstraint,
    value: i64,
    path: &JsonPath,
) -> Option<Issue> {
    match constraint {
        IntegerConstraint::Min {
            value: min,
            message,
        } => {
            if value < *min {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at least {}, got {}", min, value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_SMALL)
                        .with_expected(format!("at least {}", min))
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        IntegerConstraint::Max {
            value: max,
            message,
        } => {
            if value > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at most {}, got {}", max, value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_BIG)
                        .with_expected(format!("at most {}", max))
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        IntegerConstraint::Positive { message } => {
            if value <= 0 {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be positive, got {}", value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_SMALL)
                        .with_expected("value > 0")
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        IntegerConstraint::NonNegative { message } => {
            if value < 0 {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be non-negative, got {}", value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_SMALL)
                        .with_expected("value >= 0")
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        IntegerConstraint::Negative { message } => {
            if value >= 0 {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be negative, got {}", value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_BIG)
                        .with_expected("value < 0")
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        IntegerConstraint::MultipleOf {
            value: divisor,
            message,
        } => {
            // checked_rem: i64::MIN % -1 overflows the plain operator
            if *divisor != 0 && value.checked_rem(*divisor).map_or(false, |r| r != 0) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be a multiple of {}, got {}", divisor, value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::NOT_MULTIPLE_OF)
                        .with_expected(format!("multiple of {}", divisor))
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
    }
}

/// A constraint applied to float values.
#[derive(Clone)]
enum FloatConstraint {
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Positive { message: Option<String> },
    Finite { message: Option<String> },
}

/// A schema for validating floating-point values.
///
/// Integral JSON numbers are accepted and widened to `f64`. With
/// [`coerce`](FloatSchema::coerce), string inputs are parsed before the type
/// check.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::float().min(0.0).max(1.0);
///
/// assert!(schema.validate(&json!(0.5), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!(1.5), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct FloatSchema {
    constraints: Vec<FloatConstraint>,
    coerce: bool,
    type_error_message: Option<String>,
}

impl FloatSchema {
    /// Creates a new float schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            coerce: false,
            type_error_message: None,
        }
    }

    /// Enables coercion: string inputs are parsed as floats before the type
    /// check. Unparseable strings report `invalid_coercion`.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Adds a minimum value constraint (inclusive, `too_small`).
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(FloatConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds a maximum value constraint (inclusive, `too_big`).
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(FloatConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Requires the float to be greater than 0 (`too_small` otherwise).
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(FloatConstraint::Positive { message: None });
        self
    }

    /// Rejects NaN and infinities (`invalid_format`). JSON numbers are
    /// always finite; this guards values produced by coercion.
    pub fn finite(mut self) -> Self {
        self.constraints
            .push(FloatConstraint::Finite { message: None });
        self
    }

    /// Sets a custom message for the most recent constraint, or the type
    /// error message when no constraints have been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                FloatConstraint::Min { message: m, .. } => *m = Some(message.into()),
                FloatConstraint::Max { message: m, .. } => *m = Some(message.into()),
                FloatConstraint::Positive { message: m } => *m = Some(message.into()),
                FloatConstraint::Finite { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    fn extract(&self, value: &Value, path: &JsonPath) -> Result<f64, Issues> {
        if self.coerce {
            if let Value::String(s) = value {
                return s.trim().parse::<f64>().map_err(|_| {
                    Issues::single(
                        Issue::new(path.clone(), "cannot coerce to float")
                            .with_code(codes::INVALID_COERCION)
                            .with_got(s.clone())
                            .with_expected("float"),
                    )
                });
            }
        }

        match value.as_f64() {
            Some(f) => Ok(f),
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected number".to_string());
                Err(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code(codes::INVALID_TYPE)
                        .with_got(value_type_name(value))
                        .with_expected("number"),
                ))
            }
        }
    }
}

impl Default for FloatSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for FloatSchema {
    type Output = f64;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<f64, Issues> {
        let f = match self.extract(value, path) {
            Ok(f) => f,
            Err(issues) => return Validation::Failure(issues),
        };

        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_float_constraint(c, f, path))
            .collect();

        match Issues::from_vec(issues) {
            None => Validation::Success(f),
            Some(issues) => Validation::Failure(issues),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path).and_then(|f| {
            match serde_json::Number::from_f64(f) {
                Some(n) => Validation::Success(Value::Number(n)),
                // Non-finite floats have no JSON rendering
                None => Validation::Failure(Issues::single(
                    Issue::new(path.clone(), "number is not representable as JSON")
                        .with_code(codes::INVALID_FORMAT)
                        .with_got(format!("{}", f))
                        .with_expected("finite number"),
                )),
            }
        })
    }
}

/// Checks a single float constraint and returns an issue if it fails.
fn check_float_constraint(constraint: &FloatConstraint, value: f64, path: &JsonPath) -> Option<Issue> {
    match constraint {
        FloatConstraint::Min {
            value: min,
            message,
        } => {
            if value < *min {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at least {}, got {}", min, value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_SMALL)
                        .with_expected(format!("at least {}", min))
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        FloatConstraint::Max {
            value: max,
            message,
        } => {
            if value > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at most {}, got {}", max, value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_BIG)
                        .with_expected(format!("at most {}", max))
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        FloatConstraint::Positive { message } => {
            if value <= 0.0 {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be positive, got {}", value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_SMALL)
                        .with_expected("value > 0")
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
        FloatConstraint::Finite { message } => {
            if !value.is_finite() {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be finite, got {}", value));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::INVALID_FORMAT)
                        .with_expected("finite number")
                        .with_got(format!("{}", value)),
                )
            } else {
                None
            }
        }
    }
}
