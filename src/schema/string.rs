//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! constraints like minimum/maximum length, regex patterns, and common
//! formats (email, URL, UUID).

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::traits::SchemaLike;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
const URL_PATTERN: &str = r"^https?://[^\s/$.?#].[^\s]*$";
const UUID_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        pattern_str: String,
        message: Option<String>,
    },
    Format {
        regex: Regex,
        name: &'static str,
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// `StringSchema` validates that values are strings and optionally applies
/// constraints. All constraint violations are accumulated rather than
/// short-circuiting on the first failure.
///
/// With [`trim`](StringSchema::trim), surrounding whitespace is removed
/// before any length or format constraint runs, and the trimmed string is
/// the success output. With [`coerce`](StringSchema::coerce), numbers and
/// booleans are converted to their string rendering before the type check.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// // Validation accumulates all issues
/// let result = schema.validate(&json!("AB"), &JsonPath::root());
/// assert!(result.is_failure());
/// // Reports both: too short AND pattern mismatch
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    trim: bool,
    coerce: bool,
    type_error_message: Option<String>,
}

/// Compiles a library-constant pattern.
fn builtin_regex(pattern: &str) -> Regex {
    // The pattern is a library constant, so compilation cannot fail.
    Regex::new(pattern).expect("built-in pattern is valid")
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            trim: false,
            coerce: false,
            type_error_message: None,
        }
    }

    /// Trims surrounding whitespace before constraints run.
    ///
    /// The trimmed string is also the success output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().trim().min_len(3);
    ///
    /// let result = schema.validate(&json!("  abc  "), &JsonPath::root());
    /// assert_eq!(result.into_result().unwrap(), "abc");
    /// ```
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Enables coercion: numbers and booleans are converted to their string
    /// rendering before the type check, so constraints see the converted
    /// value. Other non-string inputs report `invalid_coercion`.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Adds a minimum length constraint.
    ///
    /// The string must have at least `min` characters (Unicode scalar
    /// values). Violations report `too_short`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().min_len(5);
    ///
    /// let result = schema.validate(&json!("hello"), &JsonPath::root());
    /// assert!(result.is_success());
    ///
    /// let result = schema.validate(&json!("hi"), &JsonPath::root());
    /// assert!(result.is_failure());
    /// ```
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint.
    ///
    /// The string must have at most `max` characters (Unicode scalar
    /// values). Violations report `too_long`.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// Violations report `invalid_format`. Returns an error if the pattern
    /// itself is invalid, so a bad schema is caught at build time rather
    /// than at validation time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().pattern(r"^\d+$").unwrap();
    ///
    /// let result = schema.validate(&json!("12345"), &JsonPath::root());
    /// assert!(result.is_success());
    ///
    /// let result = schema.validate(&json!("abc"), &JsonPath::root());
    /// assert!(result.is_failure());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            pattern_str: pattern.to_string(),
            message: None,
        });
        Ok(self)
    }

    /// Requires the string to look like an email address.
    ///
    /// Violations report `invalid_format`.
    pub fn email(mut self) -> Self {
        self.constraints.push(StringConstraint::Format {
            regex: builtin_regex(EMAIL_PATTERN),
            name: "email",
            message: None,
        });
        self
    }

    /// Requires the string to be an http(s) URL.
    ///
    /// Violations report `invalid_format`.
    pub fn url(mut self) -> Self {
        self.constraints.push(StringConstraint::Format {
            regex: builtin_regex(URL_PATTERN),
            name: "url",
            message: None,
        });
        self
    }

    /// Requires the string to be a hyphenated UUID.
    ///
    /// Violations report `invalid_format`.
    pub fn uuid(mut self) -> Self {
        self.constraints.push(StringConstraint::Format {
            regex: builtin_regex(UUID_PATTERN),
            name: "uuid",
            message: None,
        });
        self
    }

    /// Sets a custom message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error
    /// message (used when the value is not a string).
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string()
    ///     .min_len(5)
    ///     .error("username must be at least 5 characters");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Pattern { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Format { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    fn type_issue(&self, value: &Value, path: &JsonPath) -> Issue {
        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| "expected string".to_string());
        Issue::new(path.clone(), message)
            .with_code(codes::INVALID_TYPE)
            .with_got(value_type_name(value))
            .with_expected("string")
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<String, Issues> {
        let s: String = match value.as_str() {
            Some(s) => s.to_string(),
            None if self.coerce => match value {
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Validation::Failure(Issues::single(
                        Issue::new(path.clone(), "cannot coerce to string")
                            .with_code(codes::INVALID_COERCION)
                            .with_got(value_type_name(value))
                            .with_expected("string"),
                    ));
                }
            },
            None => {
                return Validation::Failure(Issues::single(self.type_issue(value, path)));
            }
        };

        let s = if self.trim { s.trim().to_string() } else { s };

        // Every constraint is checked against the (possibly trimmed) value;
        // violations accumulate.
        let issues: Vec<Issue> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, &s, path))
            .collect();

        match Issues::from_vec(issues) {
            None => Validation::Success(s),
            Some(issues) => Validation::Failure(issues),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::String)
    }
}

/// Checks a single constraint and returns an issue if it fails.
fn check_constraint(constraint: &StringConstraint, value: &str, path: &JsonPath) -> Option<Issue> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            if len < *min {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_SHORT)
                        .with_expected(format!("at least {} characters", min))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            if len > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_LONG)
                        .with_expected(format!("at most {} characters", max))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        StringConstraint::Pattern {
            regex,
            pattern_str,
            message,
        } => {
            if !regex.is_match(value) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must match pattern '{}'", pattern_str));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::INVALID_FORMAT)
                        .with_expected(format!("string matching '{}'", pattern_str))
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
        StringConstraint::Format {
            regex,
            name,
            message,
        } => {
            if !regex.is_match(value) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be a valid {}", name));
                Some(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::INVALID_FORMAT)
                        .with_expected((*name).to_string())
                        .with_got(value.to_string()),
                )
            } else {
                None
            }
        }
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
