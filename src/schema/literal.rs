//! Literal and enum schema validation.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::traits::SchemaLike;

/// A schema that accepts exactly one value.
///
/// Mismatches report `invalid_literal`. Comparison is JSON equality, so
/// `json!(1)` and `json!(1.0)` are distinct literals.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::literal(json!("admin"));
///
/// assert!(schema.validate(&json!("admin"), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!("user"), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct LiteralSchema {
    expected: Value,
    message: Option<String>,
}

impl LiteralSchema {
    /// Creates a schema matching exactly `expected`.
    pub fn new(expected: Value) -> Self {
        Self {
            expected,
            message: None,
        }
    }

    /// Returns the literal this schema matches.
    pub fn expected(&self) -> &Value {
        &self.expected
    }

    /// Sets a custom mismatch message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl SchemaLike for LiteralSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if value == &self.expected {
            Validation::Success(value.clone())
        } else {
            let msg = self
                .message
                .clone()
                .unwrap_or_else(|| format!("expected literal {}", self.expected));
            Validation::Failure(Issues::single(
                Issue::new(path.clone(), msg)
                    .with_code(codes::INVALID_LITERAL)
                    .with_expected(self.expected.to_string())
                    .with_got(value.to_string()),
            ))
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path)
    }
}

/// A schema that accepts any member of a closed value set.
///
/// Non-members report `invalid_enum`.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::one_of(vec![json!("red"), json!("green"), json!("blue")]);
///
/// assert!(schema.validate(&json!("green"), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!("purple"), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct EnumSchema {
    members: Vec<Value>,
    message: Option<String>,
}

impl EnumSchema {
    /// Creates a schema accepting any of `members`.
    pub fn new(members: Vec<Value>) -> Self {
        Self {
            members,
            message: None,
        }
    }

    /// Sets a custom mismatch message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn members_display(&self) -> String {
        self.members
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl SchemaLike for EnumSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if self.members.contains(value) {
            Validation::Success(value.clone())
        } else {
            let msg = self
                .message
                .clone()
                .unwrap_or_else(|| format!("must be one of: {}", self.members_display()));
            Validation::Failure(Issues::single(
                Issue::new(path.clone(), msg)
                    .with_code(codes::INVALID_ENUM)
                    .with_expected(format!("one of [{}]", self.members_display()))
                    .with_got(value.to_string()),
            ))
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path)
    }
}
