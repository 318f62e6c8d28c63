//! Boolean schema validation.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::string::value_type_name;
use crate::schema::traits::SchemaLike;

/// A schema for validating boolean values.
///
/// Booleans carry no constraints beyond the type check. With
/// [`coerce`](BooleanSchema::coerce), the strings `"true"` and `"false"`
/// are accepted and converted.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::boolean();
///
/// assert!(schema.validate(&json!(true), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!("true"), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct BooleanSchema {
    coerce: bool,
    type_error_message: Option<String>,
}

impl BooleanSchema {
    /// Creates a new boolean schema.
    pub fn new() -> Self {
        Self {
            coerce: false,
            type_error_message: None,
        }
    }

    /// Enables coercion: `"true"` and `"false"` strings are converted
    /// before the type check. Anything else reports `invalid_coercion`.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Sets a custom type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<bool, Issues> {
        if let Value::Bool(b) = value {
            return Validation::Success(*b);
        }

        if self.coerce {
            if let Value::String(s) = value {
                return match s.as_str() {
                    "true" => Validation::Success(true),
                    "false" => Validation::Success(false),
                    _ => Validation::Failure(Issues::single(
                        Issue::new(path.clone(), "cannot coerce to boolean")
                            .with_code(codes::INVALID_COERCION)
                            .with_got(s.clone())
                            .with_expected("boolean"),
                    )),
                };
            }
        }

        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| "expected boolean".to_string());
        Validation::Failure(Issues::single(
            Issue::new(path.clone(), message)
                .with_code(codes::INVALID_TYPE)
                .with_got(value_type_name(value))
                .with_expected("boolean"),
        ))
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::Bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_booleans() {
        let schema = BooleanSchema::new();

        let result = schema.validate(&json!(true), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), true);

        let result = schema.validate(&json!(false), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), false);
    }

    #[test]
    fn test_rejects_non_booleans() {
        let schema = BooleanSchema::new();

        for value in [json!(0), json!("true"), json!(null), json!([true])] {
            let result = schema.validate(&value, &JsonPath::root());
            assert!(result.is_failure());
            let issues = result.into_result().unwrap_err();
            assert_eq!(issues.first().code, "invalid_type");
        }
    }

    #[test]
    fn test_coerce_from_string() {
        let schema = BooleanSchema::new().coerce();

        let result = schema.validate(&json!("true"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), true);

        let result = schema.validate(&json!("false"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), false);

        let result = schema.validate(&json!("yes"), &JsonPath::root());
        let issues = result.into_result().unwrap_err();
        assert_eq!(issues.first().code, "invalid_coercion");
    }

    #[test]
    fn test_custom_type_error_message() {
        let schema = BooleanSchema::new().error("must be a flag");

        let result = schema.validate(&json!(1), &JsonPath::root());
        let issues = result.into_result().unwrap_err();
        assert_eq!(issues.first().message, "must be a flag");
    }

    #[test]
    fn test_path_tracking() {
        let schema = BooleanSchema::new();
        let path = JsonPath::root().push_field("active");

        let result = schema.validate(&json!("nope"), &path);
        let issues = result.into_result().unwrap_err();
        assert_eq!(issues.first().path.to_string(), "active");
    }
}
