//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects with
//! typed fields in declaration order and configurable unknown-key handling.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::string::value_type_name;
use crate::schema::traits::{SchemaLike, ValueValidator};

/// How keys not named by any field are handled.
enum UnknownKeys {
    /// Copy unknown keys to the output unchanged (default).
    Passthrough,
    /// Drop unknown keys from the output silently.
    Strip,
    /// Report one `unknown_key` issue per unknown key.
    Strict,
    /// Validate unknown keys against a schema.
    Schema(Box<dyn ValueValidator>),
}

/// A schema for validating JSON objects.
///
/// Fields are validated in declaration order, and every field is validated
/// regardless of earlier failures, so the issue list is complete. A field
/// that is absent from the input routes through the field schema's
/// absence handling: plain schemas report `missing_key`, schemas wrapped in
/// [`optional`](crate::SchemaExt::optional) are omitted from the output, and
/// schemas wrapped in [`default_to`](crate::SchemaExt::default_to)
/// contribute their default.
///
/// The success output is a freshly built map; the input is never mutated.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaExt, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::integer().positive())
///     .field("email", Schema::string().email().optional())
///     .strict();
///
/// let result = schema.validate(&json!({
///     "name": "Alice",
///     "age": 30
/// }), &JsonPath::root());
/// assert!(result.is_success());
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, Box<dyn ValueValidator>>,
    unknown_keys: UnknownKeys,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            unknown_keys: UnknownKeys::Passthrough,
            type_error_message: None,
        }
    }

    /// Adds a field to the schema.
    ///
    /// Fields are validated in the order they are declared. Whether the
    /// field may be absent is decided by the field schema itself.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string().min_len(1));
    ///
    /// // Missing required field produces a missing_key issue
    /// let result = schema.validate(&json!({}), &JsonPath::root());
    /// assert!(result.is_failure());
    /// ```
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(name.into(), Box::new(schema));
        self
    }

    /// Copies unknown keys to the output unchanged. This is the default.
    pub fn passthrough(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Passthrough;
        self
    }

    /// Drops unknown keys from the output silently.
    pub fn strip(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strip;
        self
    }

    /// Reports one `unknown_key` issue per key not named by any field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string())
    ///     .strict();
    ///
    /// let result = schema.validate(
    ///     &json!({"name": "Alice", "extra": 1}),
    ///     &JsonPath::root(),
    /// );
    /// assert!(result.is_failure());
    /// ```
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strict;
        self
    }

    /// Validates unknown keys against `schema` and includes them in the
    /// output.
    pub fn additional<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.unknown_keys = UnknownKeys::Schema(Box::new(schema));
        self
    }

    /// Sets a custom message for the type error (input is not an object).
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Map<String, Value>, Issues> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected object".to_string());
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code(codes::INVALID_TYPE)
                        .with_got(value_type_name(value))
                        .with_expected("object"),
                ));
            }
        };

        let mut issues = Vec::new();
        let mut validated = Map::new();

        // Every declared field is checked, in declaration order.
        for (name, field_schema) in &self.fields {
            let field_path = path.push_field(name);

            match obj.get(name) {
                Some(field_value) => {
                    match field_schema.validate_value(field_value, &field_path) {
                        Validation::Success(v) => {
                            validated.insert(name.clone(), v);
                        }
                        Validation::Failure(e) => {
                            issues.extend(e.into_iter());
                        }
                    }
                }
                None => match field_schema.validate_value_absent(&field_path) {
                    Validation::Success(Some(v)) => {
                        validated.insert(name.clone(), v);
                    }
                    Validation::Success(None) => {
                        // Absence accepted; field omitted from the output.
                    }
                    Validation::Failure(e) => {
                        issues.extend(e.into_iter());
                    }
                },
            }
        }

        // Then keys the schema does not name, per the unknown-key policy.
        for (key, extra_value) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            let field_path = path.push_field(key);
            match &self.unknown_keys {
                UnknownKeys::Passthrough => {
                    validated.insert(key.clone(), extra_value.clone());
                }
                UnknownKeys::Strip => {}
                UnknownKeys::Strict => {
                    issues.push(
                        Issue::new(field_path, format!("unknown key '{}'", key))
                            .with_code(codes::UNKNOWN_KEY),
                    );
                }
                UnknownKeys::Schema(schema) => {
                    match schema.validate_value(extra_value, &field_path) {
                        Validation::Success(v) => {
                            validated.insert(key.clone(), v);
                        }
                        Validation::Failure(e) => {
                            issues.extend(e.into_iter());
                        }
                    }
                }
            }
        }

        match Issues::from_vec(issues) {
            None => Validation::Success(validated),
            Some(issues) => Validation::Failure(issues),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::Object)
    }
}
