//! Map schema validation.
//!
//! This module provides [`MapSchema`] for validating objects used as
//! homogeneous key-value maps rather than records with named fields.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::string::{value_type_name, StringSchema};
use crate::schema::traits::SchemaLike;

/// A schema for validating objects as maps.
///
/// Every value is validated against the value schema at the key's path, and
/// optionally every key is validated against a string schema. Entry-count
/// constraints report at the map's own path and are evaluated independently
/// of per-entry validation. Nothing short-circuits: all entries are checked.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::map(Schema::integer().non_negative());
///
/// let result = schema.validate(
///     &json!({"apples": 3, "pears": 7}),
///     &JsonPath::root(),
/// );
/// assert!(result.is_success());
/// ```
pub struct MapSchema<V> {
    value_schema: V,
    key_schema: Option<StringSchema>,
    min_entries: Option<(usize, Option<String>)>,
    max_entries: Option<(usize, Option<String>)>,
    type_error_message: Option<String>,
}

impl<V: SchemaLike> MapSchema<V> {
    /// Creates a new map schema with the given value schema.
    pub fn new(value_schema: V) -> Self {
        Self {
            value_schema,
            key_schema: None,
            min_entries: None,
            max_entries: None,
            type_error_message: None,
        }
    }

    /// Validates every key against a string schema. Key issues are pathed
    /// to the offending key.
    pub fn keys(mut self, key_schema: StringSchema) -> Self {
        self.key_schema = Some(key_schema);
        self
    }

    /// Requires at least `min` entries (`too_small` otherwise).
    pub fn min_entries(mut self, min: usize) -> Self {
        self.min_entries = Some((min, None));
        self
    }

    /// Requires at most `max` entries (`too_big` otherwise).
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some((max, None));
        self
    }

    /// Sets a custom type error message (input is not an object).
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl<V: SchemaLike> SchemaLike for MapSchema<V> {
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

        // Entry-count constraints come first and report at the map path.
        if let Some((min, message)) = &self.min_entries {
            if obj.len() < *min {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("map must have at least {} entries, got {}", min, obj.len())
                });
                issues.push(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_SMALL)
                        .with_expected(format!("at least {} entries", min))
                        .with_got(format!("{} entries", obj.len())),
                );
            }
        }
        if let Some((max, message)) = &self.max_entries {
            if obj.len() > *max {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("map must have at most {} entries, got {}", max, obj.len())
                });
                issues.push(
                    Issue::new(path.clone(), msg)
                        .with_code(codes::TOO_BIG)
                        .with_expected(format!("at most {} entries", max))
                        .with_got(format!("{} entries", obj.len())),
                );
            }
        }

        let mut validated = Map::new();
        for (key, entry_value) in obj {
            let entry_path = path.push_field(key);

            if let Some(key_schema) = &self.key_schema {
                let key_value = Value::String(key.clone());
                if let Validation::Failure(e) = key_schema.validate(&key_value, &entry_path) {
                    issues.extend(e.into_iter());
                }
            }

            match self.value_schema.validate_to_value(entry_value, &entry_path) {
                Validation::Success(v) => {
                    validated.insert(key.clone(), v);
                }
                Validation::Failure(e) => {
                    issues.extend(e.into_iter());
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
