//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating arrays with an
//! element schema, length constraints, and uniqueness requirements.

use serde_json::Value;
use std::collections::HashMap;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::string::value_type_name;
use crate::schema::traits::SchemaLike;

/// A constraint applied to array values.
enum ArrayConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Unique {
        message: Option<String>,
    },
    UniqueBy {
        key_fn: Box<dyn Fn(&Value) -> Value + Send + Sync>,
        message: Option<String>,
    },
}

/// A schema for validating array values.
///
/// Every element is validated against the element schema at its own indexed
/// path, and every element is checked regardless of earlier failures. Length
/// constraints are evaluated independently of element validation and report
/// at the array's own path.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string().min_len(1))
///     .non_empty()
///     .max_len(10);
///
/// let result = schema.validate(&json!(["hello", "world"]), &JsonPath::root());
/// assert!(result.is_success());
///
/// let result = schema.validate(&json!([]), &JsonPath::root());
/// assert!(result.is_failure());
/// ```
pub struct ArraySchema<S> {
    element_schema: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given element schema.
    pub fn new(element_schema: S) -> Self {
        Self {
            element_schema,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` elements (`too_small` otherwise).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` elements (`too_big` otherwise).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires exactly `n` elements. Equivalent to `.min_len(n).max_len(n)`.
    pub fn length(self, n: usize) -> Self {
        self.min_len(n).max_len(n)
    }

    /// Requires at least one element. Equivalent to `.min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Requires all elements to be distinct (by JSON equality).
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Schema, SchemaLike, JsonPath};
    /// use serde_json::json;
    ///
    /// let schema = Schema::array(Schema::string()).unique();
    ///
    /// assert!(schema.validate(&json!(["a", "b"]), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!(["a", "a"]), &JsonPath::root()).is_failure());
    /// ```
    pub fn unique(mut self) -> Self {
        self.constraints
            .push(ArrayConstraint::Unique { message: None });
        self
    }

    /// Requires all elements to map to distinct keys under `key_fn`. Useful
    /// for arrays of objects that must be unique by a specific field.
    pub fn unique_by<F>(mut self, key_fn: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.constraints.push(ArrayConstraint::UniqueBy {
            key_fn: Box::new(key_fn),
            message: None,
        });
        self
    }

    /// Sets a custom message for the most recent constraint, or the type
    /// error message when no constraints have been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                ArrayConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                ArrayConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                ArrayConstraint::Unique { message: m } => *m = Some(message.into()),
                ArrayConstraint::UniqueBy { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Vec<Value>, Issues> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected array".to_string());
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code(codes::INVALID_TYPE)
                        .with_got(value_type_name(value))
                        .with_expected("array"),
                ));
            }
        };

        let mut issues = Vec::new();

        // Length constraints report at the array path, independent of
        // element validation.
        for constraint in &self.constraints {
            match constraint {
                ArrayConstraint::MinLength { min, message } if arr.len() < *min => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("array must have at least {} items, got {}", min, arr.len())
                    });
                    issues.push(
                        Issue::new(path.clone(), msg)
                            .with_code(codes::TOO_SMALL)
                            .with_expected(format!("at least {} items", min))
                            .with_got(format!("{} items", arr.len())),
                    );
                }
                ArrayConstraint::MaxLength { max, message } if arr.len() > *max => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("array must have at most {} items, got {}", max, arr.len())
                    });
                    issues.push(
                        Issue::new(path.clone(), msg)
                            .with_code(codes::TOO_BIG)
                            .with_expected(format!("at most {} items", max))
                            .with_got(format!("{} items", arr.len())),
                    );
                }
                _ => {}
            }
        }

        // Every element is validated, in index order.
        let mut validated_items = Vec::with_capacity(arr.len());
        for (index, item) in arr.iter().enumerate() {
            let item_path = path.push_index(index);
            match self.element_schema.validate_to_value(item, &item_path) {
                Validation::Success(v) => validated_items.push(v),
                Validation::Failure(e) => issues.extend(e.into_iter()),
            }
        }

        for constraint in &self.constraints {
            match constraint {
                ArrayConstraint::Unique { message } => {
                    report_duplicates(arr, |v| v.clone(), message, path, &mut issues);
                }
                ArrayConstraint::UniqueBy { key_fn, message } => {
                    report_duplicates(arr, key_fn, message, path, &mut issues);
                }
                _ => {}
            }
        }

        match Issues::from_vec(issues) {
            None => Validation::Success(validated_items),
            Some(issues) => Validation::Failure(issues),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::Array)
    }
}

/// Groups elements by key and reports one `not_unique` issue per group with
/// more than one member.
fn report_duplicates<F>(
    arr: &[Value],
    key_fn: F,
    message: &Option<String>,
    path: &JsonPath,
    issues: &mut Vec<Issue>,
) where
    F: Fn(&Value) -> Value,
{
    let mut seen: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, item) in arr.iter().enumerate() {
        let key = key_fn(item);
        // JSON rendering keys the map; it distinguishes all value types.
        let key_str = serde_json::to_string(&key).unwrap_or_else(|_| format!("{:?}", key));
        seen.entry(key_str).or_default().push(i);
    }

    for indices in seen.values() {
        if indices.len() > 1 {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("duplicate value at indices {:?}", indices));
            issues.push(
                Issue::new(path.clone(), msg)
                    .with_code("not_unique")
                    .with_got(format!("duplicates at indices {:?}", indices)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::numeric::IntegerSchema;
    use crate::schema::object::ObjectSchema;
    use crate::schema::string::StringSchema;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_array_schema_accepts_array() {
        let schema = ArraySchema::new(StringSchema::new());
        let result = schema.validate(&json!(["hello", "world"]), &JsonPath::root());
        assert!(result.is_success());
        let items = unwrap_success(result);
        assert_eq!(items, vec![json!("hello"), json!("world")]);
    }

    #[test]
    fn test_array_schema_accepts_empty_array() {
        let schema = ArraySchema::new(StringSchema::new());
        let result = schema.validate(&json!([]), &JsonPath::root());
        assert!(result.is_success());
        assert!(unwrap_success(result).is_empty());
    }

    #[test]
    fn test_array_schema_rejects_non_array() {
        let schema = ArraySchema::new(StringSchema::new());

        let result = schema.validate(&json!("not an array"), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "invalid_type");
        assert_eq!(issues.first().got, Some("string".to_string()));

        assert!(schema.validate(&json!(42), &JsonPath::root()).is_failure());
        assert!(schema.validate(&json!(null), &JsonPath::root()).is_failure());
        assert!(schema
            .validate(&json!({"key": "value"}), &JsonPath::root())
            .is_failure());
    }

    #[test]
    fn test_array_reports_invalid_elements_by_index() {
        let schema = ArraySchema::new(IntegerSchema::new().positive());
        let result = schema.validate(&json!([1, -2, 3]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().code, "too_small");
        assert_eq!(issues.first().path.to_string(), "[1]");
    }

    #[test]
    fn test_array_accumulates_multiple_element_issues() {
        let schema = ArraySchema::new(IntegerSchema::new().positive());
        let result = schema.validate(&json!([-1, -2, 3, -4]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_array_validates_nested_objects() {
        let user_schema = ObjectSchema::new()
            .field("name", StringSchema::new().min_len(1))
            .field("age", IntegerSchema::new().positive());

        let schema = ArraySchema::new(user_schema);

        let result = schema.validate(
            &json!([
                {"name": "Alice", "age": 30},
                {"name": "Bob", "age": 25}
            ]),
            &JsonPath::root(),
        );
        assert!(result.is_success());

        let result = schema.validate(
            &json!([
                {"name": "", "age": 30},
                {"name": "Bob", "age": -5}
            ]),
            &JsonPath::root(),
        );
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 2);

        let paths: Vec<_> = issues.iter().map(|e| e.path.to_string()).collect();
        assert!(paths.contains(&"[0].name".to_string()));
        assert!(paths.contains(&"[1].age".to_string()));
    }

    #[test]
    fn test_min_len_constraint() {
        let schema = ArraySchema::new(StringSchema::new()).min_len(2);

        assert!(schema
            .validate(&json!(["a", "b"]), &JsonPath::root())
            .is_success());

        let result = schema.validate(&json!(["a"]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "too_small");
        assert!(issues.first().path.is_root());
    }

    #[test]
    fn test_max_len_constraint() {
        let schema = ArraySchema::new(StringSchema::new()).max_len(3);

        assert!(schema
            .validate(&json!(["a", "b", "c"]), &JsonPath::root())
            .is_success());

        let result = schema.validate(&json!(["a", "b", "c", "d"]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "too_big");
    }

    #[test]
    fn test_exact_length_constraint() {
        let schema = ArraySchema::new(IntegerSchema::new()).length(2);

        assert!(schema.validate(&json!([1, 2]), &JsonPath::root()).is_success());
        assert!(schema.validate(&json!([1]), &JsonPath::root()).is_failure());
        assert!(schema
            .validate(&json!([1, 2, 3]), &JsonPath::root())
            .is_failure());
    }

    #[test]
    fn test_non_empty_constraint() {
        let schema = ArraySchema::new(StringSchema::new()).non_empty();

        assert!(schema.validate(&json!(["a"]), &JsonPath::root()).is_success());

        let result = schema.validate(&json!([]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "too_small");
    }

    #[test]
    fn test_unique_constraint() {
        let schema = ArraySchema::new(StringSchema::new()).unique();

        assert!(schema
            .validate(&json!(["a", "b", "c"]), &JsonPath::root())
            .is_success());

        let result = schema.validate(&json!(["a", "b", "a"]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "not_unique");
    }

    #[test]
    fn test_unique_by_constraint() {
        let user_schema = ObjectSchema::new()
            .field("id", IntegerSchema::new())
            .field("name", StringSchema::new());

        let schema = ArraySchema::new(user_schema)
            .unique_by(|v| v.get("id").cloned().unwrap_or(Value::Null));

        let result = schema.validate(
            &json!([
                {"id": 1, "name": "Alice"},
                {"id": 2, "name": "Bob"}
            ]),
            &JsonPath::root(),
        );
        assert!(result.is_success());

        let result = schema.validate(
            &json!([
                {"id": 1, "name": "Alice"},
                {"id": 1, "name": "Bob"}
            ]),
            &JsonPath::root(),
        );
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "not_unique");
    }

    #[test]
    fn test_length_and_element_issues_accumulate() {
        let schema = ArraySchema::new(IntegerSchema::new().positive()).min_len(3);

        // Too short AND has invalid elements
        let result = schema.validate(&json!([-1, -2]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.with_code("too_small").len(), 3);
        // The length issue sits at the array root
        assert!(issues.iter().any(|e| e.path.is_root()));
    }

    #[test]
    fn test_path_tracking_nested() {
        let inner_schema = ObjectSchema::new().field("value", IntegerSchema::new().positive());
        let schema = ArraySchema::new(inner_schema);

        let path = JsonPath::root().push_field("items");
        let result = schema.validate(&json!([{"value": -5}]), &path);
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().path.to_string(), "items[0].value");
    }

    #[test]
    fn test_path_tracking_deeply_nested() {
        let inner_array = ArraySchema::new(IntegerSchema::new().positive());
        let outer_schema = ObjectSchema::new().field("numbers", inner_array);
        let outer_array = ArraySchema::new(outer_schema);

        let result = outer_array.validate(
            &json!([
                {"numbers": [1, -2, 3]}
            ]),
            &JsonPath::root(),
        );
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().path.to_string(), "[0].numbers[1]");
    }

    #[test]
    fn test_custom_messages() {
        let schema = ArraySchema::new(StringSchema::new())
            .min_len(1)
            .error("at least one tag is required");

        let result = schema.validate(&json!([]), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().message, "at least one tag is required");

        let schema = ArraySchema::new(StringSchema::new()).error("must be a list of tags");
        let result = schema.validate(&json!("not an array"), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().message, "must be a list of tags");
    }

    #[test]
    fn test_mixed_type_array() {
        let schema = ArraySchema::new(IntegerSchema::new());
        let result = schema.validate(&json!([1, "two", 3]), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().path.to_string(), "[1]");
    }

    #[test]
    fn test_large_array() {
        let schema = ArraySchema::new(IntegerSchema::new());
        let large_array: Vec<i32> = (0..1000).collect();
        let result = schema.validate(&json!(large_array), &JsonPath::root());
        assert!(result.is_success());
    }

    #[test]
    fn test_schema_like_validate_to_value() {
        let schema = ArraySchema::new(StringSchema::new());
        let result = schema.validate_to_value(&json!(["hello"]), &JsonPath::root());
        assert!(result.is_success());
        match result.into_result().unwrap() {
            Value::Array(arr) => assert_eq!(arr, vec![json!("hello")]),
            _ => panic!("Expected array"),
        }
    }
}
