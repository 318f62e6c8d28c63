//! Union schema validation.
//!
//! This module provides [`UnionSchema`] for values that may take one of
//! several alternative shapes, tried in priority order.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::traits::{SchemaLike, ValueValidator};

/// One alternative of a union, optionally tagged for discrimination.
struct Alternative {
    tag: Option<Value>,
    schema: Box<dyn ValueValidator>,
}

/// A schema matching any one of an ordered list of alternatives.
///
/// Alternatives are tried in declaration order and the first success wins;
/// later alternatives are not attempted. When every alternative fails, the
/// union reports a single `invalid_union` issue at its own path whose
/// `nested` list carries each alternative's issues, in declaration order.
///
/// A discriminator is an optional fast path: when
/// [`discriminator`](UnionSchema::discriminator) names a key and the input
/// object carries a value matching the tag of some
/// [`alternative_tagged`](UnionSchema::alternative_tagged), that alternative
/// is tried first. The hint never changes which inputs are accepted; the
/// ordered trial remains as the fallback.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, ValueValidator, JsonPath};
/// use serde_json::json;
///
/// // A string or a positive integer ID
/// let id = Schema::union(vec![
///     Box::new(Schema::string().min_len(1)) as Box<dyn ValueValidator>,
///     Box::new(Schema::integer().positive()) as Box<dyn ValueValidator>,
/// ]);
///
/// assert!(id.validate(&json!("abc"), &JsonPath::root()).is_success());
/// assert!(id.validate(&json!(42), &JsonPath::root()).is_success());
/// assert!(id.validate(&json!(false), &JsonPath::root()).is_failure());
/// ```
pub struct UnionSchema {
    alternatives: Vec<Alternative>,
    discriminator: Option<String>,
    message: Option<String>,
}

impl UnionSchema {
    /// Creates a union over the given alternatives, in priority order.
    pub fn new(alternatives: Vec<Box<dyn ValueValidator>>) -> Self {
        Self {
            alternatives: alternatives
                .into_iter()
                .map(|schema| Alternative { tag: None, schema })
                .collect(),
            discriminator: None,
            message: None,
        }
    }

    /// Appends an untagged alternative.
    pub fn alternative<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.alternatives.push(Alternative {
            tag: None,
            schema: Box::new(schema),
        });
        self
    }

    /// Appends an alternative tagged with a discriminator literal.
    pub fn alternative_tagged<S>(mut self, tag: Value, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.alternatives.push(Alternative {
            tag: Some(tag),
            schema: Box::new(schema),
        });
        self
    }

    /// Names the object key used to pick a tagged alternative first.
    pub fn discriminator(mut self, key: impl Into<String>) -> Self {
        self.discriminator = Some(key.into());
        self
    }

    /// Sets a custom message for the union failure.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Index of the alternative whose tag matches the input's discriminator
    /// value, if any.
    fn hinted_index(&self, value: &Value) -> Option<usize> {
        let key = self.discriminator.as_deref()?;
        let tag_value = value.as_object()?.get(key)?;
        self.alternatives
            .iter()
            .position(|alt| alt.tag.as_ref() == Some(tag_value))
    }
}

impl SchemaLike for UnionSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        // Discriminator fast path: a matching tag only reorders the trial.
        if let Some(i) = self.hinted_index(value) {
            if let Validation::Success(v) = self.alternatives[i].schema.validate_value(value, path)
            {
                return Validation::Success(v);
            }
        }

        let mut nested = Vec::new();
        for alt in &self.alternatives {
            match alt.schema.validate_value(value, path) {
                Validation::Success(v) => return Validation::Success(v),
                Validation::Failure(e) => nested.extend(e.into_iter()),
            }
        }

        let msg = self.message.clone().unwrap_or_else(|| {
            format!(
                "value did not match any of {} alternatives",
                self.alternatives.len()
            )
        });
        Validation::Failure(Issues::single(
            Issue::new(path.clone(), msg)
                .with_code(codes::INVALID_UNION)
                .with_nested(nested),
        ))
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::numeric::IntegerSchema;
    use crate::schema::object::ObjectSchema;
    use crate::schema::string::StringSchema;
    use crate::schema::Schema;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn string_or_int() -> UnionSchema {
        UnionSchema::new(vec![
            Box::new(StringSchema::new().min_len(1)) as Box<dyn ValueValidator>,
            Box::new(IntegerSchema::new().positive()) as Box<dyn ValueValidator>,
        ])
    }

    #[test]
    fn test_first_success_wins() {
        let schema = string_or_int();

        let result = schema.validate(&json!("abc"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!("abc"));

        let result = schema.validate(&json!(42), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!(42));
    }

    #[test]
    fn test_priority_order() {
        // Both alternatives accept any integer; the first one's output wins.
        let schema = UnionSchema::new(vec![
            Box::new(IntegerSchema::new()) as Box<dyn ValueValidator>,
            Box::new(IntegerSchema::new().positive()) as Box<dyn ValueValidator>,
        ]);

        let result = schema.validate(&json!(-1), &JsonPath::root());
        assert!(result.is_success());
    }

    #[test]
    fn test_total_failure_is_single_issue_with_nested() {
        let schema = string_or_int();

        let result = schema.validate(&json!(false), &JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);

        // One top-level issue, per-alternative diagnostics nested inside
        assert_eq!(issues.len(), 1);
        let top = issues.first();
        assert_eq!(top.code, "invalid_union");
        assert_eq!(top.nested.len(), 2);
        assert!(top.nested.iter().all(|e| e.code == "invalid_type"));
    }

    #[test]
    fn test_nested_issues_in_declaration_order() {
        let schema = UnionSchema::new(vec![
            Box::new(StringSchema::new()) as Box<dyn ValueValidator>,
            Box::new(IntegerSchema::new()) as Box<dyn ValueValidator>,
        ]);

        let result = schema.validate(&json!(true), &JsonPath::root());
        let issues = unwrap_failure(result);
        let expected: Vec<_> = issues.first()
            .nested
            .iter()
            .map(|e| e.expected.clone())
            .collect();
        assert_eq!(
            expected,
            vec![Some("string".to_string()), Some("integer".to_string())]
        );
    }

    #[test]
    fn test_union_failure_pathed_to_union() {
        let schema = string_or_int();
        let path = JsonPath::root().push_field("id");

        let result = schema.validate(&json!(null), &path);
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().path.to_string(), "id");
    }

    #[test]
    fn test_discriminated_union() {
        let circle = ObjectSchema::new()
            .field("kind", Schema::literal(json!("circle")))
            .field("radius", IntegerSchema::new().positive());
        let rect = ObjectSchema::new()
            .field("kind", Schema::literal(json!("rect")))
            .field("width", IntegerSchema::new().positive())
            .field("height", IntegerSchema::new().positive());

        let schema = UnionSchema::new(vec![])
            .alternative_tagged(json!("circle"), circle)
            .alternative_tagged(json!("rect"), rect)
            .discriminator("kind");

        let result = schema.validate(
            &json!({"kind": "rect", "width": 3, "height": 4}),
            &JsonPath::root(),
        );
        assert!(result.is_success());

        let result = schema.validate(
            &json!({"kind": "circle", "radius": 5}),
            &JsonPath::root(),
        );
        assert!(result.is_success());
    }

    #[test]
    fn test_discriminator_hint_does_not_change_acceptance() {
        // The tagged alternative fails, but an untagged alternative matches;
        // the exhaustive fallback must still find it.
        let tagged = ObjectSchema::new()
            .field("kind", Schema::literal(json!("a")))
            .field("n", IntegerSchema::new().min(100));
        let fallback = ObjectSchema::new().field("kind", StringSchema::new());

        let schema = UnionSchema::new(vec![])
            .alternative_tagged(json!("a"), tagged)
            .alternative(fallback)
            .discriminator("kind");

        let result = schema.validate(&json!({"kind": "a", "n": 1}), &JsonPath::root());
        assert!(result.is_success());
    }

    #[test]
    fn test_unknown_tag_falls_back_to_trial() {
        let a = ObjectSchema::new().field("kind", Schema::literal(json!("a")));
        let b = ObjectSchema::new().field("kind", StringSchema::new());

        let schema = UnionSchema::new(vec![])
            .alternative_tagged(json!("a"), a)
            .alternative(b)
            .discriminator("kind");

        let result = schema.validate(&json!({"kind": "zzz"}), &JsonPath::root());
        assert!(result.is_success());
    }

    #[test]
    fn test_custom_message() {
        let schema = string_or_int().error("expected an id");
        let result = schema.validate(&json!(null), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().message, "expected an id");
    }
}
