//! Traits for schema polymorphism.
//!
//! This module provides [`SchemaLike`], the trait every schema implements,
//! [`ValueValidator`] for type erasure, and [`SchemaExt`], the fluent
//! extension that attaches the modifier chain to any schema.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues, ValidationFailed};
use crate::path::JsonPath;
use crate::schema::modifiers::{
    Catch, DefaultValue, Nullable, Optional, Pipe, Preprocess, Refine, RefineContext, SuperRefine,
    Transform, TryTransform,
};

/// A trait for schema types that can validate JSON values.
///
/// `SchemaLike` enables schema polymorphism, allowing different schema types
/// to be composed together for validating nested structures. Any type that
/// implements this trait can be used as a field schema in an `ObjectSchema`,
/// an element schema in an `ArraySchema`, and so on.
///
/// Validation never mutates the input and never panics; a failure carries at
/// least one issue, and every independent violation is reported.
///
/// The `Send + Sync` bounds allow schemas to be safely shared across threads
/// and used in trait objects like `Box<dyn ValueValidator>`.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, JsonPath};
///
/// // Both StringSchema and IntegerSchema implement SchemaLike,
/// // so they can be used as field schemas in an object schema.
/// let object = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::integer().positive());
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value against this schema.
    ///
    /// Returns `Validation::Success` with the validated output on success,
    /// or `Validation::Failure` with every accumulated issue on failure.
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues>;

    /// Validates a value and returns the result as a `serde_json::Value`.
    ///
    /// This method allows schema types with different output types to be
    /// used uniformly in composites where all children are stored as `Value`.
    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues>;

    /// Decides what happens when the value is absent (the key is missing
    /// from an enclosing object, as opposed to present-and-null).
    ///
    /// The default reports one `missing_key` issue. `Optional` overrides
    /// this to succeed with `None` (the field is omitted from the output);
    /// `DefaultValue` overrides it to succeed with the default.
    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        Validation::Failure(Issues::single(
            Issue::new(path.clone(), "missing required key").with_code(codes::MISSING_KEY),
        ))
    }

    /// Validates a value, returning the typed output or a boundary error.
    ///
    /// This is the strict entry point: instead of the `Validation` sum type
    /// it returns a plain `Result` whose error wraps the complete issue
    /// list, so it composes with `?` like any other fallible call.
    fn validate_strict(&self, value: &Value) -> Result<Self::Output, ValidationFailed> {
        self.validate(value, &JsonPath::root())
            .into_result()
            .map_err(ValidationFailed::from)
    }
}

/// A type-erased trait for schemas that validate to JSON values.
///
/// `ValueValidator` provides type erasure for schemas with different output
/// types, allowing them to be stored together in composites. Any type that
/// implements `SchemaLike` automatically implements `ValueValidator`.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, ValueValidator};
///
/// // Different schema types can be used as ValueValidators
/// let validators: Vec<Box<dyn ValueValidator>> = vec![
///     Box::new(Schema::string().min_len(1)),
///     Box::new(Schema::integer().positive()),
/// ];
/// ```
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues>;

    /// Type-erased counterpart of [`SchemaLike::validate_absent`].
    fn validate_value_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues>;
}

/// Blanket implementation of `ValueValidator` for all `SchemaLike` types.
impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate_to_value(value, path)
    }

    fn validate_value_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        self.validate_absent(path)
    }
}

/// Fluent modifier chain, available on every schema.
///
/// Each method wraps `self` in a modifier that is itself a schema, so
/// modifiers stack in the order they are written:
///
/// ```rust
/// use verdict::{Schema, SchemaExt, SchemaLike, JsonPath};
/// use serde_json::json;
///
/// let schema = Schema::string().trim().min_len(3).optional();
/// let result = schema.validate(&json!("  abc  "), &JsonPath::root());
/// assert!(result.is_success());
/// ```
pub trait SchemaExt: SchemaLike + Sized {
    /// Accepts absence and `null`, producing `None` for both.
    ///
    /// At an object field position an absent optional field is omitted from
    /// the output entirely.
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Accepts explicit `null` (producing `None`) but, unlike
    /// [`optional`](SchemaExt::optional), still requires the key to be
    /// present.
    fn nullable(self) -> Nullable<Self> {
        Nullable::new(self)
    }

    /// Substitutes `default` when the value is absent, `null`, or fails the
    /// inner schema. A defaulted schema never reports a failure of its own.
    fn default_to(self, default: Value) -> DefaultValue<Self> {
        DefaultValue::new(self, default)
    }

    /// Recovers from inner failure by computing a fallback from the issues.
    fn catch<F>(self, fallback: F) -> Catch<Self, F>
    where
        F: Fn(&Issues) -> Self::Output + Send + Sync,
    {
        Catch::new(self, fallback)
    }

    /// Applies a pure mapping to the validated output. The mapping runs
    /// strictly after validation and only on success.
    fn transform<F, O>(self, f: F) -> Transform<Self, F, O>
    where
        F: Fn(Self::Output) -> O + Send + Sync,
    {
        Transform::new(self, f)
    }

    /// Applies a fallible constructor to the validated output. A returned
    /// error becomes one `transform_error` issue.
    fn construct<F, O>(self, f: F) -> TryTransform<Self, F, O>
    where
        F: Fn(Self::Output) -> Result<O, String> + Send + Sync,
    {
        TryTransform::new(self, f)
    }

    /// Rewrites the raw value before the inner schema sees it. The function
    /// must not validate; it only reshapes. Absence passes through untouched.
    fn preprocess<F>(self, f: F) -> Preprocess<Self, F>
    where
        F: Fn(&Value) -> Value + Send + Sync,
    {
        Preprocess::new(self, f)
    }

    /// Feeds this schema's erased output into a second schema. Failures
    /// from either stage propagate unchanged.
    fn pipe<B: SchemaLike>(self, next: B) -> Pipe<Self, B> {
        Pipe::new(self, next)
    }

    /// Adds a custom predicate over the validated output. A `false` result
    /// yields one issue with the given code and message.
    fn refine<F>(self, code: impl Into<String>, message: impl Into<String>, pred: F) -> Refine<Self, F>
    where
        F: Fn(&Self::Output) -> bool + Send + Sync,
    {
        Refine::new(self, code, message, pred)
    }

    /// Adds a callback that may report any number of precisely-pathed
    /// issues, for cross-field checks.
    fn super_refine<F>(self, f: F) -> SuperRefine<Self, F>
    where
        F: Fn(&Self::Output, &mut RefineContext) + Send + Sync,
    {
        SuperRefine::new(self, f)
    }
}

impl<S: SchemaLike + Sized> SchemaExt for S {}
