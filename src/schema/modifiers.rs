//! Schema modifiers.
//!
//! Modifiers wrap an inner schema and adjust its behavior: accepting absence
//! or `null`, substituting defaults, recovering from failure, mapping or
//! constructing typed outputs, reshaping raw input, chaining schemas, and
//! attaching custom checks. Every modifier is itself a schema, so they stack
//! in the order they are written via [`SchemaExt`](crate::SchemaExt).

use std::marker::PhantomData;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::traits::SchemaLike;

/// Accepts absence and `null`, producing `None` for both.
///
/// At an object field position, absence succeeds and the field is omitted
/// from the validated output. An explicit `null` succeeds with `None` and is
/// kept as `null` in erased output.
pub struct Optional<S> {
    inner: S,
}

impl<S> Optional<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SchemaLike> SchemaLike for Optional<S> {
    type Output = Option<S::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues> {
        if value.is_null() {
            Validation::Success(None)
        } else {
            self.inner.validate(value, path).map(Some)
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if value.is_null() {
            Validation::Success(Value::Null)
        } else {
            self.inner.validate_to_value(value, path)
        }
    }

    fn validate_absent(&self, _path: &JsonPath) -> Validation<Option<Value>, Issues> {
        Validation::Success(None)
    }
}

/// Accepts explicit `null`, producing `None`, but still requires presence.
///
/// Unlike [`Optional`], an absent key is a `missing_key` failure.
pub struct Nullable<S> {
    inner: S,
}

impl<S> Nullable<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SchemaLike> SchemaLike for Nullable<S> {
    type Output = Option<S::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues> {
        if value.is_null() {
            Validation::Success(None)
        } else {
            self.inner.validate(value, path).map(Some)
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if value.is_null() {
            Validation::Success(Value::Null)
        } else {
            self.inner.validate_to_value(value, path)
        }
    }
}

/// Substitutes a default when the value is absent, `null`, or rejected by
/// the inner schema.
///
/// The default is given in output space and is substituted verbatim; it is
/// not re-validated. A defaulted schema therefore never fails.
pub struct DefaultValue<S> {
    inner: S,
    default: Value,
}

impl<S> DefaultValue<S> {
    pub fn new(inner: S, default: Value) -> Self {
        Self { inner, default }
    }
}

impl<S: SchemaLike> SchemaLike for DefaultValue<S> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        if value.is_null() {
            return Validation::Success(self.default.clone());
        }
        match self.inner.validate_to_value(value, path) {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(_) => Validation::Success(self.default.clone()),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        self.validate(value, path)
    }

    fn validate_absent(&self, _path: &JsonPath) -> Validation<Option<Value>, Issues> {
        Validation::Success(Some(self.default.clone()))
    }
}

/// Recovers from inner failure by computing a fallback from the issues.
pub struct Catch<S, F> {
    inner: S,
    fallback: F,
}

impl<S, F> Catch<S, F> {
    pub fn new(inner: S, fallback: F) -> Self {
        Self { inner, fallback }
    }
}

impl<S, F> SchemaLike for Catch<S, F>
where
    S: SchemaLike,
    S::Output: serde::Serialize,
    F: Fn(&Issues) -> S::Output + Send + Sync,
{
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues> {
        match self.inner.validate(value, path) {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(e) => Validation::Success((self.fallback)(&e)),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        match self.inner.validate_to_value(value, path) {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(e) => erase(path, (self.fallback)(&e)),
        }
    }

    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        self.inner.validate_absent(path)
    }
}

/// Applies a pure mapping to the validated output.
///
/// The mapping runs strictly after the inner schema succeeds; it never sees
/// invalid input and cannot reject.
pub struct Transform<S, F, O> {
    inner: S,
    f: F,
    _output: PhantomData<fn() -> O>,
}

impl<S, F, O> Transform<S, F, O> {
    pub fn new(inner: S, f: F) -> Self {
        Self {
            inner,
            f,
            _output: PhantomData,
        }
    }
}

impl<S, F, O> SchemaLike for Transform<S, F, O>
where
    S: SchemaLike,
    F: Fn(S::Output) -> O + Send + Sync,
    O: serde::Serialize + Send + Sync,
{
    type Output = O;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<O, Issues> {
        self.inner.validate(value, path).map(&self.f)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        match self.validate(value, path) {
            Validation::Success(out) => erase(path, out),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        self.inner.validate_absent(path)
    }
}

/// Applies a fallible constructor to the validated output.
///
/// A returned error becomes one `transform_error` issue at the schema's
/// path; issues from the inner schema pass through unchanged.
pub struct TryTransform<S, F, O> {
    inner: S,
    f: F,
    _output: PhantomData<fn() -> O>,
}

impl<S, F, O> TryTransform<S, F, O> {
    pub fn new(inner: S, f: F) -> Self {
        Self {
            inner,
            f,
            _output: PhantomData,
        }
    }
}

impl<S, F, O> SchemaLike for TryTransform<S, F, O>
where
    S: SchemaLike,
    F: Fn(S::Output) -> Result<O, String> + Send + Sync,
    O: serde::Serialize + Send + Sync,
{
    type Output = O;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<O, Issues> {
        let path_for_err = path.clone();
        self.inner.validate(value, path).and_then(|out| {
            match (self.f)(out) {
                Ok(constructed) => Validation::Success(constructed),
                Err(msg) => Validation::Failure(Issues::single(
                    Issue::new(path_for_err.clone(), msg).with_code(codes::TRANSFORM_ERROR),
                )),
            }
        })
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        match self.validate(value, path) {
            Validation::Success(out) => erase(path, out),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        self.inner.validate_absent(path)
    }
}

/// Rewrites the raw value before the inner schema sees it.
///
/// The function reshapes, never validates; whatever it returns is validated
/// by the inner schema as usual. Absence is not preprocessed.
pub struct Preprocess<S, F> {
    inner: S,
    f: F,
}

impl<S, F> Preprocess<S, F> {
    pub fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F> SchemaLike for Preprocess<S, F>
where
    S: SchemaLike,
    F: Fn(&Value) -> Value + Send + Sync,
{
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues> {
        let processed = (self.f)(value);
        self.inner.validate(&processed, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        let processed = (self.f)(value);
        self.inner.validate_to_value(&processed, path)
    }

    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        self.inner.validate_absent(path)
    }
}

/// Feeds the first schema's erased output into a second schema.
///
/// The second stage sees the first stage's validated output, so coercions,
/// trims, and transforms upstream are visible downstream. Failure in either
/// stage propagates unchanged; the second stage only runs when the first
/// succeeds.
pub struct Pipe<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pipe<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> SchemaLike for Pipe<A, B>
where
    A: SchemaLike,
    B: SchemaLike,
{
    type Output = B::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues> {
        match self.first.validate_to_value(value, path) {
            Validation::Success(v) => self.second.validate(&v, path),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        match self.first.validate_to_value(value, path) {
            Validation::Success(v) => self.second.validate_to_value(&v, path),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        match self.first.validate_absent(path) {
            Validation::Success(Some(v)) => {
                self.second.validate_to_value(&v, path).map(Some)
            }
            Validation::Success(None) => Validation::Success(None),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }
}

/// Adds a custom predicate over the validated output.
///
/// The predicate only runs when the inner schema succeeds. A `false` result
/// yields one issue with the configured code and message.
pub struct Refine<S, F> {
    inner: S,
    code: String,
    message: String,
    pred: F,
}

impl<S, F> Refine<S, F> {
    pub fn new(inner: S, code: impl Into<String>, message: impl Into<String>, pred: F) -> Self {
        Self {
            inner,
            code: code.into(),
            message: message.into(),
            pred,
        }
    }

    fn issue(&self, path: &JsonPath) -> Issues {
        Issues::single(
            Issue::new(path.clone(), self.message.clone()).with_code(self.code.clone()),
        )
    }
}

impl<S, F> SchemaLike for Refine<S, F>
where
    S: SchemaLike,
    S::Output: serde::Serialize,
    F: Fn(&S::Output) -> bool + Send + Sync,
{
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues> {
        match self.inner.validate(value, path) {
            Validation::Success(out) => {
                if (self.pred)(&out) {
                    Validation::Success(out)
                } else {
                    Validation::Failure(self.issue(path))
                }
            }
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        match self.validate(value, path) {
            Validation::Success(out) => erase(path, out),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        self.inner.validate_absent(path)
    }
}

/// Issue sink handed to [`SuperRefine`] callbacks.
///
/// Issues are pathed relative to the refined schema's location; an issue
/// added without a field lands at the schema's own path.
pub struct RefineContext {
    base: JsonPath,
    issues: Vec<Issue>,
}

impl RefineContext {
    fn new(base: JsonPath) -> Self {
        Self {
            base,
            issues: Vec::new(),
        }
    }

    /// The path of the value being refined.
    pub fn path(&self) -> &JsonPath {
        &self.base
    }

    /// Reports an issue at the refined value's own path.
    pub fn add_issue(&mut self, code: impl Into<String>, message: impl Into<String>) {
        let issue = Issue::new(self.base.clone(), message).with_code(code.into());
        self.issues.push(issue);
    }

    /// Reports an issue at a field beneath the refined value.
    pub fn add_issue_at(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        let path = self.base.push_field(field.into());
        self.issues.push(Issue::new(path, message).with_code(code.into()));
    }

    /// Reports a fully-built issue as-is.
    pub fn report(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    fn into_issues(self) -> Option<Issues> {
        Issues::from_vec(self.issues)
    }
}

/// Adds a callback that may report any number of precisely-pathed issues.
///
/// This is the escape hatch for cross-field checks: the callback receives
/// the whole validated output and a [`RefineContext`] to report against.
/// It only runs when the inner schema succeeds, so it always sees
/// structurally valid data.
pub struct SuperRefine<S, F> {
    inner: S,
    f: F,
}

impl<S, F> SuperRefine<S, F> {
    pub fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F> SchemaLike for SuperRefine<S, F>
where
    S: SchemaLike,
    S::Output: serde::Serialize,
    F: Fn(&S::Output, &mut RefineContext) + Send + Sync,
{
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, Issues> {
        match self.inner.validate(value, path) {
            Validation::Success(out) => {
                let mut ctx = RefineContext::new(path.clone());
                (self.f)(&out, &mut ctx);
                match ctx.into_issues() {
                    None => Validation::Success(out),
                    Some(issues) => Validation::Failure(issues),
                }
            }
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, Issues> {
        match self.validate(value, path) {
            Validation::Success(out) => erase(path, out),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_absent(&self, path: &JsonPath) -> Validation<Option<Value>, Issues> {
        self.inner.validate_absent(path)
    }
}

/// Serializes a typed output back to a `Value` for erased composition.
fn erase<O: serde::Serialize>(path: &JsonPath, out: O) -> Validation<Value, Issues> {
    match serde_json::to_value(out) {
        Ok(v) => Validation::Success(v),
        Err(e) => Validation::Failure(Issues::single(
            Issue::new(path.clone(), format!("output not representable as JSON: {}", e))
                .with_code(codes::TRANSFORM_ERROR),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::numeric::IntegerSchema;
    use crate::schema::object::ObjectSchema;
    use crate::schema::string::StringSchema;
    use crate::schema::traits::SchemaExt;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_optional_accepts_null_and_absence() {
        let schema = StringSchema::new().min_len(1).optional();

        let result = schema.validate(&json!(null), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), None);

        let result = schema.validate_absent(&JsonPath::root());
        assert_eq!(result.into_result().unwrap(), None);

        let result = schema.validate(&json!("hi"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), Some("hi".to_string()));
    }

    #[test]
    fn test_optional_still_validates_present_values() {
        let schema = StringSchema::new().min_len(5).optional();

        let result = schema.validate(&json!("hi"), &JsonPath::root());
        assert!(result.is_failure());
    }

    #[test]
    fn test_nullable_accepts_null_but_not_absence() {
        let schema = StringSchema::new().nullable();

        let result = schema.validate(&json!(null), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), None);

        let result = schema.validate_absent(&JsonPath::root());
        assert!(result.is_failure());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "missing_key");
    }

    #[test]
    fn test_default_substitutes_for_null_absence_and_failure() {
        let schema = IntegerSchema::new().min(0).default_to(json!(10));

        let result = schema.validate(&json!(null), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!(10));

        let result = schema.validate_absent(&JsonPath::root());
        assert_eq!(result.into_result().unwrap(), Some(json!(10)));

        let result = schema.validate(&json!(-5), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!(10));

        let result = schema.validate(&json!(7), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!(7));
    }

    #[test]
    fn test_default_is_substituted_verbatim() {
        // The default itself violates the inner schema; it is still used.
        let schema = IntegerSchema::new().min(0).default_to(json!(-1));

        let result = schema.validate(&json!(null), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!(-1));
    }

    #[test]
    fn test_catch_computes_fallback_from_issues() {
        let schema = IntegerSchema::new()
            .min(0)
            .catch(|issues: &Issues| -(issues.len() as i64));

        let result = schema.validate(&json!(5), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), 5);

        let result = schema.validate(&json!("oops"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), -1);
    }

    #[test]
    fn test_transform_runs_after_validation() {
        let schema = StringSchema::new()
            .min_len(1)
            .transform(|s: String| s.len());

        let result = schema.validate(&json!("hello"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), 5);

        // inner failure: the mapping never runs
        let result = schema.validate(&json!(""), &JsonPath::root());
        assert!(result.is_failure());
    }

    #[test]
    fn test_transform_erased_output() {
        let schema = StringSchema::new().transform(|s: String| s.to_uppercase());

        let result = schema.validate_to_value(&json!("abc"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!("ABC"));
    }

    #[test]
    fn test_construct_success_and_failure() {
        let schema = StringSchema::new().construct(|s: String| {
            s.parse::<u16>().map_err(|e| format!("not a port: {}", e))
        });

        let result = schema.validate(&json!("8080"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), 8080u16);

        let result = schema.validate(&json!("not-a-port"), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "transform_error");
        assert!(issues.first().message.starts_with("not a port"));
    }

    #[test]
    fn test_construct_error_pathed_to_schema() {
        let schema = StringSchema::new().construct(|_s: String| Err::<i64, _>("nope".to_string()));
        let path = JsonPath::root().push_field("port");

        let result = schema.validate(&json!("x"), &path);
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().path.to_string(), "port");
    }

    #[test]
    fn test_preprocess_reshapes_before_validation() {
        let schema = StringSchema::new().min_len(1).preprocess(|v: &Value| {
            match v {
                Value::Number(n) => Value::String(n.to_string()),
                other => other.clone(),
            }
        });

        let result = schema.validate(&json!(42), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), "42");

        let result = schema.validate(&json!("already a string"), &JsonPath::root());
        assert!(result.is_success());
    }

    #[test]
    fn test_pipe_feeds_validated_output_downstream() {
        // trim happens in the first stage, so the second stage sees "abc"
        let schema = StringSchema::new()
            .trim()
            .pipe(StringSchema::new().min_len(3));

        let result = schema.validate(&json!("  abc  "), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), "abc");

        let result = schema.validate(&json!("  ab  "), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "too_short");
    }

    #[test]
    fn test_pipe_first_stage_failure_short_circuits_second() {
        let schema = IntegerSchema::new().pipe(IntegerSchema::new().min(0));

        let result = schema.validate(&json!("nan"), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().code, "invalid_type");
    }

    #[test]
    fn test_refine_predicate() {
        let schema = IntegerSchema::new().refine("even", "must be even", |n: &i64| n % 2 == 0);

        assert!(schema.validate(&json!(4), &JsonPath::root()).is_success());

        let result = schema.validate(&json!(3), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "even");
        assert_eq!(issues.first().message, "must be even");
    }

    #[test]
    fn test_refine_skipped_when_inner_fails() {
        let schema = IntegerSchema::new().refine("even", "must be even", |n: &i64| n % 2 == 0);

        let result = schema.validate(&json!("three"), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().code, "invalid_type");
    }

    #[test]
    fn test_refine_erasure_validates_inner_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let schema = StringSchema::new()
            .preprocess(move |v: &Value| {
                seen.fetch_add(1, Ordering::SeqCst);
                v.clone()
            })
            .refine("nonempty", "must not be empty", |s: &String| !s.is_empty());

        let result = schema.validate_to_value(&json!("hi"), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!("hi"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_super_refine_erasure_validates_inner_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let schema = IntegerSchema::new()
            .preprocess(move |v: &Value| {
                seen.fetch_add(1, Ordering::SeqCst);
                v.clone()
            })
            .super_refine(|n: &i64, ctx: &mut RefineContext| {
                if *n < 0 {
                    ctx.add_issue("negative", "must not be negative");
                }
            });

        let result = schema.validate_to_value(&json!(7), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_super_refine_cross_field() {
        let schema = ObjectSchema::new()
            .field("min", IntegerSchema::new())
            .field("max", IntegerSchema::new())
            .super_refine(|obj: &serde_json::Map<String, Value>, ctx: &mut RefineContext| {
                let min = obj.get("min").and_then(Value::as_i64);
                let max = obj.get("max").and_then(Value::as_i64);
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        ctx.add_issue_at("min", "range_inverted", "min must not exceed max");
                    }
                }
            });

        let result = schema.validate(&json!({"min": 1, "max": 9}), &JsonPath::root());
        assert!(result.is_success());

        let result = schema.validate(&json!({"min": 9, "max": 1}), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.first().code, "range_inverted");
        assert_eq!(issues.first().path.to_string(), "min");
    }

    #[test]
    fn test_super_refine_multiple_issues() {
        let schema = IntegerSchema::new().super_refine(|n: &i64, ctx: &mut RefineContext| {
            if *n % 2 != 0 {
                ctx.add_issue("not_even", "must be even");
            }
            if *n < 10 {
                ctx.add_issue("too_low", "must be at least 10");
            }
        });

        let result = schema.validate(&json!(3), &JsonPath::root());
        let issues = unwrap_failure(result);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_modifiers_stack_in_written_order() {
        let schema = StringSchema::new()
            .trim()
            .min_len(1)
            .transform(|s: String| s.len())
            .refine("small", "too large", |n: &usize| *n < 10)
            .optional();

        let result = schema.validate(&json!("  abc  "), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), Some(3));

        let result = schema.validate(&json!(null), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), None);
    }

    #[test]
    fn test_optional_field_omitted_from_output() {
        let schema = ObjectSchema::new()
            .field("name", StringSchema::new())
            .field("nick", StringSchema::new().optional());

        let result = schema.validate(&json!({"name": "ada"}), &JsonPath::root());
        let out = result.into_result().unwrap();
        assert!(!out.contains_key("nick"));
    }

    #[test]
    fn test_default_field_filled_in_output() {
        let schema = ObjectSchema::new()
            .field("name", StringSchema::new())
            .field("role", StringSchema::new().default_to(json!("user")));

        let result = schema.validate(&json!({"name": "ada"}), &JsonPath::root());
        let out = result.into_result().unwrap();
        assert_eq!(out.get("role"), Some(&json!("user")));
    }
}
