//! Async validation with environment injection.
//!
//! Async validators receive an environment parameter carrying whatever
//! resources the check needs, such as a database handle or an API client.
//! Validation results still use `Validation` for error accumulation, and
//! testability comes from swapping the environment type.
//!
//! The sync stage always runs first: async refinements only ever see values
//! the sync schema has already accepted.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{codes, Issue, Issues};
use crate::path::JsonPath;
use crate::schema::{value_type_name, SchemaLike};

/// An environment-injected validation check.
///
/// # Example
///
/// ```rust,ignore
/// struct UniqueEmail;
///
/// impl AsyncValidator<AppEnv> for UniqueEmail {
///     fn validate_async(
///         &self,
///         value: &Value,
///         path: &JsonPath,
///         env: &AppEnv,
///     ) -> Validation<(), Issues> {
///         let email = value.as_str().unwrap_or("");
///         if env.db.email_exists(email) {
///             Validation::Failure(Issues::single(
///                 Issue::new(path.clone(), "email already registered")
///                     .with_code("not_unique"),
///             ))
///         } else {
///             Validation::Success(())
///         }
///     }
/// }
/// ```
pub trait AsyncValidator<E>: Send + Sync {
    fn validate_async(&self, value: &Value, path: &JsonPath, env: &E)
        -> Validation<(), Issues>;
}

impl<E, F> AsyncValidator<E> for F
where
    F: Fn(&Value, &JsonPath, &E) -> Validation<(), Issues> + Send + Sync,
{
    fn validate_async(&self, value: &Value, path: &JsonPath, env: &E)
        -> Validation<(), Issues> {
        self(value, path, env)
    }
}

/// A schema with attached environment-injected validators.
///
/// The sync schema runs first; if it fails, those issues are returned
/// immediately and no async validator runs. If it passes, every async
/// validator runs and their issues accumulate.
pub struct AsyncSchema<S, E> {
    sync_schema: S,
    async_validators: Vec<Box<dyn AsyncValidator<E>>>,
}

impl<S: SchemaLike, E> AsyncSchema<S, E> {
    pub fn new(sync_schema: S) -> Self {
        Self {
            sync_schema,
            async_validators: Vec::new(),
        }
    }

    /// Adds an environment-injected validator.
    pub fn check<V>(mut self, validator: V) -> Self
    where
        V: AsyncValidator<E> + 'static,
    {
        self.async_validators.push(Box::new(validator));
        self
    }

    /// Validates sequentially: sync stage, then each async validator in
    /// the order they were attached.
    pub fn validate_with_env(
        &self,
        value: &Value,
        path: &JsonPath,
        env: &E,
    ) -> Validation<S::Output, Issues> {
        match self.sync_schema.validate(value, path) {
            Validation::Failure(issues) => Validation::Failure(issues),
            Validation::Success(validated) => {
                let mut all_issues = Vec::new();
                for validator in &self.async_validators {
                    if let Validation::Failure(issues) =
                        validator.validate_async(value, path, env)
                    {
                        all_issues.extend(issues.into_iter());
                    }
                }
                match Issues::from_vec(all_issues) {
                    None => Validation::Success(validated),
                    Some(issues) => Validation::Failure(issues),
                }
            }
        }
    }

    /// Validates with async validators running in parallel via rayon.
    ///
    /// Issue aggregation order matches [`validate_with_env`](Self::validate_with_env):
    /// the parallel iterator is indexed, so issues come out in attachment
    /// order regardless of which validator finishes first.
    pub fn validate_with_env_parallel(
        &self,
        value: &Value,
        path: &JsonPath,
        env: &E,
    ) -> Validation<S::Output, Issues>
    where
        E: Sync,
    {
        match self.sync_schema.validate(value, path) {
            Validation::Failure(issues) => Validation::Failure(issues),
            Validation::Success(validated) => {
                let all_issues: Vec<Issue> = self
                    .async_validators
                    .par_iter()
                    .flat_map(|validator| {
                        match validator.validate_async(value, path, env) {
                            Validation::Failure(issues) => {
                                issues.into_iter().collect::<Vec<_>>()
                            }
                            Validation::Success(()) => Vec::new(),
                        }
                    })
                    .collect();

                match Issues::from_vec(all_issues) {
                    None => Validation::Success(validated),
                    Some(issues) => Validation::Failure(issues),
                }
            }
        }
    }
}

/// Lifts any schema into the async world.
pub trait AsyncSchemaExt: SchemaLike + Sized {
    /// Wraps this schema so environment-injected validators can be attached.
    fn to_async<E>(self) -> AsyncSchema<Self, E> {
        AsyncSchema::new(self)
    }

    /// Shorthand for `to_async().check(validator)`.
    fn check_with_env<E, V>(self, validator: V) -> AsyncSchema<Self, E>
    where
        V: AsyncValidator<E> + 'static,
    {
        AsyncSchema::new(self).check(validator)
    }
}

impl<S: SchemaLike + Sized> AsyncSchemaExt for S {}

/// A field validator usable inside [`AsyncObjectSchema`].
///
/// Sync schemas satisfy this automatically by ignoring the environment, so
/// sync and async fields mix freely in one object.
pub trait AsyncFieldValidator<E>: Send + Sync {
    fn validate_field(
        &self,
        value: &Value,
        path: &JsonPath,
        env: &E,
    ) -> Validation<Value, Issues>;

    fn validate_field_absent(
        &self,
        path: &JsonPath,
        env: &E,
    ) -> Validation<Option<Value>, Issues>;
}

impl<E, S: SchemaLike> AsyncFieldValidator<E> for S {
    fn validate_field(
        &self,
        value: &Value,
        path: &JsonPath,
        _env: &E,
    ) -> Validation<Value, Issues> {
        self.validate_to_value(value, path)
    }

    fn validate_field_absent(
        &self,
        path: &JsonPath,
        _env: &E,
    ) -> Validation<Option<Value>, Issues> {
        self.validate_absent(path)
    }
}

impl<S, E> AsyncFieldValidator<E> for AsyncSchema<S, E>
where
    S: SchemaLike,
    E: Send + Sync,
{
    fn validate_field(
        &self,
        value: &Value,
        path: &JsonPath,
        env: &E,
    ) -> Validation<Value, Issues> {
        match self.sync_schema.validate_to_value(value, path) {
            Validation::Failure(issues) => Validation::Failure(issues),
            Validation::Success(validated) => {
                let mut all_issues = Vec::new();
                for validator in &self.async_validators {
                    if let Validation::Failure(issues) =
                        validator.validate_async(value, path, env)
                    {
                        all_issues.extend(issues.into_iter());
                    }
                }
                match Issues::from_vec(all_issues) {
                    None => Validation::Success(validated),
                    Some(issues) => Validation::Failure(issues),
                }
            }
        }
    }

    fn validate_field_absent(
        &self,
        path: &JsonPath,
        _env: &E,
    ) -> Validation<Option<Value>, Issues> {
        self.sync_schema.validate_absent(path)
    }
}

/// An object validator whose fields may need the environment.
///
/// Fields are declared in order, exactly like the sync object schema, and
/// issues aggregate in declaration order for both the sequential and the
/// parallel entry points.
pub struct AsyncObjectSchema<E> {
    fields: IndexMap<String, Box<dyn AsyncFieldValidator<E>>>,
}

impl<E> Default for AsyncObjectSchema<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> AsyncObjectSchema<E> {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Adds a field. Sync schemas and `AsyncSchema` wrappers both fit.
    pub fn field<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: AsyncFieldValidator<E> + 'static,
    {
        self.fields.insert(name.into(), Box::new(validator));
        self
    }

    fn type_error(&self, value: &Value, path: &JsonPath) -> Issues {
        Issues::single(
            Issue::new(path.clone(), "expected object")
                .with_code(codes::INVALID_TYPE)
                .with_got(value_type_name(value))
                .with_expected("object"),
        )
    }

    /// Outcome of one field: value to insert (if any) plus its issues.
    fn validate_one(
        &self,
        name: &str,
        validator: &dyn AsyncFieldValidator<E>,
        obj: &Map<String, Value>,
        path: &JsonPath,
        env: &E,
    ) -> (Option<Value>, Vec<Issue>) {
        let field_path = path.push_field(name);
        match obj.get(name) {
            Some(field_value) => match validator.validate_field(field_value, &field_path, env) {
                Validation::Success(v) => (Some(v), Vec::new()),
                Validation::Failure(e) => (None, e.into_iter().collect()),
            },
            None => match validator.validate_field_absent(&field_path, env) {
                Validation::Success(Some(v)) => (Some(v), Vec::new()),
                Validation::Success(None) => (None, Vec::new()),
                Validation::Failure(e) => (None, e.into_iter().collect()),
            },
        }
    }

    /// Validates every field sequentially, in declaration order.
    pub fn validate_with_env(
        &self,
        value: &Value,
        path: &JsonPath,
        env: &E,
    ) -> Validation<Map<String, Value>, Issues> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return Validation::Failure(self.type_error(value, path)),
        };

        let outcomes: Vec<(Option<Value>, Vec<Issue>)> = self
            .fields
            .iter()
            .map(|(name, validator)| {
                self.validate_one(name, validator.as_ref(), obj, path, env)
            })
            .collect();

        self.assemble(outcomes)
    }

    /// Validates fields concurrently via rayon.
    ///
    /// Issues still aggregate in declaration order.
    pub fn validate_with_env_parallel(
        &self,
        value: &Value,
        path: &JsonPath,
        env: &E,
    ) -> Validation<Map<String, Value>, Issues>
    where
        E: Sync,
    {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return Validation::Failure(self.type_error(value, path)),
        };

        let entries: Vec<(&String, &Box<dyn AsyncFieldValidator<E>>)> =
            self.fields.iter().collect();
        let outcomes: Vec<(Option<Value>, Vec<Issue>)> = entries
            .par_iter()
            .map(|(name, validator)| {
                self.validate_one(name, validator.as_ref(), obj, path, env)
            })
            .collect();

        self.assemble(outcomes)
    }

    fn assemble(
        &self,
        outcomes: Vec<(Option<Value>, Vec<Issue>)>,
    ) -> Validation<Map<String, Value>, Issues> {
        let mut validated = Map::new();
        let mut all_issues = Vec::new();
        for ((name, _), (field_value, issues)) in self.fields.iter().zip(outcomes) {
            if let Some(v) = field_value {
                validated.insert(name.clone(), v);
            }
            all_issues.extend(issues);
        }
        match Issues::from_vec(all_issues) {
            None => Validation::Success(validated),
            Some(issues) => Validation::Failure(issues),
        }
    }
}
