//! # Verdict
//!
//! A schema-driven validation engine that accumulates ALL validation issues,
//! providing comprehensive feedback rather than short-circuiting on the
//! first failure.
//!
//! ## Overview
//!
//! Schemas are declarative values built from primitives (strings, numbers,
//! booleans, datetimes, literals, enums), composites (objects, arrays, maps,
//! unions), and a modifier chain (optional, nullable, defaults, transforms,
//! refinements). Validating never mutates the input; every independent
//! violation is reported with the exact path where it occurred, via
//! stillwater's `Validation` type for applicative error accumulation.
//!
//! ## Core Types
//!
//! - [`JsonPath`]: a path to a value in nested input (e.g., `users[1].email`)
//! - [`Issue`]: a single validation issue with code, message, and context
//! - [`Issues`]: a non-empty collection of issues
//! - [`Schema`]: entry point for building schemas
//! - [`SchemaLike`] / [`SchemaExt`]: the validation trait and its fluent
//!   modifier chain
//!
//! ## Example
//!
//! ```rust
//! use verdict::{JsonPath, Schema, SchemaExt, SchemaLike};
//! use serde_json::json;
//!
//! let signup = Schema::object()
//!     .field("username", Schema::string().min_len(3).max_len(20))
//!     .field("email", Schema::string().email())
//!     .field("age", Schema::integer().non_negative().optional());
//!
//! // Every problem is reported at once, not just the first
//! let result = signup.validate(
//!     &json!({"username": "ab", "email": "not-an-email"}),
//!     &JsonPath::root(),
//! );
//! let issues = result.into_result().unwrap_err();
//! assert_eq!(issues.len(), 2);
//! ```
//!
//! ## Strict boundary
//!
//! [`SchemaLike::validate_strict`] returns a plain `Result` wrapping the
//! complete issue list in [`ValidationFailed`], for call sites that compose
//! with `?` rather than with `Validation`.

pub mod effect;
pub mod error;
pub mod messages;
pub mod path;
pub mod schema;

pub use error::{codes, Issue, Issues, ValidationFailed};
pub use messages::{MessageResolver, MessageTable};
pub use path::{JsonPath, PathSegment};
pub use schema::{
    ArraySchema, BooleanSchema, DateTimeSchema, EnumSchema, FloatSchema, IntegerSchema,
    LiteralSchema, MapSchema, ObjectSchema, Schema, SchemaExt, SchemaLike, StringSchema,
    UnionSchema, ValueValidator,
};

/// Type alias for validation results carrying accumulated issues.
pub type ValidationResult<T> = stillwater::Validation<T, Issues>;
