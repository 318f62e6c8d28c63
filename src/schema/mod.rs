//! Schema types for validation.
//!
//! Schemas are built with the [`Schema`] factory and composed fluently:
//! primitives carry their own constraints, composites nest other schemas,
//! and the modifier chain from [`SchemaExt`] wraps any of them.
//!
//! # Example
//!
//! ```rust
//! use verdict::{Schema, SchemaExt, SchemaLike, JsonPath};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .field("name", Schema::string().min_len(1))
//!     .field("email", Schema::string().email())
//!     .field("age", Schema::integer().non_negative().optional());
//!
//! let result = user.validate(
//!     &json!({"name": "Ada", "email": "ada@example.com"}),
//!     &JsonPath::root(),
//! );
//! assert!(result.is_success());
//! ```

pub mod array;
pub mod boolean;
pub mod datetime;
pub mod literal;
pub mod map;
pub mod modifiers;
pub mod numeric;
pub mod object;
pub mod string;
pub mod traits;
pub mod union;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use datetime::DateTimeSchema;
pub use literal::{EnumSchema, LiteralSchema};
pub use map::MapSchema;
pub use modifiers::{
    Catch, DefaultValue, Nullable, Optional, Pipe, Preprocess, Refine, RefineContext, SuperRefine,
    Transform, TryTransform,
};
pub use numeric::{FloatSchema, IntegerSchema};
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::{SchemaExt, SchemaLike, ValueValidator};
pub use union::UnionSchema;

pub(crate) use string::value_type_name;

use serde_json::Value;

/// Entry point for creating validation schemas.
///
/// `Schema` provides factory methods for creating different schema types.
/// Each schema type validates specific value types and supports various
/// constraints through a builder pattern.
///
/// # Example
///
/// ```rust
/// use verdict::Schema;
///
/// // A string schema with length constraints
/// let name = Schema::string().min_len(1).max_len(100);
///
/// // An integer schema with a range
/// let port = Schema::integer().range(1..=65535);
/// ```
pub struct Schema;

impl Schema {
    /// Creates a string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates an integer schema.
    pub fn integer() -> IntegerSchema {
        IntegerSchema::new()
    }

    /// Creates a float schema. Integer inputs are accepted and widened.
    pub fn float() -> FloatSchema {
        FloatSchema::new()
    }

    /// Creates a boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates an RFC 3339 datetime schema.
    pub fn datetime() -> DateTimeSchema {
        DateTimeSchema::new()
    }

    /// Creates a schema matching exactly one value.
    pub fn literal(expected: Value) -> LiteralSchema {
        LiteralSchema::new(expected)
    }

    /// Creates a schema accepting any member of a closed value set.
    pub fn one_of(members: Vec<Value>) -> EnumSchema {
        EnumSchema::new(members)
    }

    /// Creates an object schema with no fields. Add fields with
    /// [`ObjectSchema::field`].
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an array schema validating every element against
    /// `element_schema`.
    pub fn array<S: SchemaLike>(element_schema: S) -> ArraySchema<S> {
        ArraySchema::new(element_schema)
    }

    /// Creates a map schema validating every value against `value_schema`.
    pub fn map<V: SchemaLike>(value_schema: V) -> MapSchema<V> {
        MapSchema::new(value_schema)
    }

    /// Creates a union over alternatives, tried in order.
    pub fn union(alternatives: Vec<Box<dyn ValueValidator>>) -> UnionSchema {
        UnionSchema::new(alternatives)
    }
}
