//! Environment-injected validation.
//!
//! Some checks need resources the schema tree cannot carry, like a database
//! handle for uniqueness checks or an API client for existence lookups. This
//! module keeps those checks statically separate from the sync tree: a plain
//! `validate` call can never hide I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use verdict::Schema;
//! use verdict::effect::AsyncSchemaExt;
//!
//! let schema = Schema::string()
//!     .min_len(3)
//!     .check_with_env(UniqueEmail);
//!
//! let result = schema.validate_with_env(&value, &JsonPath::root(), &app_env);
//! ```

pub mod async_validator;

pub use async_validator::{
    AsyncFieldValidator, AsyncObjectSchema, AsyncSchema, AsyncSchemaExt, AsyncValidator,
};
