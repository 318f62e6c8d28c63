//! Validation issue types.
//!
//! This module provides [`Issue`] for single validation failures, [`Issues`]
//! for accumulating multiple failures, and [`ValidationFailed`] for the strict
//! entry point that converts an accumulated failure into a `std::error::Error`.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// Machine-readable issue codes emitted by the built-in validators.
///
/// Custom refinements may use any code; these constants cover the engine's
/// own vocabulary so call sites and tests never drift on spelling.
pub mod codes {
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const TOO_SHORT: &str = "too_short";
    pub const TOO_LONG: &str = "too_long";
    pub const TOO_SMALL: &str = "too_small";
    pub const TOO_BIG: &str = "too_big";
    pub const INVALID_FORMAT: &str = "invalid_format";
    pub const INVALID_ENUM: &str = "invalid_enum";
    pub const INVALID_LITERAL: &str = "invalid_literal";
    pub const INVALID_UNION: &str = "invalid_union";
    pub const INVALID_COERCION: &str = "invalid_coercion";
    pub const UNKNOWN_KEY: &str = "unknown_key";
    pub const MISSING_KEY: &str = "missing_key";
    pub const CUSTOM_ERROR: &str = "custom_error";
    pub const TRANSFORM_ERROR: &str = "transform_error";
    pub const NOT_MULTIPLE_OF: &str = "not_multiple_of";
    pub const DATE_TOO_EARLY: &str = "date_too_early";
    pub const DATE_TOO_LATE: &str = "date_too_late";
}

/// A single validation issue with full context.
///
/// `Issue` captures everything a caller needs to report or dispatch on a
/// failure:
/// - **code**: machine-readable code for programmatic handling
/// - **message**: human-readable description of the failure
/// - **path**: where in the data structure the issue occurred
/// - **got**: the offending value, formatted (optional)
/// - **expected**: what was expected instead (optional)
/// - **nested**: sub-issues, used by union failures to carry each
///   alternative's diagnostics without polluting the top-level list
///
/// # Example
///
/// ```rust
/// use verdict::{Issue, JsonPath};
///
/// let issue = Issue::new(
///     JsonPath::root().push_field("email"),
///     "invalid email format"
/// )
/// .with_code("invalid_format")
/// .with_got("not-an-email")
/// .with_expected("email address");
///
/// assert_eq!(issue.code, "invalid_format");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Machine-readable issue code (e.g. `too_short`).
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// The path to the value the issue refers to.
    pub path: JsonPath,
    /// The actual value that was received (formatted as string).
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Sub-issues, e.g. per-alternative diagnostics of a failed union.
    pub nested: Vec<Issue>,
}

impl Issue {
    /// Creates a new issue with the given path and message.
    ///
    /// The code defaults to `custom_error`; use `with_code` to set a more
    /// specific one.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            code: codes::CUSTOM_ERROR.to_string(),
            message: message.into(),
            path,
            got: None,
            expected: None,
            nested: Vec::new(),
        }
    }

    /// Sets the issue code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" (actual value) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Replaces the message and returns self for chaining.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches sub-issues and returns self for chaining.
    pub fn with_nested(mut self, nested: Vec<Issue>) -> Self {
        self.nested = nested;
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for Issue {}

// Issue is Send + Sync since all fields are owned types. Automatically
// derived, but asserted so it stays true if the fields change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty collection of validation issues.
///
/// `Issues` wraps a `NonEmptyVec<Issue>` to guarantee at least one issue is
/// present, which `Validation<T, Issues>` requires: a failure can never be
/// empty.
///
/// # Combining
///
/// `Issues` implements `Semigroup`, so failures from independent validations
/// can be merged without losing any of them:
///
/// ```rust
/// use verdict::{Issue, Issues, JsonPath};
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::new(JsonPath::root().push_field("name"), "required"));
/// let b = Issues::single(Issue::new(JsonPath::root().push_field("email"), "invalid format"));
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// Creates an `Issues` containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Creates an `Issues` from a `NonEmptyVec`.
    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self(issues)
    }

    /// Creates an `Issues` from a `Vec<Issue>`, or `None` if the vec is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(Self)
    }

    /// Returns the number of issues in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns all issues at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&Issue> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all issues with the specified code.
    pub fn with_code(&self, code: &str) -> Vec<&Issue> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first issue in the collection.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Issue> {
        &self.0
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};

/// The error returned by the strict entry point.
///
/// Where plain `validate` returns the `Validation` sum type,
/// `validate_strict` converts a failure into this error so it can flow
/// through `?` and `Box<dyn Error>` like any other Rust error. The complete
/// issue list is preserved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{issues}")]
pub struct ValidationFailed {
    /// Every issue found, in discovery order.
    pub issues: Issues,
}

impl ValidationFailed {
    /// Wraps an accumulated failure.
    pub fn new(issues: Issues) -> Self {
        Self { issues }
    }
}

impl From<Issues> for ValidationFailed {
    fn from(issues: Issues) -> Self {
        Self { issues }
    }
}
