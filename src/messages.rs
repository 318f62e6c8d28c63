//! Message resolution.
//!
//! Issue messages are produced at validation time with built-in wording (or
//! a per-constraint override). A [`MessageResolver`] rewrites them after the
//! fact, keyed by issue code, without touching codes, paths, or structure.
//! This keeps localization and house-style wording out of schema definitions.

use std::collections::HashMap;

use crate::error::{Issue, Issues};

/// Resolves a replacement message for an issue.
///
/// Returning `None` keeps the message the issue already carries. Resolvers
/// see the whole issue, so replacements can use the path, the expectation,
/// or the offending value.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, code: &str, issue: &Issue) -> Option<String>;
}

impl<F> MessageResolver for F
where
    F: Fn(&str, &Issue) -> Option<String> + Send + Sync,
{
    fn resolve(&self, code: &str, issue: &Issue) -> Option<String> {
        self(code, issue)
    }
}

/// A code-to-message table.
///
/// # Example
///
/// ```rust
/// use verdict::{Schema, SchemaLike, JsonPath, MessageTable, codes};
/// use serde_json::json;
///
/// let table = MessageTable::new().with(codes::TOO_SHORT, "valeur trop courte");
///
/// let schema = Schema::string().min_len(5);
/// let issues = schema
///     .validate(&json!("ab"), &JsonPath::root())
///     .into_result()
///     .unwrap_err()
///     .localized(&table);
///
/// assert_eq!(issues.first().message, "valeur trop courte");
/// ```
#[derive(Default)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a message for a code, replacing any previous entry.
    pub fn with(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(code.into(), message.into());
        self
    }
}

impl MessageResolver for MessageTable {
    fn resolve(&self, code: &str, _issue: &Issue) -> Option<String> {
        self.messages.get(code).cloned()
    }
}

fn localize_issue(mut issue: Issue, resolver: &dyn MessageResolver) -> Issue {
    if let Some(message) = resolver.resolve(&issue.code, &issue) {
        issue.message = message;
    }
    issue.nested = issue
        .nested
        .into_iter()
        .map(|nested| localize_issue(nested, resolver))
        .collect();
    issue
}

impl Issues {
    /// Rewrites every message the resolver has an answer for, including
    /// nested issues. Codes, paths, and issue order are preserved.
    pub fn localized(self, resolver: &dyn MessageResolver) -> Issues {
        let localized: Vec<Issue> = self
            .into_iter()
            .map(|issue| localize_issue(issue, resolver))
            .collect();
        match Issues::from_vec(localized) {
            Some(issues) => issues,
            // localize_issue is one-to-one, so the list cannot be empty
            None => unreachable!("localization preserves issue count"),
        }
    }
}
