//! Error types for validation failures.
//!
//! This module provides types for representing validation issues with rich
//! context including codes, paths, and expected/actual values, plus the
//! boundary error used by the strict entry point.

mod issue;

pub use issue::{codes, Issue, Issues, ValidationFailed};
