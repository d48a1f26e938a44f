//! Error types for the library.
//!
//! - [`SanitizeError`] - the sanitization engine failed on an input

use thiserror::Error;

/// Sanitization engine failures.
///
/// Policy violations in the input are never errors; offending constructs
/// are stripped silently. These variants only cover the engine itself
/// breaking down, and are handed to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// The element rewriter rejected the filtered markup.
    #[error("HTML rewrite failed: {0}")]
    Rewrite(String),
}
