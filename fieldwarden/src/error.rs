//! Error types for form configuration and panic handling.

use std::any::Any;

use thiserror::Error;

/// Errors raised while attaching rules to a form.
///
/// Validation *failures* are not errors; they are reported through
/// [`ValidationResult`](crate::validation::ValidationResult) and the
/// configured error display. `FormError` only covers rule definitions that
/// can never be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// A `pattern` rule was given a regular expression that does not compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// Compiler diagnostic from the regex engine.
        reason: String,
    },

    /// A numeric range whose lower bound is above its upper bound.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },

    /// A length constraint that no value could satisfy.
    #[error("invalid length bounds: {0}")]
    InvalidLength(String),
}

impl FormError {
    pub(crate) fn invalid_pattern(pattern: &str, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
