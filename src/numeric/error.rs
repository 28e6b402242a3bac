//! Error types for pattern compilation
//!
//! Every failure in the pipeline is deterministic for a given input pattern
//! and unrecoverable: a wrong encoded regex would silently mismatch stored
//! data, so no pass attempts partial recovery or best-effort output.

use std::fmt;

/// Errors that can occur while compiling a numeric pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The input fails structural validation: blank input, syntax the host
    /// regex engine rejects, disallowed letters or escapes, groups in user
    /// input, a decimal point directly followed by a quantifier, or a
    /// pattern with no digit-bearing content.
    InvalidPattern(String),
    /// The pattern is syntactically valid but normalization removed every
    /// element of a branch, e.g. a pattern consisting solely of `{0}`
    /// quantified elements.
    EmptyPattern(String),
    /// A recognized but unhandled combination reached a pass that defines
    /// no behavior for it, or the pattern expanded past the configured
    /// branch ceiling.
    UnsupportedConstruct(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidPattern(msg) => write!(f, "invalid pattern: {}", msg),
            PatternError::EmptyPattern(msg) => write!(f, "empty pattern: {}", msg),
            PatternError::UnsupportedConstruct(msg) => {
                write!(f, "unsupported construct: {}", msg)
            }
        }
    }
}

impl std::error::Error for PatternError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = PatternError::InvalidPattern("contains a letter".to_string());
        assert_eq!(err.to_string(), "invalid pattern: contains a letter");
    }

    #[test]
    fn variants_compare_by_content() {
        assert_eq!(
            PatternError::EmptyPattern("x".into()),
            PatternError::EmptyPattern("x".into())
        );
        assert_ne!(
            PatternError::EmptyPattern("x".into()),
            PatternError::InvalidPattern("x".into())
        );
    }
}
