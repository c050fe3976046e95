//! Alert error types.

/// Reasons an alert pattern cannot be compiled.
#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("Invalid regex pattern: {0}")]
    Compile(#[from] regex::Error),

    /// The pattern matches the empty string and would highlight endlessly.
    #[error("Pattern matches the empty string")]
    MatchesEmpty,
}
