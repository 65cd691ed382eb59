//! Error types for the rules engine

use thiserror::Error;

/// Rules engine errors
///
/// Only construction paths fail: builder calls, context constructors, and
/// rule-set deserialization reject malformed definitions immediately. Query
/// paths never error — an unknown or blank query input simply denies.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for rules operations
pub type Result<T> = std::result::Result<T, RulesError>;
