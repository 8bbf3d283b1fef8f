//! Error types for sigmap-types.

/// Result type for parsing operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors that can occur when parsing wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unrecognized measurement kind string.
    #[error("unknown measurement kind: {0:?}")]
    UnknownKind(String),
}
