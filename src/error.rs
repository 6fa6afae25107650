/// Error type for this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EqualizerError {
    /// A constructor rejected the supplied parameters.
    ///
    /// Raised synchronously at construction, never afterwards.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Re-entrant mutation of limiter state was detected.
    ///
    /// Unreachable while the crate's locking discipline holds; kept in the
    /// taxonomy so callers can match on it exhaustively.
    #[error("concurrency violation: re-entrant state mutation")]
    ConcurrencyViolation,
}

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, EqualizerError>;
