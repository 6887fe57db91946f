use thiserror::Error;

/// Failure kinds surfaced by the protocol engine.
///
/// Every error other than `InvalidState` is fatal to the session that
/// produced it: the session moves to its failed state and rejects all
/// further operations. Error messages never contain secret material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JpakeError {
    /// A caller-supplied value is syntactically or semantically out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was invoked outside its permitted source state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A cryptographic check failed.
    #[error("verification failed: {0}")]
    VerificationError(String),

    /// An invariant was violated inside this library.
    #[error("internal error: {0}")]
    Internal(String),
}
