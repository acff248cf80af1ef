//! Error and Result types for the batch command execution core.

use std::fmt;

/// A specialized `Result` type for this crate.
pub type BatchResult<T> = Result<T, BatchError>;

/// Everything that can go wrong while building, validating, or driving a [`crate::Batch`].
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The batch was used after [`crate::Batch::dispose`] was called on it.
    #[error("batch has already been disposed")]
    ObjectDisposed,

    /// A pre-execution or pre-prepare guard from §4.7 failed.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The batch asked for something this core does not implement (preparing a
    /// non-text command, or a `CloseConnection` command behavior).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The external cancellation token registered via [`crate::cancel::CancellationToken`]
    /// fired while a read was in progress.
    #[error("batch execution was cancelled")]
    Cancelled,

    /// The session reported a framing or payload anomaly. Not recovered here;
    /// the connection should be considered poisoned by the caller.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Transport failure surfaced verbatim from the session.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The Payload Writer's configured hard limit was exceeded.
    #[error("payload buffer overflow: write would exceed the {limit}-byte limit")]
    BufferOverflow { limit: usize },
}

impl BatchError {
    pub(crate) fn invalid_operation(message: impl Into<String>) -> Self {
        BatchError::InvalidOperation(message.into())
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        BatchError::Unsupported(message.into())
    }
}

/// Helper for anomalies that don't fit neatly elsewhere in a `Display` chain.
pub(crate) fn protocol(message: impl fmt::Display) -> BatchError {
    BatchError::Protocol(message.to_string())
}
