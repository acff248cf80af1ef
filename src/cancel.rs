//! C4 — Cancellation Registry.
//!
//! Cancellation here is cooperative: nothing interrupts an in-flight read.
//! Instead, a shared flag is polled at suspension points (between rows,
//! between result sets) and the read loop bails out with
//! [`crate::error::BatchError::Cancelled`] the next time it checks. Scope is
//! managed with a guard so a `Batch` can never outlive its own registration
//! without unregistering — the drop glue is the unregister.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_COMMAND_ID: AtomicU64 = AtomicU64::new(1);

/// Assigns a process-wide-unique id to a batch for the lifetime of one
/// cancellation registration. Monotonic, never reused.
pub(crate) fn next_command_id() -> u64 {
    NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Default)]
struct CancelState {
    requested: AtomicBool,
    attempts: AtomicU64,
}

/// A handle a caller holds to request cancellation of whatever batch
/// registered it. Cloning and sending across threads is fine; the flag it
/// flips is shared.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<CancelState>,
    command_id: u64,
}

impl CancellationToken {
    pub(crate) fn new(command_id: u64) -> Self {
        CancellationToken {
            state: Arc::new(CancelState::default()),
            command_id,
        }
    }

    /// Requests cancellation of the registered batch. Idempotent; each call
    /// after the first still counts toward `attempt_count`.
    pub fn cancel(&self) {
        self.state.requested.store(true, Ordering::SeqCst);
        self.state.attempts.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.requested.load(Ordering::SeqCst)
    }

    pub fn attempt_count(&self) -> u64 {
        self.state.attempts.load(Ordering::SeqCst)
    }

    pub fn command_id(&self) -> u64 {
        self.command_id
    }

    pub(crate) fn guard(&self) -> CancelGuard {
        CancelGuard {
            token: self.clone(),
        }
    }
}

/// RAII handle returned by `Batch::register_cancel`. Dropping it (whether the
/// batch disposes normally or unwinds) unregisters the token; there is
/// nothing to unregister from here beyond dropping the shared `Arc`, since
/// this registry has no external table — the token *is* the registration.
pub(crate) struct CancelGuard {
    token: CancellationToken,
}

impl CancelGuard {
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_idempotent_but_counts_every_attempt() {
        let token = CancellationToken::new(next_command_id());
        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.attempt_count(), 2);
    }

    #[test]
    fn command_ids_are_monotonic() {
        let a = next_command_id();
        let b = next_command_id();
        assert!(b > a);
    }
}
