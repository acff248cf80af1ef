//! The seam between this core and whatever actually owns the socket.
//!
//! The core is always `async fn`/[`BoxFuture`]-based internally, matching how
//! sqlx-core's own `Connection`/`Executor` traits are shaped; synchronous
//! callers go through [`crate::batch::Batch::execute_reader_blocking`] and
//! friends, which drive the same futures with `futures_executor::block_on`
//! (Open Question (c), see `SPEC_FULL.md` §10.4).
//!
//! `Connection` owns the result-reading state machine directly rather than
//! handing back a separate cursor/reader object: a result set doesn't outlive
//! the connection that produced it, so there is nothing a split-out type
//! would buy beyond a self-referential borrow this core would rather not
//! model.

use futures_util::future::BoxFuture;

use crate::error::BatchResult;
use crate::value::Row;

/// Whether a caller is driving this batch from a synchronous or an
/// asynchronous context. Threaded through purely for logging (§10.2) — it
/// does not change which code path runs, since the core itself never forks
/// its implementation on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoBehavior {
    Synchronous,
    Asynchronous,
}

/// Lifecycle state a [`Connection`] implementation is expected to report
/// accurately; the Validation Guards (C7) consult this before every
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// What the Batch Executor and Result Reader Driver need from a live
/// connection: send a framed payload, then step through whatever result sets
/// and rows come back.
///
/// Intentionally thin — this core does not own connection setup, auth, or
/// TLS, only the batch-execution path layered on top of an already-open one.
pub trait Connection: Send {
    fn state(&self) -> ConnectionState;

    /// Whether the server this connection is talking to understands the
    /// MariaDB `COM_MULTI` bulk-framing extension. Drives the Batch
    /// Executor's creator-selection rule (§4.5/§8 invariant 4).
    fn supports_com_multi(&self) -> bool;

    /// The transaction id the connection currently considers itself bound
    /// to, if any. `None` means "no open transaction".
    fn current_transaction_id(&self) -> Option<u64>;

    /// When set, the transaction-binding guard (§4.7 guard 4) is skipped.
    fn ignore_command_transaction(&self) -> bool;

    /// When set, the Prepared-Statement Coordinator becomes a no-op: guards
    /// still run, but no `COM_STMT_PREPARE` is ever transmitted.
    fn ignore_prepare(&self) -> bool;

    /// Sends a fully framed payload (as produced by a [`crate::creator`]) and
    /// waits for the server to acknowledge it, positioning the connection at
    /// the first result set of the response.
    fn transmit<'c>(&'c mut self, payload: &'c [u8]) -> BoxFuture<'c, BatchResult<()>>;

    /// Reads the next row of the current result set, or `None` once it's
    /// exhausted.
    fn read_row<'c>(&'c mut self) -> BoxFuture<'c, BatchResult<Option<Row>>>;

    /// Advances past the current (exhausted) result set to the next one in
    /// this transmission. Returns `false` once there are no more.
    ///
    /// Callers must fully drain a result set's rows via `read_row` before
    /// calling this — the Result Reader Driver enforces that ordering, not
    /// this trait.
    fn advance_result_set<'c>(&'c mut self) -> BoxFuture<'c, BatchResult<bool>>;

    /// Rows affected by the statement that produced the current result set.
    fn rows_affected(&self) -> u64;

    /// Prepares `sql` server-side, returning the statement id the Prepared-
    /// Statement Coordinator (C3) will reference from then on.
    fn prepare<'c>(&'c mut self, sql: &'c str) -> BoxFuture<'c, BatchResult<u32>>;
}
