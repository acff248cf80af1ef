//! C7 — Validation & State Guards.
//!
//! Centralizes the precondition checks every entry point into [`crate::batch::Batch`]
//! must run before touching the connection, so the guard logic lives in one
//! place instead of being re-checked ad hoc at each call site. Order matches
//! §4.7: first failure wins.

use crate::command::{BatchCommand, CommandKind};
use crate::error::{BatchError, BatchResult};
use crate::session::{Connection, ConnectionState};

/// Guards run before [`crate::batch::Batch::execute_reader`] touches the
/// connection: state must be `Open` or `Connecting`, the batch's bound
/// transaction (if any) must match the connection's current one unless the
/// connection opts out, the command list must be non-empty, and every
/// command must pass its own per-command validation.
pub(crate) fn validate_for_execute(
    connection: &dyn Connection,
    batch_transaction: Option<u64>,
    commands: &[BatchCommand],
) -> BatchResult<()> {
    match connection.state() {
        ConnectionState::Open | ConnectionState::Connecting => {}
        ConnectionState::Closed => return Err(BatchError::ObjectDisposed),
    }

    if !connection.ignore_command_transaction()
        && batch_transaction != connection.current_transaction_id()
    {
        return Err(BatchError::invalid_operation(
            "batch transaction does not match the connection's current transaction",
        ));
    }

    if commands.is_empty() {
        return Err(BatchError::invalid_operation(
            "a batch must contain at least one command",
        ));
    }
    for command in commands {
        command.validate()?;
    }
    Ok(())
}

/// Guards run before the Prepared-Statement Coordinator touches the
/// connection: state must be strictly `Open`, and every command must be a
/// kind this core knows how to prepare.
pub(crate) fn validate_for_prepare(
    connection: &dyn Connection,
    commands: &[BatchCommand],
) -> BatchResult<()> {
    if connection.state() != ConnectionState::Open {
        return Err(BatchError::invalid_operation(
            "cannot prepare statements unless the connection is open",
        ));
    }
    for command in commands {
        match command.kind {
            CommandKind::Text => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::BoxFuture;

    struct FakeConnection {
        state: ConnectionState,
        transaction_id: Option<u64>,
        ignore_transaction: bool,
    }

    impl Connection for FakeConnection {
        fn state(&self) -> ConnectionState {
            self.state
        }

        fn supports_com_multi(&self) -> bool {
            false
        }

        fn current_transaction_id(&self) -> Option<u64> {
            self.transaction_id
        }

        fn ignore_command_transaction(&self) -> bool {
            self.ignore_transaction
        }

        fn ignore_prepare(&self) -> bool {
            false
        }

        fn transmit<'c>(&'c mut self, _payload: &'c [u8]) -> BoxFuture<'c, BatchResult<()>> {
            unimplemented!()
        }

        fn read_row<'c>(
            &'c mut self,
        ) -> BoxFuture<'c, BatchResult<Option<crate::value::Row>>> {
            unimplemented!()
        }

        fn advance_result_set<'c>(&'c mut self) -> BoxFuture<'c, BatchResult<bool>> {
            unimplemented!()
        }

        fn rows_affected(&self) -> u64 {
            0
        }

        fn prepare<'c>(&'c mut self, _sql: &'c str) -> BoxFuture<'c, BatchResult<u32>> {
            unimplemented!()
        }
    }

    fn open_connection() -> FakeConnection {
        FakeConnection {
            state: ConnectionState::Open,
            transaction_id: None,
            ignore_transaction: false,
        }
    }

    #[test]
    fn rejects_empty_command_list() {
        let connection = open_connection();
        let result = validate_for_execute(&connection, None, &[]);
        assert!(matches!(result, Err(BatchError::InvalidOperation(_))));
    }

    #[test]
    fn rejects_closed_connection() {
        let mut connection = open_connection();
        connection.state = ConnectionState::Closed;
        let commands = vec![BatchCommand::new("SELECT 1")];
        let result = validate_for_execute(&connection, None, &commands);
        assert!(matches!(result, Err(BatchError::ObjectDisposed)));
    }

    #[test]
    fn rejects_transaction_mismatch() {
        let mut connection = open_connection();
        connection.transaction_id = Some(7);
        let commands = vec![BatchCommand::new("SELECT 1")];
        let result = validate_for_execute(&connection, None, &commands);
        assert!(matches!(result, Err(BatchError::InvalidOperation(_))));
    }

    #[test]
    fn ignore_command_transaction_skips_the_mismatch_guard() {
        let mut connection = open_connection();
        connection.transaction_id = Some(7);
        connection.ignore_transaction = true;
        let commands = vec![BatchCommand::new("SELECT 1")];
        assert!(validate_for_execute(&connection, None, &commands).is_ok());
    }

    #[test]
    fn accepts_well_formed_batch() {
        let connection = open_connection();
        let commands = vec![BatchCommand::new("SELECT 1")];
        assert!(validate_for_execute(&connection, None, &commands).is_ok());
    }
}
