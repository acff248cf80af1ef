//! C5 — Batch Executor, and C6 — Result Reader Driver.

use crate::cancel::{next_command_id, CancellationToken};
use crate::command::BatchCommand;
use crate::creator::{PayloadCreator, PayloadCreatorKind};
use crate::cursor::CommandListCursor;
use crate::error::{BatchError, BatchResult};
use crate::io::{PayloadWriter, DEFAULT_PAYLOAD_LIMIT};
use crate::logging::BatchLogger;
use crate::prepare::{prepare_batch, StatementCache};
use crate::session::{Connection, IoBehavior};
use crate::validate::{validate_for_execute, validate_for_prepare};
use crate::value::MySqlValue;

/// A list of commands plus the wire-framing strategy to execute them with.
/// Built once via [`Batch::new`]/[`Batch::add_command`], then driven through
/// [`Batch::execute_reader`] (or one of the convenience wrappers) any number
/// of times until [`Batch::dispose`] is called.
pub struct Batch<'a, C: Connection> {
    connection: &'a mut C,
    commands: Vec<BatchCommand>,
    transaction: Option<u64>,
    prepare: bool,
    payload_limit: usize,
    cache: StatementCache,
    cancel_token: Option<CancellationToken>,
    disposed: bool,
}

impl<'a, C: Connection> Batch<'a, C> {
    pub fn new(connection: &'a mut C) -> Self {
        Batch {
            connection,
            commands: Vec::new(),
            transaction: None,
            prepare: false,
            payload_limit: DEFAULT_PAYLOAD_LIMIT,
            cache: StatementCache::new(),
            cancel_token: None,
            disposed: false,
        }
    }

    /// Binds this batch to a transaction id; §4.7 guard 4 then requires it
    /// to match the connection's current transaction unless the connection
    /// sets `ignore_command_transaction`.
    pub fn with_transaction(mut self, transaction: u64) -> Self {
        self.transaction = Some(transaction);
        self
    }

    pub fn with_payload_limit(mut self, limit: usize) -> Self {
        self.payload_limit = limit;
        self
    }

    /// Causes [`Batch::execute_reader`] to run every command through the
    /// Prepared-Statement Coordinator (C3) before framing, rather than
    /// sending each command as plain text.
    pub fn with_prepared_statements(mut self) -> Self {
        self.prepare = true;
        self
    }

    pub fn add_command(mut self, command: BatchCommand) -> Self {
        self.commands.push(command);
        self
    }

    /// Registers a cancellation token this batch's in-flight reads will poll.
    /// §C4: idempotent per batch — calling this more than once replaces the
    /// previous registration rather than stacking them.
    pub fn register_cancel(&mut self) -> CancellationToken {
        let token = CancellationToken::new(next_command_id());
        self.cancel_token = Some(token.clone());
        token
    }

    pub fn cancel_attempt_count(&self) -> u64 {
        self.cancel_token
            .as_ref()
            .map(CancellationToken::attempt_count)
            .unwrap_or(0)
    }

    /// Marks this batch unusable. Idempotent; subsequent calls into any
    /// execute method return [`BatchError::ObjectDisposed`].
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    fn ensure_not_disposed(&self) -> BatchResult<()> {
        if self.disposed {
            Err(BatchError::ObjectDisposed)
        } else {
            Ok(())
        }
    }

    fn summary(&self) -> String {
        match self.commands.first() {
            Some(first) if self.commands.len() == 1 => first.text.clone(),
            Some(first) => format!("{} (+{} more)", first.text, self.commands.len() - 1),
            None => String::new(),
        }
    }

    /// Validates, optionally prepares, and opens a [`BatchResultReader`] over
    /// this batch's commands. While the reader is alive it holds the sole
    /// `&mut` borrow of the underlying connection — the borrow checker is
    /// what actually enforces "a Batch is inaccessible while its Result
    /// Reader is open" (§ invariant), not any runtime bookkeeping here.
    pub async fn execute_reader(&mut self) -> BatchResult<BatchResultReader<'_, C>> {
        self.ensure_not_disposed()?;
        validate_for_execute(&*self.connection, self.transaction, &self.commands)?;

        if self.prepare {
            validate_for_prepare(&*self.connection, &self.commands)?;
            prepare_batch(self.connection, &mut self.commands, &mut self.cache).await?;
        }

        // §4.5 step 4 / §8 invariant 4: COM_MULTI whenever the server
        // supports it, otherwise Single if every command already carries a
        // prepared statement id, otherwise Concatenated.
        let all_prepared = self.commands.iter().all(BatchCommand::is_prepared);
        let creator_kind = if self.connection.supports_com_multi() {
            PayloadCreatorKind::Batched
        } else if all_prepared {
            PayloadCreatorKind::Single
        } else {
            PayloadCreatorKind::Concatenated
        };
        let creator = creator_kind.select();
        let cursor = CommandListCursor::new(self.commands.len());
        let logger = BatchLogger::new(self.summary());

        Ok(BatchResultReader {
            connection: self.connection,
            commands: self.commands.clone(),
            creator,
            cursor,
            writer: PayloadWriter::with_limit(self.payload_limit),
            cancel_token: self.cancel_token.clone(),
            logger,
            at_transmission_start: true,
            total_rows_affected: 0,
        })
    }

    /// Drains every row of every result set and returns the total rows
    /// affected, for commands that produce no rows a caller cares about
    /// (INSERT/UPDATE/DELETE).
    pub async fn execute_non_query(&mut self) -> BatchResult<u64> {
        let mut reader = self.execute_reader().await?;
        while reader.next_row().await?.is_some() {}
        Ok(reader.total_rows_affected())
    }

    /// Returns column 0 of the first row of the first result set, draining
    /// the rest of the response so the connection is left ready for the next
    /// batch.
    pub async fn execute_scalar(&mut self) -> BatchResult<Option<MySqlValue>> {
        let mut reader = self.execute_reader().await?;
        let mut scalar = None;
        while let Some(row) = reader.next_row().await? {
            if scalar.is_none() {
                scalar = row.get(0).cloned();
            }
        }
        Ok(scalar)
    }

    pub fn execute_reader_blocking(&mut self) -> BatchResult<BatchResultReader<'_, C>> {
        futures_executor::block_on(self.execute_reader())
    }

    pub fn execute_non_query_blocking(&mut self) -> BatchResult<u64> {
        futures_executor::block_on(self.execute_non_query())
    }

    pub fn execute_scalar_blocking(&mut self) -> BatchResult<Option<MySqlValue>> {
        futures_executor::block_on(self.execute_scalar())
    }
}

/// Drives the nested "sequence of result sets, each a sequence of rows"
/// stream produced by a [`Batch`]. Exhausts the inner row sequence before
/// ever advancing the outer one, and transmits the next wire payload (per
/// the active [`PayloadCreator`]) only once the cursor says there's more to
/// send — so a `Single`-backed batch issues one round trip per `next_row`
/// stall, while `Concatenated`/`Batched` issue exactly one.
pub struct BatchResultReader<'a, C: Connection> {
    connection: &'a mut C,
    commands: Vec<BatchCommand>,
    creator: Box<dyn PayloadCreator>,
    cursor: CommandListCursor,
    writer: PayloadWriter,
    cancel_token: Option<CancellationToken>,
    logger: BatchLogger,
    at_transmission_start: bool,
    total_rows_affected: u64,
}

impl<'a, C: Connection> BatchResultReader<'a, C> {
    pub async fn next_row(&mut self) -> BatchResult<Option<crate::value::Row>> {
        loop {
            if let Some(token) = &self.cancel_token {
                if token.is_cancelled() {
                    return Err(BatchError::Cancelled);
                }
            }

            if self.at_transmission_start {
                if self.cursor.is_exhausted() {
                    return Ok(None);
                }
                self.writer.reset();
                self.creator
                    .create_next(&self.commands, &mut self.cursor, &mut self.writer)?;
                self.connection.transmit(self.writer.as_slice()).await?;
                self.logger.increment_command();
                self.at_transmission_start = false;
            }

            if let Some(row) = self.connection.read_row().await? {
                self.logger.add_rows_returned(1);
                return Ok(Some(row));
            }

            let affected = self.connection.rows_affected();
            self.total_rows_affected += affected;
            self.logger.add_rows_affected(affected);

            if self.connection.advance_result_set().await? {
                continue;
            }

            self.at_transmission_start = true;
        }
    }

    pub fn total_rows_affected(&self) -> u64 {
        self.total_rows_affected
    }
}
