//! C3 — Prepared-Statement Coordinator.
//!
//! Assigns server-side statement ids to commands that ask for them, reusing
//! an id across commands in the same batch that share identical text so a
//! `Batch` built from e.g. the same parameterized INSERT repeated N times
//! only prepares once.

use std::collections::HashMap;

use crate::command::BatchCommand;
use crate::error::BatchResult;
use crate::session::Connection;

/// Per-batch cache from command text to the statement id the server handed
/// back for it. Deliberately not shared across batches: a longer-lived cache
/// would need eviction and invalidation-on-schema-change, both out of scope
/// here (see `SPEC_FULL.md` Non-goals).
#[derive(Debug, Default)]
pub(crate) struct StatementCache {
    by_text: HashMap<String, u32>,
}

impl StatementCache {
    pub(crate) fn new() -> Self {
        StatementCache::default()
    }
}

/// Walks `commands` in order, preparing each one that isn't already prepared
/// and hasn't already been prepared this call under identical text, and
/// stamping `statement_id` in place.
pub(crate) async fn prepare_batch(
    connection: &mut dyn Connection,
    commands: &mut [BatchCommand],
    cache: &mut StatementCache,
) -> BatchResult<()> {
    if connection.ignore_prepare() {
        return Ok(());
    }

    for command in commands.iter_mut() {
        if command.statement_id.is_some() {
            continue;
        }
        if let Some(&statement_id) = cache.by_text.get(&command.text) {
            command.statement_id = Some(statement_id);
            continue;
        }
        let statement_id = connection.prepare(&command.text).await?;
        cache.by_text.insert(command.text.clone(), statement_id);
        command.statement_id = Some(statement_id);
    }
    Ok(())
}
