//! C2 — Command Payload Creator.
//!
//! Three strategies for turning a command list into wire transmissions. Each
//! variant decides, per call to [`PayloadCreator::create_next`], how many
//! commands one transmission covers and advances the shared cursor to match.
//! The Batch Executor (C5) doesn't need to know which variant it's driving;
//! it just keeps calling `create_next` until the cursor reports exhausted.

mod batched;
mod concatenated;
mod single;

use crate::command::BatchCommand;
use crate::cursor::CommandListCursor;
use crate::error::BatchResult;
use crate::io::PayloadWriter;

/// Which wire-framing strategy a [`crate::Batch`] uses to transmit its
/// commands. Chosen once, at batch construction, and fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadCreatorKind {
    /// One command per wire round trip (COM_QUERY or COM_STMT_EXECUTE).
    Single,
    /// All commands joined with `;` into a single COM_QUERY text payload.
    /// Parameters are rendered as SQL literals since COM_QUERY carries no
    /// binary parameter slots.
    Concatenated,
    /// All commands framed as COM_MULTI sub-commands inside one
    /// transmission.
    Batched,
}

impl PayloadCreatorKind {
    pub(crate) fn select(self) -> Box<dyn PayloadCreator> {
        match self {
            PayloadCreatorKind::Single => Box::new(single::SinglePayloadCreator),
            PayloadCreatorKind::Concatenated => Box::new(concatenated::ConcatenatedPayloadCreator),
            PayloadCreatorKind::Batched => Box::new(batched::BatchedPayloadCreator),
        }
    }
}

/// Writes exactly one wire transmission's worth of payload for the commands
/// still remaining at `cursor`, advancing `cursor` past whatever it consumed.
pub(crate) trait PayloadCreator {
    fn create_next(
        &self,
        commands: &[BatchCommand],
        cursor: &mut CommandListCursor,
        writer: &mut PayloadWriter,
    ) -> BatchResult<()>;
}
