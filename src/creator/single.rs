use crate::command::BatchCommand;
use crate::creator::PayloadCreator;
use crate::cursor::CommandListCursor;
use crate::error::BatchResult;
use crate::io::PayloadWriter;
use crate::protocol::{encode_com_query, encode_com_stmt_execute};

/// One command, one transmission: the straightforward mapping of "batch" to
/// "N separate round trips". Matches ordinary (non-batched) MySQL wire
/// behavior, which is why S1/S2 in the scenario list expect N transmissions
/// for N commands under this creator.
pub(crate) struct SinglePayloadCreator;

impl PayloadCreator for SinglePayloadCreator {
    fn create_next(
        &self,
        commands: &[BatchCommand],
        cursor: &mut CommandListCursor,
        writer: &mut PayloadWriter,
    ) -> BatchResult<()> {
        let command = &commands[cursor.command_index()];
        if let Some(statement_id) = command.statement_id {
            encode_com_stmt_execute(writer, statement_id, &command.parameters)?;
        } else {
            encode_com_query(writer, &command.render_text()?)?;
        }
        cursor.advance_command();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_call_consumes_exactly_one_command() {
        let commands = vec![BatchCommand::new("SELECT 1"), BatchCommand::new("SELECT 2")];
        let mut cursor = CommandListCursor::new(commands.len());
        let mut writer = PayloadWriter::with_limit(64);
        SinglePayloadCreator
            .create_next(&commands, &mut cursor, &mut writer)
            .unwrap();
        assert_eq!(cursor.command_index(), 1);
        assert_eq!(writer.as_slice(), b"\x03SELECT 1");
    }
}
