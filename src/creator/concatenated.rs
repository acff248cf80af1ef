use crate::command::BatchCommand;
use crate::creator::PayloadCreator;
use crate::cursor::CommandListCursor;
use crate::error::BatchResult;
use crate::io::PayloadWriter;
use crate::protocol::encode_com_query;

/// All remaining commands joined with `;` into one COM_QUERY text payload —
/// exactly one transmission no matter how many commands are in the batch.
/// Parameters can't be bound server-side in text-protocol mode, so each
/// command's placeholders are rendered inline as SQL literals first.
pub(crate) struct ConcatenatedPayloadCreator;

impl PayloadCreator for ConcatenatedPayloadCreator {
    fn create_next(
        &self,
        commands: &[BatchCommand],
        cursor: &mut CommandListCursor,
        writer: &mut PayloadWriter,
    ) -> BatchResult<()> {
        let mut joined = String::new();
        for command in &commands[cursor.command_index()..] {
            if !joined.is_empty() {
                joined.push(';');
            }
            joined.push_str(&command.render_text()?);
        }
        encode_com_query(writer, &joined)?;

        while !cursor.is_exhausted() {
            cursor.advance_command();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_all_remaining_commands_in_one_call() {
        let commands = vec![
            BatchCommand::new("SELECT 1"),
            BatchCommand::new("SELECT 2"),
            BatchCommand::new("SELECT 3"),
        ];
        let mut cursor = CommandListCursor::new(commands.len());
        let mut writer = PayloadWriter::with_limit(64);
        ConcatenatedPayloadCreator
            .create_next(&commands, &mut cursor, &mut writer)
            .unwrap();
        assert!(cursor.is_exhausted());
        assert_eq!(writer.as_slice(), b"\x03SELECT 1;SELECT 2;SELECT 3");
    }
}
