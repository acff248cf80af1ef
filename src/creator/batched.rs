use crate::command::BatchCommand;
use crate::creator::PayloadCreator;
use crate::cursor::CommandListCursor;
use crate::error::BatchResult;
use crate::io::{patch_multi_header, reserve_multi_header, PayloadWriter};
use crate::protocol::{encode_com_query, encode_com_stmt_execute, COM_MULTI};

/// All remaining commands framed as COM_MULTI sub-commands inside a single
/// transmission: one opcode byte, then one 9-byte deferred-length header per
/// command wrapping that command's own COM_QUERY/COM_STMT_EXECUTE body.
pub(crate) struct BatchedPayloadCreator;

impl PayloadCreator for BatchedPayloadCreator {
    fn create_next(
        &self,
        commands: &[BatchCommand],
        cursor: &mut CommandListCursor,
        writer: &mut PayloadWriter,
    ) -> BatchResult<()> {
        writer.write_u8(COM_MULTI)?;

        for command in &commands[cursor.command_index()..] {
            let header = reserve_multi_header(writer)?;
            if let Some(statement_id) = command.statement_id {
                encode_com_stmt_execute(writer, statement_id, &command.parameters)?;
            } else {
                encode_com_query(writer, &command.render_text()?)?;
            }
            patch_multi_header(writer, header);
            cursor.advance_command();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_every_command_in_one_transmission() {
        let commands = vec![BatchCommand::new("SELECT 1"), BatchCommand::new("SELECT 2")];
        let mut cursor = CommandListCursor::new(commands.len());
        let mut writer = PayloadWriter::with_limit(128);
        BatchedPayloadCreator
            .create_next(&commands, &mut cursor, &mut writer)
            .unwrap();
        assert!(cursor.is_exhausted());

        let bytes = writer.as_slice();
        assert_eq!(bytes[0], COM_MULTI);
        // sub-frame 1: marker + 8-byte len(9) + "\x03SELECT 1"
        assert_eq!(bytes[1], 0xFE);
        assert_eq!(&bytes[2..10], &9u64.to_le_bytes());
        assert_eq!(&bytes[10..19], b"\x03SELECT 1");
        // sub-frame 2 starts right after
        assert_eq!(bytes[19], 0xFE);
        assert_eq!(&bytes[20..28], &9u64.to_le_bytes());
        assert_eq!(&bytes[28..37], b"\x03SELECT 2");
        assert_eq!(bytes.len(), 37);
    }
}
