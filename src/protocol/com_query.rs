use crate::error::BatchResult;
use crate::io::PayloadWriter;
use crate::protocol::COM_QUERY;

/// Writes a COM_QUERY payload: the opcode followed by the raw UTF-8 SQL text.
/// https://dev.mysql.com/doc/dev/mysql-server/8.0.12/page_protocol_com_query.html
pub fn encode_com_query(writer: &mut PayloadWriter, sql: &str) -> BatchResult<()> {
    writer.write_u8(COM_QUERY)?;
    writer.write(sql.as_bytes())
}
