use byteorder::{ByteOrder, LittleEndian};

use crate::command::CommandParameter;
use crate::error::BatchResult;
use crate::io::PayloadWriter;
use crate::protocol::COM_STMT_EXECUTE;

const CURSOR_TYPE_NO_CURSOR: u8 = 0;
const ITERATION_COUNT: u32 = 1;
const NEW_PARAMS_BOUND: u8 = 1;
const PARAM_UNSIGNED_FLAG: u8 = 0x80;

/// Writes a COM_STMT_EXECUTE payload for a prepared statement: the opcode,
/// statement id, cursor type, iteration count, and — when the statement
/// takes parameters — the null bitmap, parameter type list, and the binary
/// parameter values themselves.
/// https://dev.mysql.com/doc/dev/mysql-server/8.0.12/page_protocol_com_stmt_execute.html
pub fn encode_com_stmt_execute(
    writer: &mut PayloadWriter,
    statement_id: u32,
    params: &[CommandParameter],
) -> BatchResult<()> {
    writer.write_u8(COM_STMT_EXECUTE)?;

    let mut header = [0u8; 4];
    LittleEndian::write_u32(&mut header, statement_id);
    writer.write(&header)?;

    writer.write_u8(CURSOR_TYPE_NO_CURSOR)?;

    let mut iterations = [0u8; 4];
    LittleEndian::write_u32(&mut iterations, ITERATION_COUNT);
    writer.write(&iterations)?;

    if params.is_empty() {
        return Ok(());
    }

    writer.write(&null_bitmap(params))?;
    writer.write_u8(NEW_PARAMS_BOUND)?;

    for param in params {
        let flag = if param.value.is_unsigned() {
            PARAM_UNSIGNED_FLAG
        } else {
            0
        };
        writer.write(&[param.value.type_byte(), flag])?;
    }

    let mut values = Vec::new();
    for param in params {
        param.value.encode_binary(&mut values);
    }
    writer.write(&values)?;

    Ok(())
}

/// `byte<(param_count + 7) / 8>`, one bit per parameter, set iff that
/// parameter's value is NULL.
fn null_bitmap(params: &[CommandParameter]) -> Vec<u8> {
    let mut bitmap = vec![0u8; (params.len() + 7) / 8];
    for (i, param) in params.iter().enumerate() {
        if param.value.is_null() {
            bitmap[i / 8] |= 1 << (i % 8);
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::MySqlValue;

    #[test]
    fn no_params_writes_fixed_header_only() {
        let mut writer = PayloadWriter::with_limit(64);
        encode_com_stmt_execute(&mut writer, 7, &[]).unwrap();
        assert_eq!(
            writer.as_slice(),
            &[0x17, 7, 0, 0, 0, CURSOR_TYPE_NO_CURSOR, 1, 0, 0, 0]
        );
    }

    #[test]
    fn null_param_sets_bitmap_bit_and_writes_no_value_bytes() {
        let params = vec![CommandParameter {
            name: "p0".into(),
            value: MySqlValue::Null,
        }];
        let mut writer = PayloadWriter::with_limit(64);
        encode_com_stmt_execute(&mut writer, 1, &params).unwrap();
        let bytes = writer.as_slice();
        // header(10) + bitmap(1) + new_params_bound(1) + type+flag(2) = 14, no value bytes
        assert_eq!(bytes.len(), 14);
        assert_eq!(bytes[10], 0b0000_0001);
        assert_eq!(bytes[11], 1);
        assert_eq!(bytes[12], 0x06); // MYSQL_TYPE_NULL
    }
}
