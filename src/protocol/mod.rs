//! Wire-level opcodes and payload encoders for the three command shapes this
//! core produces: COM_QUERY, COM_STMT_EXECUTE, and the COM_MULTI framing
//! wrapper.

mod com_query;
mod com_stmt_execute;

pub use com_query::encode_com_query;
pub use com_stmt_execute::encode_com_stmt_execute;

/// https://dev.mysql.com/doc/dev/mysql-server/8.0.12/page_protocol_com_query.html
pub const COM_QUERY: u8 = 0x03;

/// https://dev.mysql.com/doc/dev/mysql-server/8.0.12/page_protocol_com_stmt_prepare.html
pub const COM_STMT_PREPARE: u8 = 0x16;

/// https://dev.mysql.com/doc/dev/mysql-server/8.0.12/page_protocol_com_stmt_execute.html
pub const COM_STMT_EXECUTE: u8 = 0x17;

/// MariaDB bulk-execution extension (`CommandKind.Multi`). Not a real
/// upstream MySQL opcode; see `original_source` for provenance — this core
/// treats it as an opaque tag byte it must reproduce bit-exactly.
pub const COM_MULTI: u8 = 0x1e;
