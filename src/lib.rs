//! MySQL/MariaDB wire-protocol batch command execution core.
//!
//! Frames one or more SQL commands onto the wire as a single logical
//! [`Batch`], using one of three payload strategies (one round trip per
//! command, one concatenated `COM_QUERY`, or one `COM_MULTI`-framed
//! transmission), drives server-side statement preparation when asked, and
//! exposes the resulting multi-result-set response as a lazy row stream with
//! cooperative cancellation.
//!
//! This crate does not open connections, authenticate, or manage pools — it
//! expects an already-open [`Connection`] and layers batch execution on top.

mod batch;
mod cancel;
mod command;
mod creator;
mod cursor;
mod error;
mod io;
mod logging;
mod prepare;
mod protocol;
mod session;
mod validate;
mod value;

pub use batch::{Batch, BatchResultReader};
pub use cancel::CancellationToken;
pub use command::{BatchCommand, CommandBehavior, CommandKind, CommandParameter};
pub use creator::PayloadCreatorKind;
pub use error::{BatchError, BatchResult};
pub use io::{PayloadWriter, DEFAULT_PAYLOAD_LIMIT};
pub use session::{Connection, ConnectionState, IoBehavior};
pub use value::{MySqlValue, Row};
