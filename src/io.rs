//! C1: the Payload Writer.
//!
//! A growable byte buffer with stable absolute positions, used to frame
//! outbound command payloads. The deferred-length-patching pattern (reserve a
//! placeholder, write the body, go back and patch the placeholder) only works
//! because positions returned by [`PayloadWriter::position`] stay valid for
//! the lifetime of one `write_query` call: we never do anything that would
//! invalidate earlier slices, such as draining from the front.

use crate::error::{BatchError, BatchResult};

/// Width, in bytes, of a COM_MULTI sub-command header: one marker byte
/// (`0xFE`) followed by an 8-byte little-endian length.
pub const MULTI_HEADER_LEN: usize = 9;

const MULTI_HEADER_MARKER: u8 = 0xFE;

/// Default hard ceiling on a single payload, matching a generous single
/// packet's worth of headroom. Callers may pick a smaller limit via
/// [`PayloadWriter::with_limit`].
pub const DEFAULT_PAYLOAD_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Debug)]
pub struct PayloadWriter {
    buf: Vec<u8>,
    limit: usize,
}

impl PayloadWriter {
    pub fn with_limit(limit: usize) -> Self {
        PayloadWriter {
            buf: Vec::new(),
            limit,
        }
    }

    /// Absolute position one past the last byte written so far.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Appends `bytes` to the buffer, failing if doing so would exceed the
    /// configured hard limit.
    pub fn write(&mut self, bytes: &[u8]) -> BatchResult<()> {
        if self.buf.len() + bytes.len() > self.limit {
            return Err(BatchError::BufferOverflow { limit: self.limit });
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, byte: u8) -> BatchResult<()> {
        self.write(&[byte])
    }

    /// A mutable view of everything from `position` to the current end,
    /// for patching a previously reserved header in place.
    pub fn slice_from_mut(&mut self, position: usize) -> &mut [u8] {
        &mut self.buf[position..]
    }

    /// Discards the last `n` bytes written. Used to drop the trailing
    /// placeholder reserved for a COM_MULTI sub-command that never
    /// materialized (invariant 2, §8).
    pub fn trim_end(&mut self, n: usize) {
        let new_len = self.buf.len().saturating_sub(n);
        self.buf.truncate(new_len);
    }

    /// Clears the buffer for reuse across successive round trips of a
    /// `Single`-backed batch, keeping the configured limit.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Reserves a 9-byte COM_MULTI sub-command header at the writer's current
/// position and returns that position so the caller can patch it later.
pub fn reserve_multi_header(writer: &mut PayloadWriter) -> BatchResult<usize> {
    let position = writer.position();
    writer.write(&[0u8; MULTI_HEADER_LEN])?;
    Ok(position)
}

/// Patches a header previously reserved by [`reserve_multi_header`] with the
/// marker byte and the little-endian length of everything written since.
pub fn patch_multi_header(writer: &mut PayloadWriter, header_position: usize) {
    let end = writer.position();
    let inner_len = (end - header_position - MULTI_HEADER_LEN) as u64;
    let slot = writer.slice_from_mut(header_position);
    slot[0] = MULTI_HEADER_MARKER;
    slot[1..MULTI_HEADER_LEN].copy_from_slice(&inner_len.to_le_bytes());
}
