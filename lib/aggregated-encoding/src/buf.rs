//! Buffers.
use std::io;

use bytes::Bytes;

/// A byte buffer with a fixed maximum size.
///
/// `BoundedBuffer` starts out with a given capacity and grows as needed, but never beyond its limit: a write that would
/// take the buffer past its limit is rejected in its entirety, and leaves the buffer unchanged. This makes it suitable
/// as an encoder sink that must not grow without bound, such as when building size-limited payloads.
///
/// The buffer must be cleared to be reused once full.
#[derive(Debug)]
pub struct BoundedBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl BoundedBuffer {
    /// Creates a new `BoundedBuffer` with the given initial capacity and size limit.
    ///
    /// The initial capacity is capped at the limit.
    pub fn new(initial_capacity: usize, limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(initial_capacity.min(limit)),
            limit,
        }
    }

    /// Creates a new `BoundedBuffer` with the given size limit, allocating the full limit upfront.
    pub fn with_limit(limit: usize) -> Self {
        Self::new(limit, limit)
    }

    /// Gets the size limit of the buffer, in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Gets the number of bytes written to the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written to the buffer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the number of bytes that can still be written before reaching the limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.data.len()
    }

    /// Gets the bytes written to the buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Clears the buffer, keeping its allocated capacity.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Consumes the buffer, returning the written bytes.
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.data)
    }
}

impl AsRef<[u8]> for BoundedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl io::Write for BoundedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!(
                    "buffer limit reached (limit: {}, len: {}, write: {})",
                    self.limit,
                    self.data.len(),
                    buf.len()
                ),
            ));
        }

        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
