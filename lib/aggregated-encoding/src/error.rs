use std::{io, sync::Arc};

use snafu::Snafu;

/// Encode error.
///
/// Errors are cheaply cloneable so that an encoder in a failed state can hand back the original error on every call.
/// Clones share the same underlying source.
#[derive(Clone, Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum EncodeError {
    /// The sink rejected a write.
    #[snafu(display("failed to write {} to sink: {}", field, source))]
    Write {
        /// Field being written when the failure occurred.
        field: &'static str,

        /// Underlying I/O error.
        #[snafu(source(from(io::Error, Arc::new)))]
        source: Arc<io::Error>,
    },

    /// A length-prefixed value was too large to be encoded.
    #[snafu(display("length of {} ({} bytes) exceeds the maximum encodable length", field, len))]
    LengthOverflow {
        /// Field being written.
        field: &'static str,

        /// Length of the value, in bytes.
        len: usize,
    },

    /// A duration was too large to be encoded as signed 64-bit nanoseconds.
    #[snafu(display("{} of {}ns exceeds the maximum encodable duration", field, nanos))]
    DurationOverflow {
        /// Field being written.
        field: &'static str,

        /// Duration, in nanoseconds.
        nanos: u128,
    },
}

impl EncodeError {
    /// Returns `true` if both errors are the same error value.
    ///
    /// Two errors are the same if one is a clone of the other. Two distinct write failures are never the same, even if
    /// they describe identical failures.
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Write { source: a, .. }, Self::Write { source: b, .. }) => Arc::ptr_eq(a, b),
            (Self::LengthOverflow { field: fa, len: la }, Self::LengthOverflow { field: fb, len: lb }) => {
                fa == fb && la == lb
            }
            (Self::DurationOverflow { field: fa, nanos: na }, Self::DurationOverflow { field: fb, nanos: nb }) => {
                fa == fb && na == nb
            }
            _ => false,
        }
    }
}

/// Flattens a MessagePack value write error into the I/O error that caused it.
pub(crate) fn value_write_io_error(e: rmp::encode::ValueWriteError<io::Error>) -> io::Error {
    match e {
        rmp::encode::ValueWriteError::InvalidMarkerWrite(e) | rmp::encode::ValueWriteError::InvalidDataWrite(e) => e,
    }
}
