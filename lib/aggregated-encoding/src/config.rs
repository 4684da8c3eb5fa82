use bytesize::ByteSize;
use serde::Deserialize;
use snafu::{ensure, Snafu};

use crate::{buf::BoundedBuffer, AggregatedEncoder};

const fn default_initial_buffer_capacity() -> ByteSize {
    ByteSize::kib(4)
}

const fn default_max_buffer_size() -> ByteSize {
    ByteSize::mib(1)
}

/// Configuration error.
#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
pub enum ConfigurationError {
    /// The initial buffer capacity is larger than the maximum buffer size.
    #[snafu(display(
        "initial buffer capacity ({}) exceeds maximum buffer size ({})",
        initial_buffer_capacity,
        max_buffer_size
    ))]
    InvalidBufferSize {
        /// Configured initial buffer capacity.
        initial_buffer_capacity: ByteSize,

        /// Configured maximum buffer size.
        max_buffer_size: ByteSize,
    },
}

/// Encoder configuration.
///
/// Controls the sizing of the buffers that encoders built from this configuration write to.
#[derive(Clone, Debug, Deserialize)]
pub struct EncoderConfiguration {
    /// Initial capacity of encoder buffers.
    ///
    /// Defaults to 4KiB.
    #[serde(default = "default_initial_buffer_capacity")]
    initial_buffer_capacity: ByteSize,

    /// Maximum size of encoder buffers.
    ///
    /// Once a buffer reaches this size, further encoding fails until the encoder is reset onto a new buffer.
    ///
    /// Defaults to 1MiB.
    #[serde(default = "default_max_buffer_size")]
    max_buffer_size: ByteSize,
}

impl Default for EncoderConfiguration {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: default_initial_buffer_capacity(),
            max_buffer_size: default_max_buffer_size(),
        }
    }
}

impl EncoderConfiguration {
    /// Gets the initial capacity of encoder buffers.
    pub fn initial_buffer_capacity(&self) -> ByteSize {
        self.initial_buffer_capacity
    }

    /// Gets the maximum size of encoder buffers.
    pub fn max_buffer_size(&self) -> ByteSize {
        self.max_buffer_size
    }

    /// Creates a new buffer sized according to this configuration.
    ///
    /// # Errors
    ///
    /// If the configured initial buffer capacity exceeds the maximum buffer size, an error is returned.
    pub fn new_buffer(&self) -> Result<BoundedBuffer, ConfigurationError> {
        ensure!(
            self.initial_buffer_capacity <= self.max_buffer_size,
            InvalidBufferSize {
                initial_buffer_capacity: self.initial_buffer_capacity,
                max_buffer_size: self.max_buffer_size,
            }
        );

        Ok(BoundedBuffer::new(
            self.initial_buffer_capacity.as_u64() as usize,
            self.max_buffer_size.as_u64() as usize,
        ))
    }

    /// Builds an encoder that writes to a new buffer sized according to this configuration.
    ///
    /// # Errors
    ///
    /// If the configured initial buffer capacity exceeds the maximum buffer size, an error is returned.
    pub fn build(&self) -> Result<AggregatedEncoder<BoundedBuffer>, ConfigurationError> {
        self.new_buffer().map(AggregatedEncoder::new)
    }
}
