use std::{io, mem, time::Duration};

use snafu::ResultExt as _;

use crate::{
    error::{value_write_io_error, DurationOverflow, LengthOverflow, Write},
    metric::ChunkedId,
    policy::{Resolution, ResolutionValue, Retention, RetentionValue, StoragePolicy},
    schema::ObjectType,
    EncodeError,
};

/// Primitive encoder.
///
/// Writes MessagePack primitives -- integers, floats, byte strings, and array headers -- to the underlying writer, and
/// builds the shared composite objects (field count headers, object type tags, storage policies) on top of them.
///
/// ## Failure handling
///
/// Every operation returns its result directly, but the first failure is also recorded: once an operation has failed,
/// all subsequent operations return a clone of that same error without touching the writer. The only way to clear the
/// error is to [`reset`][Self::reset] the encoder onto a new writer.
pub struct BaseEncoder<W> {
    writer: W,
    error: Option<EncodeError>,
}

impl<W> BaseEncoder<W>
where
    W: io::Write,
{
    /// Creates a new `BaseEncoder` that writes to the given writer.
    pub fn new(writer: W) -> Self {
        Self { writer, error: None }
    }

    /// Gets a reference to the underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes the encoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Gets the recorded error, if any operation has failed since the encoder was created or last reset.
    pub fn error(&self) -> Option<&EncodeError> {
        self.error.as_ref()
    }

    /// Rebinds the encoder to the given writer, clearing any recorded error.
    ///
    /// The previous writer is returned, including anything partially written to it.
    pub fn reset(&mut self, writer: W) -> W {
        self.error = None;
        mem::replace(&mut self.writer, writer)
    }

    /// Returns the recorded error, if there is one.
    ///
    /// # Errors
    ///
    /// If an operation has previously failed, a clone of the recorded error is returned.
    pub fn check(&self) -> Result<(), EncodeError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn record<T>(&mut self, result: Result<T, EncodeError>) -> Result<T, EncodeError> {
        if let Err(e) = &result {
            self.error = Some(e.clone());
        }
        result
    }

    /// Encodes a signed integer, using the smallest representation that fits the value.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, or the writer fails, an error is returned.
    pub fn encode_varint(&mut self, value: i64) -> Result<(), EncodeError> {
        self.check()?;
        let result = rmp::encode::write_sint(&mut self.writer, value)
            .map(|_| ())
            .map_err(value_write_io_error)
            .context(Write { field: "varint" });
        self.record(result)
    }

    /// Encodes a 64-bit floating-point number.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, or the writer fails, an error is returned.
    pub fn encode_float64(&mut self, value: f64) -> Result<(), EncodeError> {
        self.check()?;
        let result = rmp::encode::write_f64(&mut self.writer, value)
            .map_err(value_write_io_error)
            .context(Write { field: "float64" });
        self.record(result)
    }

    /// Encodes a byte string, prefixed with its length.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, the byte string is too long, or the writer fails, an error is returned.
    pub fn encode_bytes(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        self.encode_bytes_len(data.len())?;
        self.write_raw(data)
    }

    /// Encodes the length prefix of a byte string.
    ///
    /// Exactly `len` bytes must be written with [`write_raw`][Self::write_raw] afterwards.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, the length is too large, or the writer fails, an error is returned.
    pub fn encode_bytes_len(&mut self, len: usize) -> Result<(), EncodeError> {
        self.check()?;
        let result = match u32::try_from(len) {
            Ok(len) => rmp::encode::write_bin_len(&mut self.writer, len)
                .map(|_| ())
                .map_err(value_write_io_error)
                .context(Write { field: "bytes length" }),
            Err(_) => LengthOverflow { field: "bytes", len }.fail(),
        };
        self.record(result)
    }

    /// Writes raw bytes as-is.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, or the writer fails, an error is returned.
    pub fn write_raw(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        self.check()?;
        let result = self.writer.write_all(data).context(Write { field: "raw bytes" });
        self.record(result)
    }

    /// Encodes an array header announcing that `len` fields follow.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, or the writer fails, an error is returned.
    pub fn encode_array_len(&mut self, len: u32) -> Result<(), EncodeError> {
        self.check()?;
        let result = rmp::encode::write_array_len(&mut self.writer, len)
            .map(|_| ())
            .map_err(value_write_io_error)
            .context(Write { field: "array length" });
        self.record(result)
    }

    /// Encodes a version number.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, or the writer fails, an error is returned.
    pub fn encode_version(&mut self, version: i64) -> Result<(), EncodeError> {
        self.encode_varint(version)
    }

    /// Encodes the field count header for the given object type.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, or the writer fails, an error is returned.
    pub fn encode_num_object_fields(&mut self, object_type: ObjectType) -> Result<(), EncodeError> {
        self.encode_array_len(object_type.num_fields())
    }

    /// Encodes the type tag for the given object type.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, or the writer fails, an error is returned.
    pub fn encode_object_type(&mut self, object_type: ObjectType) -> Result<(), EncodeError> {
        self.encode_varint(object_type.tag())
    }

    /// Encodes a chunked identity as a single byte string, without concatenating its fragments first.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, the identity is too long, or the writer fails, an error is returned.
    pub fn encode_chunked_id(&mut self, id: &ChunkedId) -> Result<(), EncodeError> {
        self.encode_bytes_len(id.len())?;
        for chunk in id.chunks() {
            self.write_raw(chunk)?;
        }
        Ok(())
    }

    /// Encodes a storage policy.
    ///
    /// # Errors
    ///
    /// If the encoder has previously failed, a duration in the policy is too large, or the writer fails, an error is
    /// returned.
    pub fn encode_storage_policy(&mut self, policy: &StoragePolicy) -> Result<(), EncodeError> {
        self.encode_num_object_fields(ObjectType::StoragePolicy)?;
        self.encode_resolution(&policy.resolution())?;
        self.encode_retention(&policy.retention())
    }

    fn encode_resolution(&mut self, resolution: &Resolution) -> Result<(), EncodeError> {
        // Known resolutions are encoded as their value alone.
        if let Some(value) = ResolutionValue::from_resolution(resolution) {
            self.encode_num_object_fields(ObjectType::KnownResolution)?;
            self.encode_object_type(ObjectType::KnownResolution)?;
            return self.encode_varint(value.as_i64());
        }

        self.encode_num_object_fields(ObjectType::UnknownResolution)?;
        self.encode_object_type(ObjectType::UnknownResolution)?;
        self.encode_duration("resolution window", resolution.window())?;
        self.encode_varint(resolution.precision().as_i64())
    }

    fn encode_retention(&mut self, retention: &Retention) -> Result<(), EncodeError> {
        if let Some(value) = RetentionValue::from_retention(retention) {
            self.encode_num_object_fields(ObjectType::KnownRetention)?;
            self.encode_object_type(ObjectType::KnownRetention)?;
            return self.encode_varint(value.as_i64());
        }

        self.encode_num_object_fields(ObjectType::UnknownRetention)?;
        self.encode_object_type(ObjectType::UnknownRetention)?;
        self.encode_duration("retention period", retention.period())
    }

    fn encode_duration(&mut self, field: &'static str, duration: Duration) -> Result<(), EncodeError> {
        self.check()?;
        let nanos = duration.as_nanos();
        match i64::try_from(nanos) {
            Ok(nanos) => self.encode_varint(nanos),
            Err(_) => {
                let result = DurationOverflow { field, nanos }.fail();
                self.record(result)
            }
        }
    }
}
