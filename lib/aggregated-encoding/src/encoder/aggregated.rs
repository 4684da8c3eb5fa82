use std::io;

use tracing::{debug, trace};

use crate::{
    metric::MetricRef,
    policy::StoragePolicy,
    schema::{ObjectType, AGGREGATED_VERSION},
    BaseEncoder, EncodeError, RawMetricEncoder,
};

/// Aggregated metric encoder.
///
/// Encodes aggregated metrics, along with the storage policy they were aggregated under, into versioned envelopes:
///
/// ```text
/// Envelope := Version [2] ObjectTypeTag Object
/// ```
///
/// where the object is a raw metric with its storage policy and, optionally, the time at which the envelope was
/// encoded. Each envelope is appended to the underlying writer.
///
/// Metrics can be given as a [`Metric`][crate::metric::Metric], a [`ChunkedMetric`][crate::metric::ChunkedMetric],
/// or a [`RawMetric`][crate::metric::RawMetric]. The first two are flattened into a raw metric body before being
/// written, and the latter is written as-is.
///
/// ## Failure handling
///
/// When a write to the underlying writer fails, the encoder records the error and stops writing. Every subsequent
/// encode call returns that same error, without doing any work, until the encoder is reset with
/// [`reset`][Self::reset]. Whatever was written to the writer for the envelope that failed is incomplete, and must be
/// discarded by the caller.
pub struct AggregatedEncoder<W> {
    base: BaseEncoder<W>,
    raw: RawMetricEncoder,
}

impl<W> AggregatedEncoder<W>
where
    W: io::Write,
{
    /// Creates a new `AggregatedEncoder` that writes to the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            base: BaseEncoder::new(writer),
            raw: RawMetricEncoder::new(),
        }
    }

    /// Gets a reference to the underlying writer.
    pub fn writer(&self) -> &W {
        self.base.writer()
    }

    /// Consumes the encoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.base.into_inner()
    }

    /// Gets the error that put the encoder into a failed state, if any.
    pub fn error(&self) -> Option<&EncodeError> {
        self.base.error()
    }

    /// Rebinds the encoder to the given writer, clearing any error.
    ///
    /// The previous writer is returned to the caller. After a reset, the encoder behaves exactly like a newly created
    /// encoder for the given writer.
    pub fn reset(&mut self, writer: W) -> W {
        if let Some(e) = self.base.error() {
            debug!(error = %e, "Resetting encoder in failed state.");
        } else {
            trace!("Resetting encoder.");
        }

        self.base.reset(writer)
    }

    /// Encodes a metric with the given storage policy.
    ///
    /// # Errors
    ///
    /// If the encoder is in a failed state, the error that caused it is returned. Otherwise, if the metric cannot be
    /// flattened or writing to the underlying writer fails, an error is returned.
    pub fn encode_metric_with_policy<'a, M>(&mut self, metric: M, policy: &StoragePolicy) -> Result<(), EncodeError>
    where
        M: Into<MetricRef<'a>>,
    {
        self.base.check()?;

        let data = self.raw.flatten(metric.into())?;

        let object_type = ObjectType::RawMetricWithStoragePolicy;
        encode_root_object(&mut self.base, object_type)?;
        self.base.encode_num_object_fields(object_type)?;
        self.base.encode_bytes(data)?;
        self.base.encode_storage_policy(policy)?;

        trace!(raw_metric_len = data.len(), %policy, "Encoded metric with storage policy.");

        Ok(())
    }

    /// Encodes a metric with the given storage policy, and the time at which it was encoded.
    ///
    /// # Errors
    ///
    /// If the encoder is in a failed state, the error that caused it is returned. Otherwise, if the metric cannot be
    /// flattened or writing to the underlying writer fails, an error is returned.
    pub fn encode_metric_with_policy_and_encode_time<'a, M>(
        &mut self, metric: M, policy: &StoragePolicy, encoded_at_nanos: i64,
    ) -> Result<(), EncodeError>
    where
        M: Into<MetricRef<'a>>,
    {
        self.base.check()?;

        let data = self.raw.flatten(metric.into())?;

        let object_type = ObjectType::RawMetricWithStoragePolicyAndEncodeTime;
        encode_root_object(&mut self.base, object_type)?;
        self.base.encode_num_object_fields(object_type)?;
        self.base.encode_bytes(data)?;
        self.base.encode_storage_policy(policy)?;
        self.base.encode_varint(encoded_at_nanos)?;

        trace!(
            raw_metric_len = data.len(),
            %policy,
            encoded_at_nanos,
            "Encoded metric with storage policy and encode time."
        );

        Ok(())
    }
}

fn encode_root_object<W: io::Write>(base: &mut BaseEncoder<W>, object_type: ObjectType) -> Result<(), EncodeError> {
    base.encode_version(AGGREGATED_VERSION)?;
    base.encode_num_object_fields(ObjectType::RootObject)?;
    base.encode_object_type(object_type)
}
