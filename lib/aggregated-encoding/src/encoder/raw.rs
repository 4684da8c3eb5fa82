use crate::{
    metric::{ChunkedMetric, Metric, MetricRef},
    schema::{ObjectType, METRIC_VERSION},
    BaseEncoder, EncodeError,
};

/// Raw metric encoder.
///
/// Flattens metrics into their raw form: a standalone metric body consisting of the metric version, the field count,
/// the identity, the timestamp, and the value. Encoding happens into an internal scratch buffer, which is reused
/// across calls.
#[derive(Debug, Default)]
pub struct RawMetricEncoder {
    buf: Vec<u8>,
}

impl RawMetricEncoder {
    /// Creates a new `RawMetricEncoder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `RawMetricEncoder` whose scratch buffer can hold at least `capacity` bytes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Encodes the given metric, returning the encoded metric body.
    ///
    /// # Errors
    ///
    /// If the metric identity is too large to be encoded, an error is returned.
    pub fn encode_metric(&mut self, metric: &Metric) -> Result<&[u8], EncodeError> {
        self.buf.clear();

        let mut encoder = BaseEncoder::new(&mut self.buf);
        encode_metric_prolog(&mut encoder)?;
        encoder.encode_bytes(&metric.id)?;
        encoder.encode_varint(metric.time_nanos)?;
        encoder.encode_float64(metric.value)?;

        Ok(&self.buf[..])
    }

    /// Encodes the given chunked metric, returning the encoded metric body.
    ///
    /// The identity fragments are written one after the other, so the result is identical to encoding a [`Metric`]
    /// whose identity is the concatenation of the fragments.
    ///
    /// # Errors
    ///
    /// If the metric identity is too large to be encoded, an error is returned.
    pub fn encode_chunked_metric(&mut self, metric: &ChunkedMetric) -> Result<&[u8], EncodeError> {
        self.buf.clear();

        let mut encoder = BaseEncoder::new(&mut self.buf);
        encode_metric_prolog(&mut encoder)?;
        encoder.encode_chunked_id(&metric.id)?;
        encoder.encode_varint(metric.time_nanos)?;
        encoder.encode_float64(metric.value)?;

        Ok(&self.buf[..])
    }

    /// Flattens the given metric into its encoded metric body.
    ///
    /// Raw metrics are already encoded, and are returned as-is.
    ///
    /// # Errors
    ///
    /// If the metric identity is too large to be encoded, an error is returned.
    pub fn flatten<'s, 'a: 's>(&'s mut self, metric: MetricRef<'a>) -> Result<&'s [u8], EncodeError> {
        match metric {
            MetricRef::Metric(metric) => self.encode_metric(metric),
            MetricRef::Chunked(metric) => self.encode_chunked_metric(metric),
            MetricRef::Raw(metric) => Ok(metric.as_bytes()),
        }
    }
}

fn encode_metric_prolog<W: std::io::Write>(encoder: &mut BaseEncoder<W>) -> Result<(), EncodeError> {
    encoder.encode_version(METRIC_VERSION)?;
    encoder.encode_num_object_fields(ObjectType::Metric)
}
