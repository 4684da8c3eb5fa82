//! Metric types.
//!
//! Aggregated metrics can be handed to the encoder in one of three forms:
//!
//! - [`Metric`], where the identity is a single contiguous byte string
//! - [`ChunkedMetric`], where the identity is split into fragments that are already materialized separately
//! - [`RawMetric`], where the metric body has already been encoded and is passed through as-is
//!
//! All three are encoded identically on the wire: as a raw metric body, carried as a single opaque byte string.
use bytes::{Bytes, BytesMut};

use crate::{encoder::RawMetricEncoder, EncodeError};

/// An aggregated metric.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    /// Metric identity.
    ///
    /// This is the pre-encoded name and tags of the metric, and is treated as opaque.
    pub id: Bytes,

    /// Timestamp of the metric, in nanoseconds.
    pub time_nanos: i64,

    /// Value of the metric.
    pub value: f64,
}

/// A metric identity split into fragments.
///
/// The identity is the concatenation of the prefix, data, and suffix, in that order, with no separators.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkedId {
    /// Identity prefix.
    pub prefix: Bytes,

    /// Identity data.
    pub data: Bytes,

    /// Identity suffix.
    pub suffix: Bytes,
}

impl ChunkedId {
    /// Gets the fragments of this identity, in order.
    pub fn chunks(&self) -> [&[u8]; 3] {
        [&self.prefix[..], &self.data[..], &self.suffix[..]]
    }

    /// Gets the total length of the identity, in bytes.
    pub fn len(&self) -> usize {
        self.prefix.len() + self.data.len() + self.suffix.len()
    }

    /// Returns `true` if the identity is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates the fragments into a single contiguous identity.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.len());
        for chunk in self.chunks() {
            buf.extend_from_slice(chunk);
        }
        buf.freeze()
    }
}

/// An aggregated metric with a chunked identity.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkedMetric {
    /// Metric identity.
    pub id: ChunkedId,

    /// Timestamp of the metric, in nanoseconds.
    pub time_nanos: i64,

    /// Value of the metric.
    pub value: f64,
}

impl ChunkedMetric {
    /// Converts this metric into a [`Metric`] by concatenating its identity.
    ///
    /// This allocates. The encoder does not need it, as chunked metrics are encoded directly from their fragments.
    pub fn to_metric(&self) -> Metric {
        Metric {
            id: self.id.to_bytes(),
            time_nanos: self.time_nanos,
            value: self.value,
        }
    }
}

/// An encoded metric body.
///
/// Raw metrics hold the encoded form of a metric -- version, field count, identity, timestamp, and value -- and are
/// written to the wire verbatim, without being decoded first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawMetric {
    data: Bytes,
}

impl RawMetric {
    /// Creates a `RawMetric` from an already-encoded metric body.
    ///
    /// The bytes are not validated.
    pub fn from_bytes(data: Bytes) -> Self {
        Self { data }
    }

    /// Creates a `RawMetric` by encoding the given metric.
    ///
    /// # Errors
    ///
    /// If the metric identity is too large to be encoded, an error is returned.
    pub fn from_metric(metric: &Metric) -> Result<Self, EncodeError> {
        let mut encoder = RawMetricEncoder::new();
        let data = encoder.encode_metric(metric)?;
        Ok(Self::from_bytes(Bytes::copy_from_slice(data)))
    }

    /// Creates a `RawMetric` by encoding the given chunked metric.
    ///
    /// The result is identical to encoding the equivalent [`Metric`].
    ///
    /// # Errors
    ///
    /// If the metric identity is too large to be encoded, an error is returned.
    pub fn from_chunked_metric(metric: &ChunkedMetric) -> Result<Self, EncodeError> {
        let mut encoder = RawMetricEncoder::new();
        let data = encoder.encode_chunked_metric(metric)?;
        Ok(Self::from_bytes(Bytes::copy_from_slice(data)))
    }

    /// Gets the encoded metric body.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the raw metric, returning the encoded metric body.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// A reference to a metric in any of its supported forms.
#[derive(Clone, Copy, Debug)]
pub enum MetricRef<'a> {
    /// A metric with a contiguous identity.
    Metric(&'a Metric),

    /// A metric with a chunked identity.
    Chunked(&'a ChunkedMetric),

    /// An already-encoded metric body.
    Raw(&'a RawMetric),
}

impl<'a> From<&'a Metric> for MetricRef<'a> {
    fn from(metric: &'a Metric) -> Self {
        Self::Metric(metric)
    }
}

impl<'a> From<&'a ChunkedMetric> for MetricRef<'a> {
    fn from(metric: &'a ChunkedMetric) -> Self {
        Self::Chunked(metric)
    }
}

impl<'a> From<&'a RawMetric> for MetricRef<'a> {
    fn from(metric: &'a RawMetric) -> Self {
        Self::Raw(metric)
    }
}
