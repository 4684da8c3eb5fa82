//! Versioned, self-describing binary encoding for aggregated metrics.
//!
//! `aggregated-encoding` serializes aggregated metric observations -- a metric identity, a value, a timestamp, and the
//! storage policy the value was aggregated under -- into a compact envelope that downstream tiers can decode even as
//! the schema grows. The envelope is built out of MessagePack primitives: every composite object is written as an
//! array whose length is the object's field count, preceded by a type tag, so that a decoder can skip objects it
//! doesn't understand without knowing their layout.
//!
//! The main entrypoint is [`AggregatedEncoder`], which writes envelopes to any [`std::io::Write`] sink. Failures are
//! sticky: once a write fails, every subsequent call returns the same error, without touching the sink, until the
//! encoder is [reset][AggregatedEncoder::reset] onto a new sink.
#![deny(missing_docs)]

pub mod buf;

mod config;
pub use self::config::{ConfigurationError, EncoderConfiguration};

mod encoder;
pub use self::encoder::{AggregatedEncoder, BaseEncoder, RawMetricEncoder};

mod error;
pub use self::error::EncodeError;

pub mod metric;
pub mod policy;
pub mod schema;

#[cfg(test)]
mod test_util;
