//! Wire schema constants.
//!
//! The values in this module are the compatibility contract with independent decoders: changing any of them is a
//! breaking change to the wire format.

/// Version of the aggregated envelope.
pub const AGGREGATED_VERSION: i64 = 1;

/// Version of the raw metric body.
pub const METRIC_VERSION: i64 = 1;

/// Object type.
///
/// Each object type identifies a distinct object shape on the wire, and maps to a fixed number of fields via
/// [`ObjectType::num_fields`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ObjectType {
    /// Unknown object type.
    Unknown = 0,

    /// Root envelope object, wrapping a type tag and the tagged object.
    RootObject = 1,

    /// Raw metric with a storage policy.
    RawMetricWithStoragePolicy = 2,

    /// Metric body: identity, timestamp, and value.
    Metric = 3,

    /// Storage policy: resolution and retention.
    StoragePolicy = 4,

    /// Resolution matching one of the known resolution values.
    KnownResolution = 5,

    /// Resolution not matching any known resolution value.
    UnknownResolution = 6,

    /// Retention matching one of the known retention values.
    KnownRetention = 7,

    /// Retention not matching any known retention value.
    UnknownRetention = 8,

    /// Raw metric with a storage policy and the time it was encoded at.
    RawMetricWithStoragePolicyAndEncodeTime = 9,
}

impl ObjectType {
    /// All object types, in tag order.
    pub const ALL: [ObjectType; 10] = [
        Self::Unknown,
        Self::RootObject,
        Self::RawMetricWithStoragePolicy,
        Self::Metric,
        Self::StoragePolicy,
        Self::KnownResolution,
        Self::UnknownResolution,
        Self::KnownRetention,
        Self::UnknownRetention,
        Self::RawMetricWithStoragePolicyAndEncodeTime,
    ];

    /// Gets the tag written on the wire for this object type.
    pub const fn tag(self) -> i64 {
        self as i64
    }

    /// Gets the object type for the given wire tag, if it is known.
    pub fn from_tag(tag: i64) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.tag() == tag)
    }

    /// Gets the number of fields in the encoded form of this object type.
    ///
    /// The count covers every field of the object, including the type tag for objects that carry one, and counts a
    /// nested object as a single field.
    pub const fn num_fields(self) -> u32 {
        match self {
            Self::Unknown => 0,
            // Type tag, object.
            Self::RootObject => 2,
            // Raw metric, storage policy.
            Self::RawMetricWithStoragePolicy => 2,
            // ID, time, value.
            Self::Metric => 3,
            // Resolution, retention.
            Self::StoragePolicy => 2,
            // Type tag, resolution value.
            Self::KnownResolution => 2,
            // Type tag, window, precision.
            Self::UnknownResolution => 3,
            // Type tag, retention value.
            Self::KnownRetention => 2,
            // Type tag, duration.
            Self::UnknownRetention => 2,
            // Raw metric, storage policy, encode time.
            Self::RawMetricWithStoragePolicyAndEncodeTime => 3,
        }
    }
}
