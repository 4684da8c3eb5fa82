mod aggregated;
pub use self::aggregated::AggregatedEncoder;

mod base;
pub use self::base::BaseEncoder;

mod raw;
pub use self::raw::RawMetricEncoder;
