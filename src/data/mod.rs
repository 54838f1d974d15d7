mod dataset;
mod poi;
mod region;

pub use dataset::Dataset;
pub use poi::PoiRecord;
pub use region::{AdminCode, Boundary, FeatureKey, Region};
pub(crate) use region::number_value;
