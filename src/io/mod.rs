//! IO module for format-specific reading and writing operations.
//!
//! - `geojson` - FeatureCollection and JSON record readers for the static inputs
//! - `source` - local-directory or HTTP data sources
//! - `svg` - SVG writing primitives for map export

mod geojson;
mod source;
pub(crate) mod svg;

pub(crate) use geojson::*;
pub use source::DataSource;
