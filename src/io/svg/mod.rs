//! SVG format writing operations for map export.

mod path;
mod writer;

pub(crate) use path::*;
pub(crate) use writer::*;
