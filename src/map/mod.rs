//! Map rendering: the surface abstraction, the layer renderer, pointer
//! interaction and an SVG-backed surface.

mod index;
mod interaction;
mod renderer;
mod surface;
mod svg;

pub use interaction::{Interaction, MapEvent};
pub use renderer::{region_tooltip, MapRenderer, BOUNDARY_LAYER_NAME, POI_LAYER_NAME, REGION_LAYER_NAME};
pub use surface::{DrawTarget, LayerId, LayerKind, LayerSpec, LayerToggle, MapSurface, Marker, PolygonShape, Popup};
pub use svg::SvgMapSurface;
