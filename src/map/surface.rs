use geo::{Coord, MultiPolygon, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::{
    data::FeatureKey,
    style::{Legend, MarkerStyle, PathStyle},
};

/// Handle to a layer created on a [`MapSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Regions,
    Boundaries,
    Points,
}

/// Tooltip or popup content: an optional bold title and labelled rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Popup {
    pub title: Option<String>,
    pub rows: Vec<(String, String)>,
}

/// One drawable polygon feature.
#[derive(Clone, Debug)]
pub struct PolygonShape {
    pub key: FeatureKey,
    pub geometry: MultiPolygon<f64>,
    pub style: PathStyle,
    /// Permanent centered label (boundary overlay).
    pub label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Marker {
    /// (lon, lat)
    pub position: Point<f64>,
    pub style: MarkerStyle,
    pub popup: Popup,
}

#[derive(Clone, Debug)]
pub struct LayerSpec {
    pub name: String,
    pub kind: LayerKind,
    /// Non-interactive layers must never receive pointer events; surfaces
    /// enforce this on the drawn elements themselves.
    pub interactive: bool,
    pub shapes: Vec<PolygonShape>,
}

/// Draw-order target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawTarget {
    Layer(LayerId),
    Feature(LayerId, FeatureKey),
}

/// Entry of the layer-visibility control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayerToggle {
    pub name: String,
    pub layer: LayerId,
}

/// Operations the dashboard needs from a map widget.
pub trait MapSurface {
    fn add_layer(&mut self, layer: LayerSpec) -> LayerId;
    fn remove_layer(&mut self, layer: LayerId);
    fn clear_layer(&mut self, layer: LayerId);
    fn add_markers(&mut self, layer: LayerId, markers: Vec<Marker>);
    fn set_feature_style(&mut self, layer: LayerId, feature: FeatureKey, style: &PathStyle);
    fn open_tooltip(&mut self, layer: LayerId, feature: FeatureKey, content: &Popup);
    fn close_tooltip(&mut self, layer: LayerId, feature: FeatureKey);
    fn bring_to_front(&mut self, target: DrawTarget);
    fn fit_bounds(&mut self, bounds: Rect<f64>);
    /// `center` is (lon, lat).
    fn set_view(&mut self, center: Coord<f64>, zoom: u8);
    fn set_layer_control(&mut self, entries: &[LayerToggle]);
    fn set_legend(&mut self, legend: &Legend);
}
