//! A surface that records every drawing call as a serialisable command.
//!
//! Used as the test double for the dashboard, and as the bridge to browser
//! front-ends, which replay the drained commands against real widgets.

use geo::{Coord, LineString, MultiPolygon, Rect};
use serde::Serialize;

use crate::{
    chart::{BarChart, ChartSurface, ChartTarget},
    data::FeatureKey,
    detail::DetailView,
    filter::FilterOptions,
    map::{DrawTarget, LayerId, LayerKind, LayerSpec, LayerToggle, MapSurface, Marker, Popup},
    panel::{PanelSurface, StatusMessage},
    stats::KpiDisplay,
    style::{Legend, MarkerStyle, PathStyle},
};

/// GeoJSON-style polygon coordinates: polygons, rings, `[lon, lat]` positions.
pub type Coordinates = Vec<Vec<Vec<[f64; 2]>>>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeCommand {
    pub key: FeatureKey,
    pub coordinates: Coordinates,
    pub style: PathStyle,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerCommand {
    /// `[lon, lat]`
    pub position: [f64; 2],
    pub style: MarkerStyle,
    pub popup: Popup,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    AddLayer { layer: LayerId, name: String, kind: LayerKind, interactive: bool, shapes: Vec<ShapeCommand> },
    RemoveLayer { layer: LayerId },
    ClearLayer { layer: LayerId },
    AddMarkers { layer: LayerId, markers: Vec<MarkerCommand> },
    SetFeatureStyle { layer: LayerId, feature: FeatureKey, style: PathStyle },
    OpenTooltip { layer: LayerId, feature: FeatureKey, content: Popup },
    CloseTooltip { layer: LayerId, feature: FeatureKey },
    BringToFront { target: DrawTarget },
    /// `[[west, south], [east, north]]`
    FitBounds { bounds: [[f64; 2]; 2] },
    /// `center` is `[lat, lon]`, the order map widgets take.
    SetView { center: [f64; 2], zoom: u8 },
    SetLayerControl { entries: Vec<LayerToggle> },
    SetLegend { legend: Legend },
    Plot { target: ChartTarget, chart: BarChart },
    SetFilterOptions { options: FilterOptions },
    SetStatus { status: StatusMessage },
    SetKpis { kpis: KpiDisplay },
    SetDetail { detail: DetailView },
}

/// Records commands in call order until drained.
#[derive(Debug, Default)]
pub struct CommandLog {
    next_layer: u32,
    commands: Vec<SurfaceCommand>,
}

impl CommandLog {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn commands(&self) -> &[SurfaceCommand] { &self.commands }

    /// Take the recorded commands, leaving the log empty. Layer ids keep counting.
    pub fn drain(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }
}

fn ring_coords(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.0.iter().map(|c| [c.x, c.y]).collect()
}

fn coordinates(geometry: &MultiPolygon<f64>) -> Coordinates {
    geometry.0.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(ring_coords)
                .collect()
        })
        .collect()
}

impl MapSurface for CommandLog {
    fn add_layer(&mut self, layer: LayerSpec) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;

        let shapes = layer.shapes.into_iter()
            .map(|shape| ShapeCommand {
                key: shape.key,
                coordinates: coordinates(&shape.geometry),
                style: shape.style,
                label: shape.label,
            })
            .collect();
        self.commands.push(SurfaceCommand::AddLayer {
            layer: id,
            name: layer.name,
            kind: layer.kind,
            interactive: layer.interactive,
            shapes,
        });
        id
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.commands.push(SurfaceCommand::RemoveLayer { layer });
    }

    fn clear_layer(&mut self, layer: LayerId) {
        self.commands.push(SurfaceCommand::ClearLayer { layer });
    }

    fn add_markers(&mut self, layer: LayerId, markers: Vec<Marker>) {
        let markers = markers.into_iter()
            .map(|m| MarkerCommand { position: [m.position.x(), m.position.y()], style: m.style, popup: m.popup })
            .collect();
        self.commands.push(SurfaceCommand::AddMarkers { layer, markers });
    }

    fn set_feature_style(&mut self, layer: LayerId, feature: FeatureKey, style: &PathStyle) {
        self.commands.push(SurfaceCommand::SetFeatureStyle { layer, feature, style: style.clone() });
    }

    fn open_tooltip(&mut self, layer: LayerId, feature: FeatureKey, content: &Popup) {
        self.commands.push(SurfaceCommand::OpenTooltip { layer, feature, content: content.clone() });
    }

    fn close_tooltip(&mut self, layer: LayerId, feature: FeatureKey) {
        self.commands.push(SurfaceCommand::CloseTooltip { layer, feature });
    }

    fn bring_to_front(&mut self, target: DrawTarget) {
        self.commands.push(SurfaceCommand::BringToFront { target });
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        let (min, max) = (bounds.min(), bounds.max());
        self.commands.push(SurfaceCommand::FitBounds { bounds: [[min.x, min.y], [max.x, max.y]] });
    }

    fn set_view(&mut self, center: Coord<f64>, zoom: u8) {
        self.commands.push(SurfaceCommand::SetView { center: [center.y, center.x], zoom });
    }

    fn set_layer_control(&mut self, entries: &[LayerToggle]) {
        self.commands.push(SurfaceCommand::SetLayerControl { entries: entries.to_vec() });
    }

    fn set_legend(&mut self, legend: &Legend) {
        self.commands.push(SurfaceCommand::SetLegend { legend: legend.clone() });
    }
}

impl ChartSurface for CommandLog {
    fn plot(&mut self, target: ChartTarget, chart: &BarChart) {
        self.commands.push(SurfaceCommand::Plot { target, chart: chart.clone() });
    }
}

impl PanelSurface for CommandLog {
    fn set_filter_options(&mut self, options: &FilterOptions) {
        self.commands.push(SurfaceCommand::SetFilterOptions { options: options.clone() });
    }

    fn set_status(&mut self, status: &StatusMessage) {
        self.commands.push(SurfaceCommand::SetStatus { status: status.clone() });
    }

    fn set_kpis(&mut self, kpis: &KpiDisplay) {
        self.commands.push(SurfaceCommand::SetKpis { kpis: kpis.clone() });
    }

    fn set_detail(&mut self, view: &DetailView) {
        self.commands.push(SurfaceCommand::SetDetail { detail: view.clone() });
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Coord, MultiPolygon};

    use super::{CommandLog, SurfaceCommand};
    use crate::{
        map::{LayerKind, LayerSpec, MapSurface, PolygonShape},
        style::PathStyle,
    };

    #[test]
    fn allocates_layer_ids_across_drains() {
        let mut log = CommandLog::new();
        let spec = || LayerSpec { name: "x".into(), kind: LayerKind::Points, interactive: true, shapes: Vec::new() };
        let a = log.add_layer(spec());
        assert_eq!(log.drain().len(), 1);
        let b = log.add_layer(spec());
        assert_ne!(a, b);
        assert_eq!(log.commands().len(), 1);
    }

    #[test]
    fn serialises_geometry_as_geojson_coordinates() {
        let mut log = CommandLog::new();
        let geometry = MultiPolygon(vec![polygon![(x: 1.0, y: 2.0), (x: 3.0, y: 2.0), (x: 3.0, y: 4.0)]]);
        log.add_layer(LayerSpec {
            name: "regions".into(),
            kind: LayerKind::Regions,
            interactive: true,
            shapes: vec![PolygonShape { key: 5, geometry, style: PathStyle::boundary(), label: None }],
        });
        log.set_view(Coord { x: 99.5, y: 2.0 }, 8);

        let json = serde_json::to_value(log.commands()).unwrap();
        assert_eq!(json[0]["op"], "add_layer");
        assert_eq!(json[0]["shapes"][0]["coordinates"][0][0][0], serde_json::json!([1.0, 2.0]));
        assert_eq!(json[0]["shapes"][0]["style"]["fillColor"], "transparent");
        assert_eq!(json[1]["center"], serde_json::json!([2.0, 99.5]));
        assert!(matches!(log.commands()[1], SurfaceCommand::SetView { zoom: 8, .. }));
    }
}
