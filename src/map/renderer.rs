use ahash::AHashSet;
use geo::{Coord, Point};
use tracing::{debug, warn};

use crate::{
    config::DashboardConfig,
    data::{Dataset, FeatureKey, PoiRecord, Region},
    filter::FilterSelection,
    style::{Legend, MarkerStyle, PathStyle},
};
use super::{
    index::{union_bounds, usable_bounds, RegionIndex},
    surface::{DrawTarget, LayerId, LayerKind, LayerSpec, LayerToggle, MapSurface, Marker, PolygonShape, Popup},
};

pub const REGION_LAYER_NAME: &str = "Peta Komoditas Unggulan";
pub const BOUNDARY_LAYER_NAME: &str = "Batas Kabupaten/Kota";
pub const POI_LAYER_NAME: &str = "POI Fasilitas Keuangan";

/// Owns the layer handles of the current redraw and rebuilds them on demand.
#[derive(Debug, Default)]
pub struct MapRenderer {
    regions: Option<LayerId>,
    boundaries: Option<LayerId>,
    points: Option<LayerId>,
    drawn: AHashSet<FeatureKey>,
    index: RegionIndex,
}

impl MapRenderer {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn region_layer(&self) -> Option<LayerId> { self.regions }

    #[inline] pub fn boundary_layer(&self) -> Option<LayerId> { self.boundaries }

    #[inline] pub fn point_layer(&self) -> Option<LayerId> { self.points }

    /// Whether `feature` is drawn in the current region layer `layer`.
    pub fn is_current(&self, layer: LayerId, feature: FeatureKey) -> bool {
        self.regions == Some(layer) && self.drawn.contains(&feature)
    }

    /// Topmost drawn region at `point` (lon, lat).
    pub fn pick(&self, data: &Dataset, point: Point<f64>) -> Option<FeatureKey> {
        self.index.pick(point, |key| data.region(key).and_then(|r| r.geometry.as_ref()))
    }

    /// Record that `feature` was brought to the front, so [`Self::pick`] follows the drawn order.
    pub fn raise(&mut self, feature: FeatureKey) {
        self.index.raise(feature);
    }

    /// Rebuild every layer for a new filtered set. `selection` must be normalized.
    pub fn redraw(
        &mut self,
        surface: &mut impl MapSurface,
        data: &Dataset,
        filtered: &[FeatureKey],
        selection: &FilterSelection,
        config: &DashboardConfig,
    ) {
        if let Some(layer) = self.regions.take() { surface.remove_layer(layer) }
        if let Some(layer) = self.boundaries.take() { surface.remove_layer(layer) }

        let points = *self.points.get_or_insert_with(|| surface.add_layer(LayerSpec {
            name: POI_LAYER_NAME.into(),
            kind: LayerKind::Points,
            interactive: true,
            shapes: Vec::new(),
        }));
        surface.clear_layer(points);

        let shapes: Vec<PolygonShape> = filtered.iter()
            .filter_map(|&key| {
                let region = data.region(key)?;
                let geometry = region.geometry.clone()?;
                Some(PolygonShape { key, geometry, style: PathStyle::region(region, config), label: None })
            })
            .collect();
        self.index = RegionIndex::new(shapes.iter().map(|s| (s.key, &s.geometry)));
        self.drawn = filtered.iter().copied().collect();
        let bounds = usable_bounds(union_bounds(shapes.iter().map(|s| &s.geometry)));

        self.regions = Some(surface.add_layer(LayerSpec {
            name: REGION_LAYER_NAME.into(),
            kind: LayerKind::Regions,
            interactive: true,
            shapes,
        }));

        self.boundaries = draw_boundaries(surface, data, &selection.areas);

        let markers = poi_markers(data, filtered, config);
        debug!("[map.redraw] {} regions, {} markers", filtered.len(), markers.len());
        surface.add_markers(points, markers);

        match bounds {
            Some(bounds) => surface.fit_bounds(bounds),
            None => {
                if !filtered.is_empty() { warn!("[map.redraw] no usable bounds; using default view") }
                let [lat, lon] = config.view.center;
                surface.set_view(Coord { x: lon, y: lat }, config.view.zoom);
            }
        }

        surface.set_layer_control(&self.toggles());
        surface.set_legend(&Legend::commodities(config));
        self.restack(surface, config);
    }

    fn toggles(&self) -> Vec<LayerToggle> {
        [(POI_LAYER_NAME, self.points), (BOUNDARY_LAYER_NAME, self.boundaries), (REGION_LAYER_NAME, self.regions)]
            .into_iter()
            .filter_map(|(name, layer)| Some(LayerToggle { name: name.into(), layer: layer? }))
            .collect()
    }

    /// Enforce the layer order: regions and boundaries in the configured order, points on top.
    pub fn restack(&self, surface: &mut impl MapSurface, config: &DashboardConfig) {
        let (lower, upper) = if config.style.boundary_above_regions {
            (self.regions, self.boundaries)
        } else {
            (self.boundaries, self.regions)
        };
        for layer in [lower, upper, self.points].into_iter().flatten() {
            surface.bring_to_front(DrawTarget::Layer(layer));
        }
    }

    /// Re-raise the overlays above a feature that was just brought to the front,
    /// keeping boundary strokes (when drawn above) and POIs visible.
    pub fn raise_overlays(&self, surface: &mut impl MapSurface, config: &DashboardConfig) {
        if config.style.boundary_above_regions {
            if let Some(layer) = self.boundaries { surface.bring_to_front(DrawTarget::Layer(layer)) }
        }
        if let Some(layer) = self.points { surface.bring_to_front(DrawTarget::Layer(layer)) }
    }
}

/// Boundary overlay restricted to the selected areas (all when none), outline-only,
/// labelled and non-interactive. `None` when no boundary dataset is loaded.
fn draw_boundaries(surface: &mut impl MapSurface, data: &Dataset, areas: &[String]) -> Option<LayerId> {
    let boundaries = data.boundaries()?;

    let shapes = boundaries.iter().enumerate()
        .filter(|(_, b)| areas.is_empty() || b.area.as_ref().is_some_and(|a| areas.contains(a)))
        .filter_map(|(key, b)| Some(PolygonShape {
            key,
            geometry: b.geometry.clone()?,
            style: PathStyle::boundary(),
            label: Some(b.area.clone().unwrap_or_else(|| "Kabupaten/Kota".into())),
        }))
        .collect();

    Some(surface.add_layer(LayerSpec {
        name: BOUNDARY_LAYER_NAME.into(),
        kind: LayerKind::Boundaries,
        interactive: false,
        shapes,
    }))
}

/// Markers for POIs with valid coordinates, restricted to the visible villages
/// when the records carry the linkage field.
fn poi_markers(data: &Dataset, filtered: &[FeatureKey], config: &DashboardConfig) -> Vec<Marker> {
    if filtered.is_empty() { return Vec::new() }

    let visible: AHashSet<&str> = filtered.iter()
        .filter_map(|&key| data.region(key)?.village.as_deref())
        .collect();

    let mut skipped = 0usize;
    let markers: Vec<Marker> = data.points().iter()
        .filter(|poi| poi.village.as_deref().is_none_or(|v| visible.contains(v)))
        .filter_map(|poi| {
            let position = poi.position();
            if position.is_none() { skipped += 1 }
            Some(Marker { position: position?, style: MarkerStyle::poi(config), popup: poi_popup(poi) })
        })
        .collect();

    if skipped > 0 { warn!("[map.poi] skipped {skipped} POIs with invalid coordinates") }
    markers
}

fn poi_popup(poi: &PoiRecord) -> Popup {
    Popup {
        title: Some(poi.display_name().to_string()),
        rows: vec![
            ("Kategori".into(), poi.category.clone().unwrap_or_else(|| "N/A".into())),
            ("Desa".into(), poi.village.clone().unwrap_or_else(|| "N/A".into())),
        ],
    }
}

/// Hover tooltip summarizing a region.
pub fn region_tooltip(region: &Region) -> Popup {
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".into());
    Popup {
        title: None,
        rows: vec![
            ("Kabupaten".into(), or_na(&region.area)),
            ("Desa".into(), or_na(&region.village)),
            ("Komoditas".into(), or_na(&region.commodity)),
            ("Jumlah POI".into(), region.poi_count.to_string()),
        ],
    }
}
