use geo::BoundingRect;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    config::DashboardConfig,
    data::{Dataset, FeatureKey},
    style::PathStyle,
};
use super::{
    index::usable_bounds,
    renderer::{region_tooltip, MapRenderer},
    surface::{DrawTarget, LayerId, MapSurface},
};

/// Pointer events reported by the map surface for a polygon feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    PointerEnter { layer: LayerId, feature: FeatureKey },
    PointerLeave { layer: LayerId, feature: FeatureKey },
    Click { layer: LayerId, feature: FeatureKey },
}

/// Single dispatcher for every polygon event. Looks the feature and the current
/// selection up instead of holding per-feature handlers.
pub struct Interaction<'a, S: MapSurface> {
    pub surface: &'a mut S,
    pub renderer: &'a mut MapRenderer,
    pub data: &'a Dataset,
    pub config: &'a DashboardConfig,
    pub selected: &'a mut Option<FeatureKey>,
}

impl<S: MapSurface> Interaction<'_, S> {
    /// Handle one event. Returns the region whose details should be shown
    /// (clicks only; non-village clicks select nothing but still report the region).
    pub fn dispatch(&mut self, event: MapEvent) -> Option<FeatureKey> {
        let (layer, feature) = match event {
            MapEvent::PointerEnter { layer, feature }
            | MapEvent::PointerLeave { layer, feature }
            | MapEvent::Click { layer, feature } => (layer, feature),
        };
        if !self.renderer.is_current(layer, feature) {
            trace!("[map.event] ignoring stale event {event:?}");
            return None;
        }
        let data = self.data;
        let region = data.region(feature)?;
        let is_village = region.is_village(&self.config.admin);

        match event {
            MapEvent::PointerEnter { .. } if is_village => {
                if *self.selected != Some(feature) {
                    let style = self.base_style(feature).hovered();
                    self.surface.set_feature_style(layer, feature, &style);
                    self.raise(layer, feature);
                }
                self.renderer.raise_overlays(self.surface, self.config);
                self.surface.open_tooltip(layer, feature, &region_tooltip(region));
                None
            }
            MapEvent::PointerLeave { .. } if is_village => {
                if *self.selected != Some(feature) {
                    let style = self.base_style(feature);
                    self.surface.set_feature_style(layer, feature, &style);
                }
                self.surface.close_tooltip(layer, feature);
                None
            }
            MapEvent::Click { .. } => {
                self.clear_selection(layer);
                if is_village {
                    let style = self.base_style(feature).selected();
                    self.surface.set_feature_style(layer, feature, &style);
                    *self.selected = Some(feature);

                    match usable_bounds(region.geometry.as_ref().and_then(|g| g.bounding_rect())) {
                        Some(bounds) => self.surface.fit_bounds(bounds),
                        None => debug!("[map.click] feature {feature} has no usable bounds; keeping the view"),
                    }
                    self.raise(layer, feature);
                    self.renderer.raise_overlays(self.surface, self.config);
                }
                Some(feature)
            }
            _ => None,
        }
    }

    /// Bring a polygon to the top of its layer, keeping hit-testing in step.
    fn raise(&mut self, layer: LayerId, feature: FeatureKey) {
        self.surface.bring_to_front(DrawTarget::Feature(layer, feature));
        self.renderer.raise(feature);
    }

    fn base_style(&self, feature: FeatureKey) -> PathStyle {
        self.data.region(feature)
            .map(|region| PathStyle::region(region, self.config))
            .unwrap_or_else(PathStyle::boundary)
    }

    /// Revert the emphasis of the previous selection, if any.
    fn clear_selection(&mut self, layer: LayerId) {
        if let Some(previous) = self.selected.take() {
            let style = self.base_style(previous);
            self.surface.set_feature_style(layer, previous, &style);
        }
    }
}
