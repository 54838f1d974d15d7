//! The controller: owns the dataset, the application state and the three
//! surfaces, and runs the filter-and-redraw pipeline.

use geo::Point;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    chart::{commodity_chart, top_poi_chart, ChartSurface, ChartTarget},
    config::DashboardConfig,
    data::{Dataset, FeatureKey, Region},
    detail::{render_detail, DetailView},
    filter::{apply_filter, distinct_values, FilterOptions, FilterSelection},
    map::{Interaction, MapEvent, MapRenderer, MapSurface},
    panel::{PanelSurface, StatusMessage},
    stats::{commodity_breakdown, compute_kpis, top_poi, Kpis},
};

/// Mutable session state. Rebuilt by every filter pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AppState {
    /// Normalized selection of the last filter pass.
    pub selection: FilterSelection,
    pub filtered: Vec<FeatureKey>,
    pub filter_active: bool,
    /// Selected village. Cleared whenever the filtered set is recomputed.
    pub selected: Option<FeatureKey>,
}

pub struct Dashboard<M, C, P> {
    config: DashboardConfig,
    data: Dataset,
    options: FilterOptions,
    renderer: MapRenderer,
    state: AppState,
    map: M,
    charts: C,
    panel: P,
}

impl<M: MapSurface, C: ChartSurface, P: PanelSurface> Dashboard<M, C, P> {
    /// Populate the pickers and draw everything unfiltered.
    pub fn new(config: DashboardConfig, data: Dataset, map: M, charts: C, panel: P) -> Self {
        let options = FilterOptions::from_distinct(&distinct_values(data.regions()));
        let mut dashboard = Self {
            config,
            data,
            options,
            renderer: MapRenderer::new(),
            state: AppState::default(),
            map,
            charts,
            panel,
        };
        dashboard.panel.set_filter_options(&dashboard.options);
        dashboard.apply_filter(FilterSelection::default());
        dashboard
    }

    #[inline] pub fn config(&self) -> &DashboardConfig { &self.config }

    #[inline] pub fn data(&self) -> &Dataset { &self.data }

    #[inline] pub fn options(&self) -> &FilterOptions { &self.options }

    #[inline] pub fn state(&self) -> &AppState { &self.state }

    #[inline] pub fn renderer(&self) -> &MapRenderer { &self.renderer }

    #[inline] pub fn map(&self) -> &M { &self.map }

    #[inline] pub fn map_mut(&mut self) -> &mut M { &mut self.map }

    #[inline] pub fn charts(&self) -> &C { &self.charts }

    #[inline] pub fn charts_mut(&mut self) -> &mut C { &mut self.charts }

    #[inline] pub fn panel(&self) -> &P { &self.panel }

    #[inline] pub fn panel_mut(&mut self) -> &mut P { &mut self.panel }

    /// Regions of the current filtered set, in dataset order.
    pub fn filtered_regions(&self) -> impl Iterator<Item = &Region> {
        self.state.filtered.iter().filter_map(|&key| self.data.region(key))
    }

    /// KPI counts over the current filtered set.
    pub fn kpis(&self) -> Kpis {
        compute_kpis(self.filtered_regions(), &self.config.admin)
    }

    /// Recompute the filtered set and redraw the map, KPIs, charts and status.
    /// The selection is cleared and the detail panel returns to its placeholder.
    pub fn apply_filter(&mut self, selection: FilterSelection) {
        let selection = selection.normalized();
        let filtered = apply_filter(self.data.regions(), &selection);
        info!("[dashboard.filter] {} of {} regions match {selection:?}", filtered.len(), self.data.regions().len());

        self.state = AppState {
            filter_active: selection.is_active(),
            selection,
            filtered,
            selected: None,
        };

        self.renderer.redraw(&mut self.map, &self.data, &self.state.filtered, &self.state.selection, &self.config);
        self.refresh_stats();
        self.panel.set_status(&StatusMessage::filtered(
            self.state.filter_active,
            self.state.filtered.len(),
            self.data.regions().len(),
        ));
        self.panel.set_detail(&DetailView::default());
    }

    /// Clear both axes and redraw.
    pub fn reset_filter(&mut self) {
        self.apply_filter(FilterSelection::default());
    }

    fn refresh_stats(&mut self) {
        let kpis = self.kpis();
        self.panel.set_kpis(&kpis.display(self.config.thousands_separator));

        let breakdown = commodity_breakdown(self.filtered_regions(), &self.config);
        self.charts.plot(ChartTarget::Commodity, &commodity_chart(&breakdown, &self.config));

        let rows = top_poi(self.filtered_regions(), self.config.top_n, &self.config);
        self.charts.plot(ChartTarget::TopPoi, &top_poi_chart(&rows, &self.config));
    }

    /// Route a pointer event from the map surface. Clicks update the detail panel.
    pub fn handle_map_event(&mut self, event: MapEvent) {
        let clicked = Interaction {
            surface: &mut self.map,
            renderer: &mut self.renderer,
            data: &self.data,
            config: &self.config,
            selected: &mut self.state.selected,
        }
        .dispatch(event);

        if let Some(feature) = clicked {
            debug!("[dashboard.click] feature {feature}, selected {:?}", self.state.selected);
            let view = render_detail(self.data.region(feature), &self.config);
            self.panel.set_detail(&view);
        }
    }

    /// Simulate a click on the drawn region at (`lon`, `lat`).
    /// Returns the clicked region, if any was hit.
    pub fn select_at(&mut self, lon: f64, lat: f64) -> Option<FeatureKey> {
        let feature = self.renderer.pick(&self.data, Point::new(lon, lat))?;
        self.click(feature);
        Some(feature)
    }

    /// Simulate a click on the first drawn region named `village`.
    pub fn select_village(&mut self, village: &str) -> Option<FeatureKey> {
        let feature = self.state.filtered.iter().copied()
            .find(|&key| self.data.region(key).is_some_and(|r| r.village.as_deref() == Some(village)))?;
        self.click(feature);
        Some(feature)
    }

    fn click(&mut self, feature: FeatureKey) {
        if let Some(layer) = self.renderer.region_layer() {
            self.handle_map_event(MapEvent::Click { layer, feature });
        }
    }
}
