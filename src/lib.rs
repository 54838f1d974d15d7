#![doc = "Agrimap public API"]
mod chart;
mod config;
mod dashboard;
mod data;
mod detail;
mod filter;
mod format;
mod io;
mod map;
mod panel;
mod record;
mod stats;
mod style;

#[doc(inline)]
pub use config::{AdminConfig, DashboardConfig, DataFiles, DetailColumn, DetailConfig, FieldNames, StyleConfig, ViewConfig};

#[doc(inline)]
pub use data::{AdminCode, Boundary, Dataset, FeatureKey, PoiRecord, Region};

#[doc(inline)]
pub use io::DataSource;

#[doc(inline)]
pub use filter::{apply_filter, distinct_values, DistinctValues, FilterOptions, FilterSelection, PickerOption, ALL, ALL_LABEL};

#[doc(inline)]
pub use map::{
    region_tooltip, DrawTarget, Interaction, LayerId, LayerKind, LayerSpec, LayerToggle, MapEvent, MapRenderer,
    MapSurface, Marker, PolygonShape, Popup, SvgMapSurface, BOUNDARY_LAYER_NAME, POI_LAYER_NAME, REGION_LAYER_NAME,
};

#[doc(inline)]
pub use stats::{
    commodity_breakdown, commodity_distribution, compute_kpis, poi_totals_by_area, top_poi, CommodityBreakdown,
    KpiDisplay, Kpis, PLACEHOLDER_LABEL,
};

#[doc(inline)]
pub use chart::{
    commodity_chart, top_poi_chart, BarChart, BarLayout, BarSeries, ChartSurface, ChartTarget,
    PlotlyChartSurface, WITHOUT_POI_SERIES, WITH_POI_SERIES,
};

#[doc(inline)]
pub use detail::{format_value, render_detail, DetailView};

#[doc(inline)]
pub use panel::{PanelSurface, StatusKind, StatusMessage};

#[doc(inline)]
pub use record::{CommandLog, Coordinates, MarkerCommand, ShapeCommand, SurfaceCommand};

#[doc(inline)]
pub use style::{Legend, LegendEntry, MarkerStyle, PathStyle};

#[doc(inline)]
pub use dashboard::{AppState, Dashboard};

#[doc(inline)]
pub use format::group_thousands;
