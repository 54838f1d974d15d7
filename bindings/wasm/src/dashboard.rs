use anyhow::Result;
use serde::Serialize;
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

use agrimap::{
    CommandLog, Dashboard, DashboardConfig, Dataset, FeatureKey, FilterSelection, LayerId, MapEvent, StatusMessage,
    SurfaceCommand,
};

use crate::common::*;

/// Commands recorded since the previous call, grouped by widget.
#[derive(Serialize)]
struct Drained {
    map: Vec<SurfaceCommand>,
    charts: Vec<SurfaceCommand>,
    panel: Vec<SurfaceCommand>,
}

#[wasm_bindgen]
pub struct WasmDashboard {
    inner: Dashboard<CommandLog, CommandLog, CommandLog>,
}

fn build(config: Option<String>, regions: &JsValue, points: &JsValue, boundaries: &JsValue) -> Result<Dashboard<CommandLog, CommandLog, CommandLog>> {
    let config = match config.as_deref() {
        Some(text) if !text.trim().is_empty() => DashboardConfig::from_toml_str(text)?,
        _ => DashboardConfig::default(),
    };
    let boundaries = if boundaries.is_null() || boundaries.is_undefined() { None } else { Some(js_bytes(boundaries)?) };
    let data = Dataset::from_bytes(&config, &js_bytes(regions)?, &js_bytes(points)?, boundaries.as_deref())?;
    Ok(Dashboard::new(config, data, CommandLog::new(), CommandLog::new(), CommandLog::new()))
}

#[wasm_bindgen]
impl WasmDashboard {
    /// Build the dashboard from fetched file contents (strings or Uint8Arrays).
    /// `config` is optional TOML text; `boundaries` may be null.
    /// On failure the error carries the banner text to show in the status line.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>, regions: JsValue, points: JsValue, boundaries: JsValue) -> Result<WasmDashboard, JsValue> {
        match build(config.clone(), &regions, &points, &boundaries) {
            Ok(inner) => Ok(WasmDashboard { inner }),
            Err(e) => {
                web_sys::console::error_1(&js_err(format!("{e:#}")));
                let files = config.as_deref()
                    .and_then(|text| DashboardConfig::from_toml_str(text).ok())
                    .unwrap_or_default()
                    .data;
                Err(js_err(StatusMessage::load_error(&files).text))
            }
        }
    }

    /// Commands produced by construction (initial unfiltered draw).
    pub fn take_commands(&mut self) -> Result<JsValue, JsValue> {
        self.drain()
    }

    /// Picker options for both axes.
    pub fn options(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.options()).map_err(|e| e.into())
    }

    pub fn apply_filter(&mut self, areas: Vec<String>, commodities: Vec<String>) -> Result<JsValue, JsValue> {
        self.inner.apply_filter(FilterSelection::new(areas, commodities));
        self.drain()
    }

    pub fn reset_filter(&mut self) -> Result<JsValue, JsValue> {
        self.inner.reset_filter();
        self.drain()
    }

    pub fn pointer_enter(&mut self, layer: u32, feature: u32) -> Result<JsValue, JsValue> {
        self.dispatch(MapEvent::PointerEnter { layer: LayerId(layer), feature: feature as FeatureKey })
    }

    pub fn pointer_leave(&mut self, layer: u32, feature: u32) -> Result<JsValue, JsValue> {
        self.dispatch(MapEvent::PointerLeave { layer: LayerId(layer), feature: feature as FeatureKey })
    }

    pub fn click(&mut self, layer: u32, feature: u32) -> Result<JsValue, JsValue> {
        self.dispatch(MapEvent::Click { layer: LayerId(layer), feature: feature as FeatureKey })
    }

    /// Currently selected village, if any.
    pub fn selected(&self) -> Option<u32> {
        self.inner.state().selected.map(|key| key as u32)
    }
}

impl WasmDashboard {
    fn dispatch(&mut self, event: MapEvent) -> Result<JsValue, JsValue> {
        self.inner.handle_map_event(event);
        self.drain()
    }

    fn drain(&mut self) -> Result<JsValue, JsValue> {
        let drained = Drained {
            map: self.inner.map_mut().drain(),
            charts: self.inner.charts_mut().drain(),
            panel: self.inner.panel_mut().drain(),
        };
        to_js_json(&drained)
    }
}
