use geo::MultiPolygon;
use serde_json::{Map, Value};

use crate::config::{AdminConfig, FieldNames};

/// Index of a region within the loaded dataset. Stable for the session.
pub type FeatureKey = usize;

/// Raw administrative-type code as found in the source data.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminCode {
    Code(i64),
    Text(String),
}

/// One village polygon and its precomputed attributes.
#[derive(Clone, Debug)]
pub struct Region {
    pub area: Option<String>,
    pub village: Option<String>,
    pub admin_type: Option<AdminCode>,
    pub commodity: Option<String>,
    pub poi_count: u32,
    pub geometry: Option<MultiPolygon<f64>>,
    /// All source properties, for the detail panel.
    pub properties: Map<String, Value>,
}

/// One administrative-area outline, used only for the boundary overlay.
#[derive(Clone, Debug)]
pub struct Boundary {
    pub area: Option<String>,
    pub geometry: Option<MultiPolygon<f64>>,
}

impl Region {
    /// Build a region from GeoJSON feature properties.
    pub fn from_properties(properties: Map<String, Value>, geometry: Option<MultiPolygon<f64>>, fields: &FieldNames) -> Self {
        Self {
            area: text_property(&properties, &fields.area),
            village: text_property(&properties, &fields.village),
            admin_type: admin_code(properties.get(&fields.admin_type)),
            commodity: text_property(&properties, &fields.commodity),
            poi_count: count_property(properties.get(&fields.poi_count)),
            geometry,
            properties,
        }
    }

    /// Whether the region is a village proper (eligible for commodity styling,
    /// highlighting, selection and the KPIs). Regions without a code count as villages.
    pub fn is_village(&self, admin: &AdminConfig) -> bool {
        if !admin.enabled { return true }
        match &self.admin_type {
            None => true,
            Some(AdminCode::Code(code)) => *code == admin.village_code,
            Some(AdminCode::Text(_)) => false,
        }
    }

    #[inline] pub fn has_poi(&self) -> bool { self.poi_count > 0 }
}

impl Boundary {
    pub fn from_properties(properties: &Map<String, Value>, geometry: Option<MultiPolygon<f64>>, fields: &FieldNames) -> Self {
        Self { area: text_property(properties, &fields.area), geometry }
    }
}

/// Read a property as non-empty text. Numbers are rendered as text.
pub(crate) fn text_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a numeric value that may also be encoded as a string.
pub(crate) fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn admin_code(value: Option<&Value>) -> Option<AdminCode> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => match number_value(other) {
            Some(v) if v.fract() == 0.0 => Some(AdminCode::Code(v as i64)),
            _ => Some(AdminCode::Text(match other {
                Value::String(s) => s.clone(),
                v => v.to_string(),
            })),
        },
    }
}

/// Non-negative integer count; absent or malformed values count as zero.
fn count_property(value: Option<&Value>) -> u32 {
    value
        .and_then(number_value)
        .map(|v| v.max(0.0).round().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}
