use geo::Point;
use serde_json::{Map, Value};

use super::region::number_value;

/// A point of interest (financial facility) from the static POI list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoiRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub category: Option<String>,
    /// Owning village name, when the source carries the linkage field.
    pub village: Option<String>,
}

impl PoiRecord {
    /// Build a record from one JSON object. `link_field` names the village property.
    pub fn from_object(object: &Map<String, Value>, link_field: Option<&str>) -> Self {
        let text = |key: &str| match object.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            latitude: object.get("latitude").and_then(number_value),
            longitude: object.get("longitude").and_then(number_value),
            name: text("name"),
            category: text("category"),
            village: link_field.and_then(text),
        }
    }

    /// Position as (lon, lat), or `None` when either coordinate is missing or out of range.
    pub fn position(&self) -> Option<Point<f64>> {
        let (lat, lon) = (self.latitude?, self.longitude?);
        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon))
            .then(|| Point::new(lon, lat))
    }

    /// Name shown on the marker popup: name, then category, then "POI".
    pub fn display_name(&self) -> &str {
        self.name.as_deref()
            .or(self.category.as_deref())
            .unwrap_or("POI")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::PoiRecord;

    fn record(value: serde_json::Value) -> PoiRecord {
        PoiRecord::from_object(value.as_object().unwrap(), Some("WADMKD"))
    }

    #[test]
    fn out_of_range_latitude_has_no_position() {
        let poi = record(json!({ "latitude": 91, "longitude": 99.0 }));
        assert!(poi.position().is_none());
    }

    #[test]
    fn string_coordinates_are_accepted() {
        let poi = record(json!({ "latitude": "2.5", "longitude": "99.1", "WADMKD": "Desa A" }));
        let p = poi.position().unwrap();
        assert_eq!((p.x(), p.y()), (99.1, 2.5));
        assert_eq!(poi.village.as_deref(), Some("Desa A"));
    }

    #[test]
    fn non_numeric_coordinates_have_no_position() {
        assert!(record(json!({ "latitude": "north", "longitude": 99.0 })).position().is_none());
        assert!(record(json!({ "longitude": 99.0 })).position().is_none());
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(record(json!({ "name": "Bank X", "category": "Bank" })).display_name(), "Bank X");
        assert_eq!(record(json!({ "category": "ATM" })).display_name(), "ATM");
        assert_eq!(record(json!({})).display_name(), "POI");
    }
}
