use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};

/// One parsed GeoJSON feature: its properties and optional polygonal geometry.
pub(crate) struct RawFeature {
    pub(crate) properties: Map<String, Value>,
    pub(crate) geometry: Option<MultiPolygon<f64>>,
}

/// Read features from FeatureCollection bytes.
/// Features with null or non-polygonal geometry are kept with `geometry: None`.
pub(crate) fn read_features_from_geojson_bytes(bytes: &[u8]) -> Result<Vec<RawFeature>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON bytes")?;

    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("[io::geojson] Expected a FeatureCollection, found {:?}", value["type"]);
    }
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection has no features array"))?;

    features.iter().enumerate()
        .map(|(i, feature)| {
            let properties = feature["properties"].as_object().cloned().unwrap_or_default();
            let geometry = parse_geometry(&feature["geometry"])
                .with_context(|| format!("[io::geojson] Invalid geometry on feature {i}"))?;
            Ok(RawFeature { properties, geometry })
        })
        .collect()
}

/// Parse a Polygon or MultiPolygon geometry object.
fn parse_geometry(geometry: &Value) -> Result<Option<MultiPolygon<f64>>> {
    let Some(object) = geometry.as_object() else { return Ok(None) };
    let coords = object.get("coordinates").and_then(Value::as_array);

    match (object.get("type").and_then(Value::as_str), coords) {
        (Some("Polygon"), Some(rings)) => Ok(Some(MultiPolygon(vec![parse_polygon(rings)?]))),
        (Some("MultiPolygon"), Some(polygons)) => {
            let polygons = polygons.iter()
                .filter_map(Value::as_array)
                .filter(|rings| !rings.is_empty())
                .map(|rings| parse_polygon(rings))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(MultiPolygon(polygons)))
        }
        _ => Ok(None),
    }
}

/// First ring is the exterior, the rest are holes.
fn parse_polygon(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| match ring.as_array() {
        Some(positions) => parse_ring(positions),
        None => bail!("ring is not an array"),
    });
    let exterior = rings.next().ok_or_else(|| anyhow!("polygon has no exterior ring"))??;
    Ok(Polygon::new(exterior, rings.collect::<Result<_>>()?))
}

/// Positions with fewer than two values are skipped; the ring is closed if open.
fn parse_ring(positions: &[Value]) -> Result<LineString<f64>> {
    let coords = positions.iter()
        .filter_map(Value::as_array)
        .filter(|position| position.len() >= 2)
        .map(|position| match (position[0].as_f64(), position[1].as_f64()) {
            (Some(x), Some(y)) => Ok(Coord { x, y }),
            _ => Err(anyhow!("non-numeric position {position:?}")),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ring = LineString(coords);
    ring.close();
    Ok(ring)
}

/// Read the POI list: a JSON array of objects. Non-object entries are dropped.
pub(crate) fn read_objects_from_json_bytes(bytes: &[u8]) -> Result<Vec<Map<String, Value>>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::json] Failed to parse JSON bytes")?;
    let Value::Array(items) = value else { bail!("[io::json] Expected a JSON array of records") };

    Ok(items.into_iter()
        .filter_map(|item| match item {
            Value::Object(object) => Some(object),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use geo::Area;
    use serde_json::json;

    use super::{read_features_from_geojson_bytes, read_objects_from_json_bytes};

    #[test]
    fn reads_polygon_and_multipolygon() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "WADMKD": "A" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "WADMKD": "B" },
                    "geometry": { "type": "MultiPolygon", "coordinates": [
                        [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]],
                        [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
                    ] }
                },
                { "type": "Feature", "properties": null, "geometry": null }
            ]
        });
        let features = read_features_from_geojson_bytes(doc.to_string().as_bytes()).unwrap();

        assert_eq!(features.len(), 3);
        let a = features[0].geometry.as_ref().unwrap();
        assert_eq!(a.0[0].exterior().0.len(), 5); // ring closed
        assert!((a.unsigned_area() - 1.0).abs() < 1e-9);
        assert_eq!(features[1].geometry.as_ref().unwrap().0.len(), 2);
        assert!(features[2].geometry.is_none());
        assert!(features[2].properties.is_empty());
    }

    #[test]
    fn rejects_non_collection() {
        let doc = json!({ "type": "Feature", "properties": {} });
        assert!(read_features_from_geojson_bytes(doc.to_string().as_bytes()).is_err());
        assert!(read_features_from_geojson_bytes(b"not json").is_err());
    }

    #[test]
    fn reads_object_array() {
        let objects = read_objects_from_json_bytes(br#"[{"name": "x"}, 3, {"name": "y"}]"#).unwrap();
        assert_eq!(objects.len(), 2);
        assert!(read_objects_from_json_bytes(br#"{"name": "x"}"#).is_err());
    }
}
