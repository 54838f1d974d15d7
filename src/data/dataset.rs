use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use crate::{
    config::DashboardConfig,
    io::{DataSource, read_features_from_geojson_bytes, read_objects_from_json_bytes},
};
use super::{Boundary, PoiRecord, Region};

/// The three static inputs, loaded once and never mutated afterwards.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    regions: Vec<Region>,
    boundaries: Option<Vec<Boundary>>,
    points: Vec<PoiRecord>,
}

impl Dataset {
    pub fn new(regions: Vec<Region>, boundaries: Option<Vec<Boundary>>, points: Vec<PoiRecord>) -> Self {
        Self { regions, boundaries, points }
    }

    #[inline] pub fn regions(&self) -> &[Region] { &self.regions }

    #[inline] pub fn region(&self, key: usize) -> Option<&Region> { self.regions.get(key) }

    #[inline] pub fn boundaries(&self) -> Option<&[Boundary]> { self.boundaries.as_deref() }

    #[inline] pub fn points(&self) -> &[PoiRecord] { &self.points }

    /// Parse a dataset from in-memory documents (region GeoJSON, POI array, optional boundary GeoJSON).
    pub fn from_bytes(config: &DashboardConfig, regions: &[u8], points: &[u8], boundaries: Option<&[u8]>) -> Result<Self> {
        let regions = read_features_from_geojson_bytes(regions)
            .context("[Dataset.from_bytes] region dataset")?
            .into_iter()
            .map(|f| Region::from_properties(f.properties, f.geometry, &config.fields))
            .collect::<Vec<_>>();

        let points = read_objects_from_json_bytes(points)
            .context("[Dataset.from_bytes] POI dataset")?
            .iter()
            .map(|object| PoiRecord::from_object(object, config.poi_link()))
            .collect::<Vec<_>>();

        let boundaries = boundaries
            .map(|bytes| {
                read_features_from_geojson_bytes(bytes)
                    .context("[Dataset.from_bytes] boundary dataset")
                    .map(|features| features.into_iter()
                        .map(|f| Boundary::from_properties(&f.properties, f.geometry, &config.fields))
                        .collect::<Vec<_>>())
            })
            .transpose()?;

        Ok(Self::new(regions, boundaries, points))
    }

    /// Fetch and parse all configured files. The fetches run concurrently and are
    /// joined before parsing; any failure fails the whole load.
    pub fn load(source: &DataSource, config: &DashboardConfig) -> Result<Self> {
        let files = &config.data;
        debug!("[load] regions={} points={} boundaries={:?}",
            source.locate(&files.regions), source.locate(&files.points), files.boundaries());

        let (regions, points, boundaries) = std::thread::scope(|scope| {
            let regions = scope.spawn(|| source.fetch(&files.regions));
            let points = scope.spawn(|| source.fetch(&files.points));
            let boundaries = scope.spawn(|| files.boundaries().map(|name| source.fetch(name)).transpose());

            let panicked = |name: &str| anyhow!("[load] fetch thread for {name} panicked");
            Ok::<_, anyhow::Error>((
                regions.join().map_err(|_| panicked(&files.regions))??,
                points.join().map_err(|_| panicked(&files.points))??,
                boundaries.join().map_err(|_| panicked("boundaries"))??,
            ))
        })?;

        let dataset = Self::from_bytes(config, &regions, &points, boundaries.as_deref())?;
        info!("[load] {} regions, {} POIs, {} boundaries",
            dataset.regions.len(),
            dataset.points.len(),
            dataset.boundaries.as_ref().map_or(0, Vec::len));

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Dataset;
    use crate::{config::DashboardConfig, io::DataSource};

    fn collection() -> serde_json::Value {
        json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "Kabupaten": "Alpha", "WADMKD": "Desa A", "Prediksi": "PADI", "jumlah_poi": 2 },
                "geometry": { "type": "Polygon", "coordinates": [[[99.0, 2.0], [99.1, 2.0], [99.1, 2.1], [99.0, 2.0]]] }
            }]
        })
    }

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data_desa.geojson"), collection().to_string()).unwrap();
        std::fs::write(dir.path().join("data_kabupaten.geojson"), collection().to_string()).unwrap();
        std::fs::write(dir.path().join("data_poi.json"), r#"[{"latitude": 2.05, "longitude": 99.05, "WADMKD": "Desa A"}]"#).unwrap();

        let dataset = Dataset::load(&DataSource::Dir(dir.path().to_path_buf()), &DashboardConfig::default()).unwrap();
        assert_eq!(dataset.regions().len(), 1);
        assert_eq!(dataset.regions()[0].poi_count, 2);
        assert_eq!(dataset.points()[0].village.as_deref(), Some("Desa A"));
        assert_eq!(dataset.boundaries().unwrap()[0].area.as_deref(), Some("Alpha"));
    }

    #[test]
    fn missing_configured_file_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data_desa.geojson"), collection().to_string()).unwrap();
        std::fs::write(dir.path().join("data_poi.json"), "[]").unwrap();

        let source = DataSource::Dir(dir.path().to_path_buf());
        assert!(Dataset::load(&source, &DashboardConfig::default()).is_err());

        let mut config = DashboardConfig::default();
        config.data.boundaries = None;
        let dataset = Dataset::load(&source, &config).unwrap();
        assert!(dataset.boundaries().is_none());
    }
}
