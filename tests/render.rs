use std::fs;

use agrimap::{CommandLog, Dashboard, DashboardConfig, DataSource, Dataset, PlotlyChartSurface, SvgMapSurface};
use serde_json::json;

fn write_fixture(dir: &std::path::Path) {
    let regions = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "Kabupaten": "Alpha & Co", "WADMKD": "Sukamaju", "Prediksi": "KOPI", "jumlah_poi": 3, "TIPADM": 1 },
            "geometry": { "type": "Polygon", "coordinates": [[[99.0, 2.0], [99.1, 2.0], [99.1, 2.1], [99.0, 2.0]]] }
        }]
    });
    let points = json!([{ "name": "Bank <A>", "category": "Bank", "latitude": 2.05, "longitude": 99.07, "WADMKD": "Sukamaju" }]);
    fs::write(dir.join("data_desa.geojson"), regions.to_string()).unwrap();
    fs::write(dir.join("data_poi.json"), points.to_string()).unwrap();
}

fn config_without_boundaries() -> DashboardConfig {
    DashboardConfig::from_toml_str("[data]\nboundaries = \"\"\n").unwrap()
}

#[test]
fn renders_svg_and_chart_files_from_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let config = config_without_boundaries();
    let data = Dataset::load(&DataSource::parse(&dir.path().to_string_lossy()), &config).unwrap();
    let mut dash = Dashboard::new(config, data, SvgMapSurface::new(600, 10), PlotlyChartSurface::new(), CommandLog::new());
    assert_eq!(dash.select_village("Sukamaju"), Some(0));

    let svg = dash.map().to_svg_string().unwrap();
    assert!(svg.contains(r##"fill:#8B4513"##));
    assert!(svg.contains("stroke:#007BFF"));
    assert!(svg.contains("Bank &lt;A&gt;"));
    assert!(svg.contains("Komoditas Unggulan Desa"));
    assert_eq!(dash.map().layer_order(), ["Peta Komoditas Unggulan", "POI Fasilitas Keuangan"]);

    let paths = dash.charts().write_all(dir.path()).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(dir.path().join("chart-komoditas.json").exists());
}

#[test]
fn missing_file_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::remove_file(dir.path().join("data_poi.json")).unwrap();

    let result = Dataset::load(&DataSource::parse(&dir.path().to_string_lossy()), &config_without_boundaries());
    assert!(result.is_err());
}

#[test]
fn default_config_requires_boundary_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let result = Dataset::load(&DataSource::parse(&dir.path().to_string_lossy()), &DashboardConfig::default());
    assert!(result.is_err());
}
