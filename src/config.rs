//! Dashboard configuration.
//!
//! Every knob that differed between the hand-maintained dashboard variants
//! (administrative-type eligibility, boundary overlay, POI linkage field,
//! color tables) lives here instead of in forked code paths.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration, loadable from TOML. Every field has a default.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataFiles,
    pub fields: FieldNames,
    pub admin: AdminConfig,
    /// Property on POI records naming the owning village. Empty shows every POI.
    pub poi_link_field: Option<String>,
    pub style: StyleConfig,
    pub view: ViewConfig,
    /// Number of villages in the top-POI chart.
    pub top_n: usize,
    pub thousands_separator: char,
    pub detail: DetailConfig,
}

/// File names of the static inputs, relative to the data source.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub regions: String,
    pub points: String,
    pub boundaries: Option<String>,
}

/// Property names used on region and boundary features.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub area: String,
    pub village: String,
    pub admin_type: String,
    pub size: String,
    pub land_cover: String,
    pub commodity: String,
    pub poi_count: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// When false, every region is treated as a village.
    pub enabled: bool,
    pub village_code: i64,
    pub village_label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Upper-case commodity label -> fill color.
    pub colors: BTreeMap<String, String>,
    /// Label used for regions without a (recognised) commodity.
    pub other_label: String,
    pub non_village_fill: String,
    pub non_village_legend: String,
    pub marker_color: String,
    pub chart_with_poi: String,
    pub chart_without_poi: String,
    pub chart_top_poi: String,
    /// Draw the boundary outlines above the region polygons.
    pub boundary_above_regions: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// (lat, lon)
    pub center: [f64; 2],
    pub zoom: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    /// Ordered (property key, display label) pairs.
    pub columns: Vec<DetailColumn>,
    /// Land-cover code (as text) -> label.
    pub land_cover: BTreeMap<String, String>,
    pub land_cover_fallback: String,
    pub area_unit: String,
    pub not_available: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailColumn {
    pub key: String,
    pub label: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: DataFiles::default(),
            fields: FieldNames::default(),
            admin: AdminConfig::default(),
            poi_link_field: Some("WADMKD".into()),
            style: StyleConfig::default(),
            view: ViewConfig::default(),
            top_n: 10,
            thousands_separator: '.',
            detail: DetailConfig::default(),
        }
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            regions: "data_desa.geojson".into(),
            points: "data_poi.json".into(),
            boundaries: Some("data_kabupaten.geojson".into()),
        }
    }
}

impl DataFiles {
    /// Boundary file name, if the overlay is configured. Empty disables it.
    #[inline]
    pub fn boundaries(&self) -> Option<&str> {
        self.boundaries.as_deref().filter(|name| !name.is_empty())
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            area: "Kabupaten".into(),
            village: "WADMKD".into(),
            admin_type: "TIPADM".into(),
            size: "LUAS".into(),
            land_cover: "LULC".into(),
            commodity: "Prediksi".into(),
            poi_count: "jumlah_poi".into(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { enabled: true, village_code: 1, village_label: "Desa/Kelurahan".into() }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let colors = [
            ("KARET", "#2E8B57"),
            ("KOPI", "#8B4513"),
            ("PADI", "#FFD700"),
            ("LAINNYA", "#A9A9A9"),
        ];
        Self {
            colors: colors.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            other_label: "LAINNYA".into(),
            non_village_fill: "#FFFFFF".into(),
            non_village_legend: "Wilayah Perkotaan/Data Tidak Tersedia".into(),
            marker_color: "#B22222".into(),
            chart_with_poi: "#4682B4".into(),
            chart_without_poi: "#CC3333".into(),
            chart_top_poi: "steelblue".into(),
            boundary_above_regions: true,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { center: [2.0, 99.5], zoom: 8 }
    }
}

impl Default for DetailConfig {
    fn default() -> Self {
        let columns = [
            ("Kabupaten", "Nama Kabupaten"),
            ("WADMKC", "Nama Kecamatan"),
            ("WADMKD", "Nama Desa"),
            ("TIPADM", "Tipe Administrasi"),
            ("LUAS", "Luas Wilayah"),
            ("EVI", "Enhanced Vegetation Index (EVI)"),
            ("MNDWI", "Modified Normalized Difference Water Index (MNDWI)"),
            ("NDRE", "Normalized Difference Red Edge (NDRE)"),
            ("NDVI", "Normalized Difference Vegetation Index (NDVI)"),
            ("NDWI", "Normalized Difference Water Index (NDWI)"),
            ("RVI", "Ratio Vegetation Index (RVI)"),
            ("LULC", "Land Use/Land Cover (Tutupan Lahan) Dominan"),
            ("Elevation", "Ketinggian (mdpl)"),
            ("Slope", "Kemiringan Lahan (Derajat)"),
            ("Rainfall", "Curah Hujan"),
            ("Prediksi", "Komoditas Unggulan"),
            ("jumlah_poi", "Jumlah POI Fasilitas Keuangan"),
        ];
        let land_cover = [
            "Badan Air",
            "Pohon / Hutan",
            "Rumput/Padang Rumput",
            "Vegetasi Tergenang/Lahan Basah",
            "Tanaman Pertanian",
            "Semak dan Belukar",
            "Area Terbangun",
            "Lahan Terbuka/Tidak Bervegetasi",
            "Lainnya/Tidak Didefinisikan",
        ];
        Self {
            columns: columns.into_iter()
                .map(|(key, label)| DetailColumn { key: key.into(), label: label.into() })
                .collect(),
            land_cover: land_cover.into_iter().enumerate()
                .map(|(code, label)| (code.to_string(), label.to_string()))
                .collect(),
            land_cover_fallback: "Lainnya/Tidak Didefinisikan".into(),
            area_unit: "ha".into(),
            not_available: "N/A".into(),
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("[config] failed to parse TOML configuration")
    }

    /// Read a configuration file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config] failed to read {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("[config] invalid configuration in {}", path.display()))
    }

    /// POI linkage field, if POIs are restricted to visible villages.
    #[inline]
    pub fn poi_link(&self) -> Option<&str> {
        self.poi_link_field.as_deref().filter(|field| !field.is_empty())
    }

    /// Fill color for a commodity label, matched case-insensitively.
    /// Missing or unknown labels resolve to the `other_label` color.
    pub fn commodity_color(&self, label: Option<&str>) -> &str {
        let key = label.unwrap_or(&self.style.other_label).to_uppercase();
        self.style.colors.get(&key)
            .or_else(|| self.style.colors.get(&self.style.other_label.to_uppercase()))
            .map(String::as_str)
            .unwrap_or("#A9A9A9")
    }
}
