//! Attribute table for the selected village.

use serde::Serialize;
use serde_json::Value;

use crate::{config::DashboardConfig, data::{number_value, Region}};

pub const PLACEHOLDER_BODY: &str = "Klik desa untuk melihat data.";
pub const PLACEHOLDER_HINT: &str = "Silakan klik pada salah satu desa di peta untuk menampilkan detail atribut.";
pub const NOT_APPLICABLE_TITLE: &str = "Wilayah non-Desa/Kelurahan terpilih.";

/// What the detail panel shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DetailView {
    /// Nothing selected yet.
    Placeholder { hint: String, body: String },
    /// A non-village polygon was clicked.
    NotApplicable { title: String, body: String },
    Attributes { title: String, rows: Vec<(String, String)> },
}

impl Default for DetailView {
    fn default() -> Self {
        DetailView::Placeholder { hint: PLACEHOLDER_HINT.into(), body: PLACEHOLDER_BODY.into() }
    }
}

/// Build the panel content for `region` (or the placeholder for `None`).
pub fn render_detail(region: Option<&Region>, config: &DashboardConfig) -> DetailView {
    let Some(region) = region else { return DetailView::default() };

    if !region.is_village(&config.admin) {
        return DetailView::NotApplicable {
            title: NOT_APPLICABLE_TITLE.into(),
            body: format!(
                "Data ini bukan {} ({} \u{2260} {}). Detail tidak ditampilkan.",
                config.admin.village_label, config.fields.admin_type, config.admin.village_code,
            ),
        };
    }

    let rows = config.detail.columns.iter()
        .map(|column| (column.label.clone(), format_value(&column.key, region.properties.get(&column.key), config)))
        .collect();

    DetailView::Attributes {
        title: format!("Desa : {}", region.village.as_deref().unwrap_or("-")),
        rows,
    }
}

/// Format one attribute for display according to its field.
pub fn format_value(key: &str, value: Option<&Value>, config: &DashboardConfig) -> String {
    let detail = &config.detail;
    let fields = &config.fields;
    let value = match value {
        None | Some(Value::Null) => return detail.not_available.clone(),
        Some(value) => value,
    };
    let number = number_value(value);

    if key == fields.land_cover {
        let label = number
            .filter(|n| n.fract() == 0.0)
            .and_then(|n| detail.land_cover.get(&(n as i64).to_string()));
        return match label {
            Some(label) => label.clone(),
            None => format!("{} (Kode {})", detail.land_cover_fallback, raw_text(value)),
        };
    }

    if key == fields.admin_type {
        return match number {
            Some(n) if n == config.admin.village_code as f64 => config.admin.village_label.clone(),
            _ => raw_text(value),
        };
    }

    match number {
        Some(n) if key == fields.size => format!("{n:.2} {}", detail.area_unit),
        Some(n) => format!("{n:.2}"),
        None => raw_text(value),
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{format_value, render_detail, DetailView};
    use crate::{config::DashboardConfig, data::Region};

    fn region(props: serde_json::Value) -> Region {
        Region::from_properties(props.as_object().unwrap().clone(), None, &DashboardConfig::default().fields)
    }

    #[test]
    fn none_renders_placeholder() {
        assert_eq!(render_detail(None, &DashboardConfig::default()), DetailView::default());
    }

    #[test]
    fn non_village_is_not_applicable() {
        let view = render_detail(Some(&region(json!({ "TIPADM": 2, "WADMKD": "Kota" }))), &DashboardConfig::default());
        assert!(matches!(view, DetailView::NotApplicable { .. }));
    }

    #[test]
    fn attributes_follow_column_order() {
        let config = DashboardConfig::default();
        let view = render_detail(Some(&region(json!({ "WADMKD": "Sukamaju", "LUAS": 12.345, "TIPADM": 1 }))), &config);
        let DetailView::Attributes { title, rows } = view else { panic!("expected attributes") };

        assert_eq!(title, "Desa : Sukamaju");
        assert_eq!(rows.len(), config.detail.columns.len());
        assert_eq!(rows[0], ("Nama Kabupaten".to_string(), "N/A".to_string()));
        assert_eq!(rows[3].1, "Desa/Kelurahan");
        assert_eq!(rows[4].1, "12.35 ha");
    }

    #[test]
    fn field_specific_formatting() {
        let config = DashboardConfig::default();
        assert_eq!(format_value("LULC", Some(&json!(4)), &config), "Tanaman Pertanian");
        assert_eq!(format_value("LULC", Some(&json!("6")), &config), "Area Terbangun");
        assert_eq!(format_value("LULC", Some(&json!(11)), &config), "Lainnya/Tidak Didefinisikan (Kode 11)");
        assert_eq!(format_value("TIPADM", Some(&json!(3)), &config), "3");
        assert_eq!(format_value("NDVI", Some(&json!("0.4567")), &config), "0.46");
        assert_eq!(format_value("Prediksi", Some(&json!("PADI")), &config), "PADI");
        assert_eq!(format_value("Slope", Some(&json!(null)), &config), "N/A");
        assert_eq!(format_value("Slope", None, &config), "N/A");
    }
}
