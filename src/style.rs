//! Path and marker styles for the map layers.

use serde::Serialize;

use crate::{config::DashboardConfig, data::Region};

/// Vector path style. Field names follow the map widget's style options.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub dash_array: String,
}

/// Circle marker style for POIs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    /// Draw a dark border around the swatch (used for white fills).
    pub outlined: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl PathStyle {
    fn polygon(fill_color: &str) -> Self {
        Self {
            fill_color: fill_color.to_string(),
            fill_opacity: 1.0,
            color: "black".into(),
            weight: 0.5,
            opacity: 1.0,
            dash_array: String::new(),
        }
    }

    /// Base style of a region: commodity color for villages, a neutral fill otherwise.
    pub fn region(region: &Region, config: &DashboardConfig) -> Self {
        if region.is_village(&config.admin) {
            Self::polygon(config.commodity_color(region.commodity.as_deref()))
        } else {
            Self::polygon(&config.style.non_village_fill)
        }
    }

    /// Transient emphasis while the pointer is over a village.
    pub fn hovered(&self) -> Self {
        Self { weight: 3.0, color: "#666".into(), dash_array: String::new(), fill_opacity: 0.9, ..self.clone() }
    }

    /// Persistent emphasis of the selected village.
    pub fn selected(&self) -> Self {
        Self { weight: 5.0, color: "#007BFF".into(), dash_array: String::new(), fill_opacity: 0.7, ..self.clone() }
    }

    /// Outline-only style of the administrative boundary overlay.
    pub fn boundary() -> Self {
        Self {
            fill_color: "transparent".into(),
            fill_opacity: 0.0,
            color: "#000000".into(),
            weight: 4.0,
            opacity: 1.0,
            dash_array: String::new(),
        }
    }
}

impl MarkerStyle {
    pub fn poi(config: &DashboardConfig) -> Self {
        Self {
            radius: 4.0,
            fill_color: config.style.marker_color.clone(),
            fill_opacity: 0.8,
            color: "#000".into(),
            weight: 1.0,
            opacity: 1.0,
        }
    }
}

impl Legend {
    /// Commodity colors (the "other" entry last) followed by the non-village swatch.
    pub fn commodities(config: &DashboardConfig) -> Self {
        let other = config.style.other_label.to_uppercase();
        let (others, named): (Vec<_>, Vec<_>) = config.style.colors.iter()
            .partition(|(label, _)| label.to_uppercase() == other);

        let entries = named.into_iter().chain(others)
            .map(|(label, color)| LegendEntry { label: label.clone(), color: color.clone(), outlined: false })
            .chain(std::iter::once(LegendEntry {
                label: config.style.non_village_legend.clone(),
                color: config.style.non_village_fill.clone(),
                outlined: true,
            }))
            .collect();

        Self { title: "Komoditas Unggulan Desa".into(), entries }
    }
}
