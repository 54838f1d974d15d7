use serde::{Deserialize, Serialize};

use crate::{config::DashboardConfig, format::group_thousands, stats::CommodityBreakdown};

pub const WITH_POI_SERIES: &str = "Dengan POI Fasilitas Keuangan";
pub const WITHOUT_POI_SERIES: &str = "Tanpa POI Fasilitas Keuangan";

/// Chart containers the dashboard draws into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartTarget {
    Commodity,
    TopPoi,
}

impl ChartTarget {
    /// Container id, also used as the output file stem.
    pub fn id(self) -> &'static str {
        match self {
            ChartTarget::Commodity => "chart-komoditas",
            ChartTarget::TopPoi => "chart-poi",
        }
    }
}

/// One horizontal bar series. `labels`, `values` and `text` are parallel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Per-bar annotation; empty when the chart shows none.
    pub text: Vec<String>,
    pub color: String,
}

/// Multi-series charts are drawn as grouped bars.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarLayout {
    pub height: u32,
    /// top, left, right, bottom
    pub margin: [u32; 4],
    pub x_title: Option<String>,
    pub show_x_axis: bool,
    /// Horizontal legend centered below the plot area.
    pub legend_below: bool,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            height: 350,
            margin: [40, 120, 10, 40],
            x_title: None,
            show_x_axis: true,
            legend_below: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarChart {
    pub series: Vec<BarSeries>,
    pub layout: BarLayout,
}

/// Operations the dashboard needs from a charting widget.
pub trait ChartSurface {
    /// Replace whatever is drawn in `target` with `chart`.
    fn plot(&mut self, target: ChartTarget, chart: &BarChart);
}

/// Grouped with/without-POI bars per commodity. The without-POI series is drawn first.
pub fn commodity_chart(breakdown: &CommodityBreakdown, config: &DashboardConfig) -> BarChart {
    let sep = config.thousands_separator;
    let series = |name: &str, values: &[usize], color: &str| BarSeries {
        name: Some(name.to_string()),
        labels: breakdown.labels.clone(),
        values: values.iter().map(|&v| v as u64).collect(),
        text: values.iter()
            .map(|&v| if v > 0 { group_thousands(v as u64, sep) } else { String::new() })
            .collect(),
        color: color.to_string(),
    };

    BarChart {
        series: vec![
            series(WITHOUT_POI_SERIES, &breakdown.without_poi, &config.style.chart_without_poi),
            series(WITH_POI_SERIES, &breakdown.with_poi, &config.style.chart_with_poi),
        ],
        layout: BarLayout {
            margin: [40, 120, 60, 100],
            show_x_axis: false,
            legend_below: true,
            ..BarLayout::default()
        },
    }
}

/// Single-series chart of the villages with the most POIs, rows as returned by
/// [`crate::stats::top_poi`].
pub fn top_poi_chart(rows: &[(String, u32)], config: &DashboardConfig) -> BarChart {
    BarChart {
        series: vec![BarSeries {
            name: None,
            labels: rows.iter().map(|(label, _)| label.clone()).collect(),
            values: rows.iter().map(|&(_, count)| count as u64).collect(),
            text: Vec::new(),
            color: config.style.chart_top_poi.clone(),
        }],
        layout: BarLayout { x_title: Some("Total POI".into()), ..BarLayout::default() },
    }
}

#[cfg(test)]
mod tests {
    use super::{commodity_chart, top_poi_chart, WITHOUT_POI_SERIES};
    use crate::{config::DashboardConfig, stats::CommodityBreakdown};

    #[test]
    fn commodity_chart_puts_without_poi_first() {
        let config = DashboardConfig::default();
        let breakdown = CommodityBreakdown {
            labels: vec!["KARET".into(), "PADI".into()],
            with_poi: vec![1, 0],
            without_poi: vec![1200, 1],
        };
        let chart = commodity_chart(&breakdown, &config);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name.as_deref(), Some(WITHOUT_POI_SERIES));
        assert_eq!(chart.series[0].color, "#CC3333");
        assert_eq!(chart.series[0].text, ["1.200", "1"]);
        assert_eq!(chart.series[1].text, ["1", ""]);
        assert_eq!(chart.series[0].labels, chart.series[1].labels);
    }

    #[test]
    fn top_poi_chart_keeps_row_order() {
        let rows = vec![("B".to_string(), 2), ("A".to_string(), 5)];
        let chart = top_poi_chart(&rows, &DashboardConfig::default());

        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].labels, ["B", "A"]);
        assert_eq!(chart.series[0].values, [2, 5]);
        assert_eq!(chart.layout.x_title.as_deref(), Some("Total POI"));
    }
}
