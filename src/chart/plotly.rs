use std::{collections::BTreeMap, fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use serde_json::{json, Value};

use super::bar::{BarChart, BarSeries, ChartSurface, ChartTarget};

/// A [`ChartSurface`] that keeps the latest Plotly figure (`data`, `layout`,
/// `config`) per target.
#[derive(Debug, Default)]
pub struct PlotlyChartSurface {
    figures: BTreeMap<ChartTarget, Value>,
}

impl PlotlyChartSurface {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn figure(&self, target: ChartTarget) -> Option<&Value> { self.figures.get(&target) }

    /// Write every plotted figure as `<dir>/<target id>.json`.
    pub fn write_all(&self, dir: &Path) -> Result<Vec<std::path::PathBuf>> {
        self.figures.iter()
            .map(|(target, figure)| {
                let path = dir.join(format!("{}.json", target.id()));
                let file = File::create(&path)
                    .with_context(|| format!("[chart.write] Failed to create {}", path.display()))?;
                serde_json::to_writer_pretty(BufWriter::new(file), figure)
                    .with_context(|| format!("[chart.write] Failed to write {}", path.display()))?;
                Ok(path)
            })
            .collect()
    }
}

fn trace(series: &BarSeries) -> Value {
    let mut trace = json!({
        "type": "bar",
        "orientation": "h",
        "x": series.values,
        "y": series.labels,
        "marker": { "color": series.color },
    });
    if let Some(name) = &series.name { trace["name"] = json!(name) }
    if !series.text.is_empty() {
        trace["text"] = json!(series.text);
        trace["textposition"] = json!("outside");
        trace["hoverinfo"] = json!("x+y");
    }
    trace
}

/// Plotly figure for a bar chart.
pub fn figure(chart: &BarChart) -> Value {
    let layout = &chart.layout;
    let [t, l, r, b] = layout.margin;

    let xaxis = if layout.show_x_axis {
        match &layout.x_title {
            Some(title) => json!({ "title": title }),
            None => json!({}),
        }
    } else {
        json!({ "visible": false, "showgrid": false, "showline": false, "zeroline": false, "showticklabels": false })
    };

    let mut plot_layout = json!({
        "barmode": "group",
        "margin": { "t": t, "l": l, "r": r, "b": b },
        "height": layout.height,
        "xaxis": xaxis,
        "yaxis": { "automargin": true },
    });
    if layout.legend_below {
        plot_layout["legend"] = json!({ "orientation": "h", "x": 0.5, "y": -0.2, "xanchor": "center", "yanchor": "top" });
    }

    json!({
        "data": chart.series.iter().map(trace).collect::<Vec<_>>(),
        "layout": plot_layout,
        "config": { "displayModeBar": false },
    })
}

impl ChartSurface for PlotlyChartSurface {
    fn plot(&mut self, target: ChartTarget, chart: &BarChart) {
        self.figures.insert(target, figure(chart));
    }
}

#[cfg(test)]
mod tests {
    use super::PlotlyChartSurface;
    use crate::{
        chart::{commodity_chart, top_poi_chart, ChartSurface, ChartTarget},
        config::DashboardConfig,
        stats::CommodityBreakdown,
    };

    #[test]
    fn commodity_figure_hides_x_axis_and_legend_below() {
        let config = DashboardConfig::default();
        let breakdown = CommodityBreakdown { labels: vec!["PADI".into()], with_poi: vec![0], without_poi: vec![3] };
        let mut surface = PlotlyChartSurface::new();
        surface.plot(ChartTarget::Commodity, &commodity_chart(&breakdown, &config));

        let figure = surface.figure(ChartTarget::Commodity).unwrap();
        assert_eq!(figure["layout"]["barmode"], "group");
        assert_eq!(figure["layout"]["xaxis"]["visible"], false);
        assert_eq!(figure["layout"]["legend"]["orientation"], "h");
        assert_eq!(figure["data"][0]["name"], "Tanpa POI Fasilitas Keuangan");
        assert_eq!(figure["data"][0]["textposition"], "outside");
        assert_eq!(figure["config"]["displayModeBar"], false);
    }

    #[test]
    fn writes_one_file_per_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PlotlyChartSurface::new();
        surface.plot(ChartTarget::TopPoi, &top_poi_chart(&[("A".into(), 4)], &DashboardConfig::default()));

        let paths = surface.write_all(dir.path()).unwrap();
        assert_eq!(paths, [dir.path().join("chart-poi.json")]);

        let text = std::fs::read_to_string(&paths[0]).unwrap();
        let figure: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(figure["layout"]["xaxis"]["title"], "Total POI");
        assert_eq!(figure["data"][0]["x"][0], 4);
    }
}
