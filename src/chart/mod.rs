//! Declarative bar charts for the dashboard and a Plotly-backed surface.

mod bar;
mod plotly;

pub use bar::*;
pub use plotly::PlotlyChartSurface;
