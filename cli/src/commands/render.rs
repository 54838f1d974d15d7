use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use agrimap::{Dashboard, PlotlyChartSurface, SvgMapSurface};
use tracing::{info, warn};

use super::{load_config, load_dataset, selection};
use crate::console::ConsolePanel;

const SVG_MARGIN: u32 = 16;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let out_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    if !out_dir.is_dir() {
        bail!("[render] output directory {} does not exist", out_dir.display());
    }
    if args.width <= 2 * SVG_MARGIN {
        bail!("[render] --width must be larger than {}", 2 * SVG_MARGIN);
    }

    let config = load_config(cli)?;
    let data = load_dataset(&args.data, &config)?;

    let mut dashboard = Dashboard::new(
        config,
        data,
        SvgMapSurface::new(args.width, SVG_MARGIN),
        PlotlyChartSurface::new(),
        ConsolePanel::default(),
    );
    dashboard.apply_filter(selection(&args.filter));

    match (&args.select, args.at) {
        (Some(village), _) => {
            dashboard.select_village(village)
                .with_context(|| format!("[render] no drawn village named {village:?}"))?;
        }
        (None, Some((lon, lat))) => {
            if dashboard.select_at(lon, lat).is_none() { warn!("[render] no region at {lon},{lat}") }
        }
        (None, None) => {}
    }

    let svg_path = out_dir.join("map.svg");
    info!("[render] writing map to {}", svg_path.display());
    dashboard.map().to_svg(&svg_path)?;

    for path in dashboard.charts().write_all(&out_dir)? {
        info!("[render] wrote chart {}", path.display());
    }

    dashboard.panel().print_summary();
    if args.select.is_some() || args.at.is_some() {
        println!();
        dashboard.panel().print_detail();
    }
    Ok(())
}
