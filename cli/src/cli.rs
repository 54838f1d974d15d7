use std::path::PathBuf;

/// Village commodity dashboard CLI
#[derive(clap::Parser, Debug)]
#[command(name = "agrimap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML configuration file (field names, colors, data file names)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the filter picker options
    Options(OptionsArgs),

    /// Print status, KPIs and aggregates for a filter
    Summary(SummaryArgs),

    /// Write the map as SVG and both charts as Plotly JSON
    Render(RenderArgs),
}

/// Two-axis filter shared by the commands. Pass `ALL` to select everything.
#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Area (kabupaten) to include; repeatable
    #[arg(short, long = "area")]
    pub areas: Vec<String>,

    /// Commodity label to include; repeatable
    #[arg(short = 'k', long = "commodity")]
    pub commodities: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct OptionsArgs {
    /// Data directory or http(s) base URL
    pub data: String,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Data directory or http(s) base URL
    pub data: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Data directory or http(s) base URL
    pub data: String,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Select the village with this name after drawing
    #[arg(long, conflicts_with = "at")]
    pub select: Option<String>,

    /// Select the region under LON,LAT after drawing
    #[arg(long, value_name = "LON,LAT", value_parser = parse_lon_lat)]
    pub at: Option<(f64, f64)>,

    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// SVG width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,
}

fn parse_lon_lat(text: &str) -> Result<(f64, f64), String> {
    let (lon, lat) = text.split_once(',').ok_or("expected LON,LAT")?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}"));
    Ok((parse(lon)?, parse(lat)?))
}

#[cfg(test)]
mod tests {
    use super::parse_lon_lat;

    #[test]
    fn parses_coordinate_pair() {
        assert_eq!(parse_lon_lat("99.5, 2.25"), Ok((99.5, 2.25)));
        assert!(parse_lon_lat("99.5").is_err());
        assert!(parse_lon_lat("x,1").is_err());
    }
}
