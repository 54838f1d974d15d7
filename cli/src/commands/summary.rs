use anyhow::Result;
use agrimap::{commodity_distribution, group_thousands, poi_totals_by_area, top_poi, CommandLog, Dashboard};

use super::{load_config, load_dataset, selection};
use crate::console::ConsolePanel;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::SummaryArgs) -> Result<()> {
    let config = load_config(cli)?;
    let data = load_dataset(&args.data, &config)?;

    let mut dashboard = Dashboard::new(config, data, CommandLog::new(), CommandLog::new(), ConsolePanel::default());
    dashboard.apply_filter(selection(&args.filter));
    dashboard.panel().print_summary();

    let config = dashboard.config();
    let sep = config.thousands_separator;

    println!("\nKomoditas (desa):");
    for (label, count) in commodity_distribution(dashboard.filtered_regions(), config) {
        println!("  {label:<24} {:>8}", group_thousands(count as u64, sep));
    }

    println!("\nTop {} desa menurut jumlah POI:", config.top_n);
    for (label, count) in top_poi(dashboard.filtered_regions(), config.top_n, config).iter().rev() {
        println!("  {label:<24} {:>8}", group_thousands(*count as u64, sep));
    }

    println!("\nTotal POI per kabupaten:");
    for (area, total) in poi_totals_by_area(dashboard.filtered_regions()) {
        println!("  {area:<24} {:>8}", group_thousands(total, sep));
    }
    Ok(())
}
