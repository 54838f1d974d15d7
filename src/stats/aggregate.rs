use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{config::DashboardConfig, data::Region};

/// Label used in the top-POI chart when a region has neither village nor area name.
pub const PLACEHOLDER_LABEL: &str = "Wilayah";

/// Village counts per commodity split by POI presence. Both series share `labels`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CommodityBreakdown {
    /// Union of commodity labels, sorted ascending.
    pub labels: Vec<String>,
    pub with_poi: Vec<usize>,
    pub without_poi: Vec<usize>,
}

fn commodity_label<'a>(region: &'a Region, config: &'a DashboardConfig) -> &'a str {
    region.commodity.as_deref().unwrap_or(&config.style.other_label)
}

/// Villages per commodity label, ascending by count (ties keep label order).
pub fn commodity_distribution<'a>(regions: impl IntoIterator<Item = &'a Region>, config: &DashboardConfig) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for region in regions.into_iter().filter(|r| r.is_village(&config.admin)) {
        *counts.entry(commodity_label(region, config)).or_default() += 1;
    }

    let mut out: Vec<(String, usize)> = counts.into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    out.sort_by_key(|&(_, count)| count);
    out
}

/// Villages per commodity label, split into with-POI and without-POI series
/// with zero-fill for missing combinations.
pub fn commodity_breakdown<'a>(regions: impl IntoIterator<Item = &'a Region>, config: &DashboardConfig) -> CommodityBreakdown {
    let mut with_poi: BTreeMap<&str, usize> = BTreeMap::new();
    let mut without_poi: BTreeMap<&str, usize> = BTreeMap::new();

    for region in regions.into_iter().filter(|r| r.is_village(&config.admin)) {
        let bucket = if region.has_poi() { &mut with_poi } else { &mut without_poi };
        *bucket.entry(commodity_label(region, config)).or_default() += 1;
    }

    let labels: BTreeSet<&str> = with_poi.keys().chain(without_poi.keys()).copied().collect();
    CommodityBreakdown {
        with_poi: labels.iter().map(|l| with_poi.get(l).copied().unwrap_or(0)).collect(),
        without_poi: labels.iter().map(|l| without_poi.get(l).copied().unwrap_or(0)).collect(),
        labels: labels.into_iter().map(str::to_string).collect(),
    }
}

/// The `n` villages with the most POIs, returned in ascending order so the
/// largest bar renders at the top of a horizontal chart.
pub fn top_poi<'a>(regions: impl IntoIterator<Item = &'a Region>, n: usize, config: &DashboardConfig) -> Vec<(String, u32)> {
    let mut rows: Vec<(String, u32)> = regions.into_iter()
        .filter(|r| r.is_village(&config.admin) && r.has_poi())
        .map(|r| {
            let label = r.village.as_deref()
                .or(r.area.as_deref())
                .unwrap_or(PLACEHOLDER_LABEL);
            (label.to_string(), r.poi_count)
        })
        .collect();

    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows.truncate(n);
    rows.reverse();
    rows
}

/// Total POI count per area name, sorted by area. Regions without an area are skipped.
pub fn poi_totals_by_area<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Vec<(String, u64)> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for region in regions {
        if let Some(area) = region.area.as_deref() {
            *totals.entry(area).or_default() += region.poi_count as u64;
        }
    }
    totals.into_iter().map(|(area, total)| (area.to_string(), total)).collect()
}
