use serde::Serialize;

use crate::{config::AdminConfig, data::Region, format::group_thousands};

/// Headline counts over the filtered villages.
/// `with_poi + without_poi == eligible` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub eligible: usize,
    pub with_poi: usize,
    pub without_poi: usize,
}

/// KPI values formatted for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KpiDisplay {
    pub eligible: String,
    pub with_poi: String,
    pub without_poi: String,
}

/// Count the eligible regions and split them by POI presence.
pub fn compute_kpis<'a>(regions: impl IntoIterator<Item = &'a Region>, admin: &AdminConfig) -> Kpis {
    regions.into_iter()
        .filter(|region| region.is_village(admin))
        .fold(Kpis::default(), |mut kpis, region| {
            kpis.eligible += 1;
            if region.has_poi() { kpis.with_poi += 1 } else { kpis.without_poi += 1 }
            kpis
        })
}

impl Kpis {
    pub fn display(&self, separator: char) -> KpiDisplay {
        let fmt = |n: usize| group_thousands(n as u64, separator);
        KpiDisplay {
            eligible: fmt(self.eligible),
            with_poi: fmt(self.with_poi),
            without_poi: fmt(self.without_poi),
        }
    }
}
