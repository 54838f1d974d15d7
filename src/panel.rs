use serde::Serialize;

use crate::{config::DataFiles, detail::DetailView, filter::FilterOptions, stats::KpiDisplay};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

/// One-line status shown above the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    /// Status after a filter pass. `active` is whether any selection was made,
    /// independent of how many regions matched.
    pub fn filtered(active: bool, shown: usize, total: usize) -> Self {
        if active {
            Self { kind: StatusKind::Success, text: format!("\u{2714}\u{fe0f} {shown} wilayah terpilih.") }
        } else {
            Self { kind: StatusKind::Warning, text: format!("\u{26a0}\u{fe0f} Menampilkan semua {total} wilayah.") }
        }
    }

    /// Banner shown when the initial load fails. Names the expected files.
    pub fn load_error(files: &DataFiles) -> Self {
        let mut names: Vec<String> = [Some(files.regions.as_str()), Some(files.points.as_str()), files.boundaries()]
            .into_iter()
            .flatten()
            .map(|name| format!("`{name}`"))
            .collect();
        let listed = match names.pop() {
            Some(last) if !names.is_empty() => format!("{}, dan {last}", names.join(", ")),
            Some(last) => last,
            None => String::new(),
        };
        Self {
            kind: StatusKind::Error,
            text: format!("\u{274c} Gagal memuat data. Pastikan file {listed} tersedia."),
        }
    }
}

/// Page elements outside the map and charts: pickers, status line, KPI counters
/// and the detail table.
pub trait PanelSurface {
    fn set_filter_options(&mut self, options: &FilterOptions);
    fn set_status(&mut self, status: &StatusMessage);
    fn set_kpis(&mut self, kpis: &KpiDisplay);
    fn set_detail(&mut self, view: &DetailView);
}
