use agrimap::{DetailView, FilterOptions, KpiDisplay, PanelSurface, StatusMessage};

/// Keeps the latest panel state and prints it on request.
#[derive(Debug, Default)]
pub struct ConsolePanel {
    status: Option<StatusMessage>,
    kpis: KpiDisplay,
    detail: DetailView,
}

impl ConsolePanel {
    pub fn print_summary(&self) {
        if let Some(status) = &self.status { println!("{}", status.text) }
        println!("Total desa:                {:>8}", self.kpis.eligible);
        println!("Desa dengan POI keuangan:  {:>8}", self.kpis.with_poi);
        println!("Desa tanpa POI keuangan:   {:>8}", self.kpis.without_poi);
    }

    pub fn print_detail(&self) {
        match &self.detail {
            DetailView::Placeholder { hint, body } => {
                println!("{hint}");
                println!("{body}");
            }
            DetailView::NotApplicable { title, body } => {
                println!("{title}");
                println!("{body}");
            }
            DetailView::Attributes { title, rows } => {
                println!("{title}");
                let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
                for (label, value) in rows {
                    println!("  {label:<width$}  {value}");
                }
            }
        }
    }
}

impl PanelSurface for ConsolePanel {
    // Pickers are printed by the `options` command.
    fn set_filter_options(&mut self, _options: &FilterOptions) {}

    fn set_status(&mut self, status: &StatusMessage) {
        self.status = Some(status.clone());
    }

    fn set_kpis(&mut self, kpis: &KpiDisplay) {
        self.kpis = kpis.clone();
    }

    fn set_detail(&mut self, view: &DetailView) {
        self.detail = view.clone();
    }
}
