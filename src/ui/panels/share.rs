// OncoViz - ui/panels/share.rs
//
// Top cancer types share view: the selector row plus the top-9 + Other
// donut for the latest year.

use crate::app::state::AppState;
use crate::core::chart;
use crate::ui::{charts, panels};

/// Render the share section.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(format!(
        "Top 10 cancer types by gender and age in {}",
        state.dataset.latest_year()
    ));
    ui.add_space(6.0);

    panels::controls::render(ui, state);
    ui.add_space(8.0);

    let spec = chart::type_share_chart(&state.tables.type_shares);
    charts::render(ui, "share_donut", &spec);
}
