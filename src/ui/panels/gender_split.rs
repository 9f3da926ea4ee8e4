// OncoViz - ui/panels/gender_split.rs
//
// Latest-year gender split donut.

use crate::app::state::AppState;
use crate::core::chart;
use crate::ui::charts;

/// Render the gender split section.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(format!(
        "Detected cancer cases by gender in {}",
        state.dataset.latest_year()
    ));
    ui.add_space(6.0);

    let spec = chart::gender_split_chart(&state.tables.gender_split);
    charts::render(ui, "gender_donut", &spec);
}
