// OncoViz - ui/panels/age_profile.rs
//
// Latest-year cases per age bracket, in ascending bracket order.

use crate::app::state::AppState;
use crate::core::chart;
use crate::ui::charts;

/// Render the age profile section.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(format!(
        "Detected cancer cases by age group in {}",
        state.dataset.latest_year()
    ));
    ui.add_space(6.0);

    let spec = chart::age_profile_chart(&state.tables.age_profile);
    charts::render(ui, "age_bars", &spec);
}
