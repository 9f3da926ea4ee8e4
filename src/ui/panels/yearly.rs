// OncoViz - ui/panels/yearly.rs
//
// Time-series views: total cases by year, cases by year and gender,
// and the normalized (100%-stacked) gender split per year.

use crate::app::state::AppState;
use crate::core::chart;
use crate::ui::{charts, theme};

/// Render the yearly trend sections.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Detected cancer cases by year");
    ui.add_space(6.0);
    let spec = chart::annual_chart(&state.tables.annual);
    charts::render(ui, "annual_area", &spec);

    ui.add_space(theme::SECTION_SPACING);

    ui.heading("Detected cancer cases by year and gender");
    ui.add_space(6.0);
    let spec = chart::annual_by_gender_chart(&state.tables.annual_by_gender);
    charts::render(ui, "annual_gender_lines", &spec);

    ui.add_space(8.0);
    let spec = chart::annual_by_gender_normalized_chart(&state.tables.annual_by_gender);
    charts::render(ui, "annual_gender_normalized", &spec);
}
