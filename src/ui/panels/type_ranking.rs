// OncoViz - ui/panels/type_ranking.rs
//
// Latest-year top-20 cancer types as horizontal bars, "Other" at the
// bottom.

use crate::app::state::AppState;
use crate::core::chart;
use crate::ui::charts;

/// Render the type ranking section.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(format!(
        "Detected cancer cases by type in {}",
        state.dataset.latest_year()
    ));
    ui.add_space(6.0);

    let spec = chart::type_ranking_chart(&state.tables.type_ranking);
    charts::render(ui, "type_ranking_bars", &spec);
}
