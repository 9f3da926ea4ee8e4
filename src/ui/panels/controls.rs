// OncoViz - ui/panels/controls.rs
//
// The two dashboard selectors: Gender and Age Group. Only the share
// donut reacts to them; a change triggers one full recompute of the
// derived tables.

use crate::app::state::AppState;
use crate::core::model::Gender;

/// Render the selector row.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.label("Gender:");
        egui::ComboBox::from_id_salt("gender_select")
            .selected_text(state.selection.gender.map_or("All", |g| g.label()))
            .show_ui(ui, |ui| {
                changed |= ui
                    .selectable_value(&mut state.selection.gender, None, "All")
                    .changed();
                for gender in Gender::all() {
                    changed |= ui
                        .selectable_value(&mut state.selection.gender, Some(*gender), gender.label())
                        .changed();
                }
            });

        ui.add_space(24.0);

        ui.label("Age Group:");
        let selected = state
            .selection
            .age
            .clone()
            .unwrap_or_else(|| "All".to_string());
        egui::ComboBox::from_id_salt("age_select")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                changed |= ui
                    .selectable_value(&mut state.selection.age, None, "All")
                    .changed();
                // Options come from the dataset, already in ascending
                // lower-bound order.
                let labels: Vec<String> = state.dataset.age_groups().to_vec();
                for label in labels {
                    changed |= ui
                        .selectable_value(
                            &mut state.selection.age,
                            Some(label.clone()),
                            &label,
                        )
                        .changed();
                }
            });
    });

    if changed {
        state.apply_selection();
    }
}
