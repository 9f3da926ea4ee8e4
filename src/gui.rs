// OncoViz - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the dashboard sections, the menu bar, and the status
// bar, and persists the session on exit.

use crate::app::session::{self, SessionData, SESSION_VERSION};
use crate::app::state::AppState;
use crate::core::{export, loader};
use crate::ui::{panels, theme};
use crate::util::error::ExportError;
use std::path::PathBuf;

/// Which file format an export writes.
#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

/// The OncoViz application.
pub struct OncovizApp {
    pub state: AppState,
    session_file: PathBuf,
}

impl OncovizApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState, session_file: PathBuf) -> Self {
        Self {
            state,
            session_file,
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Data\u{2026}").clicked() {
                        ui.close_menu();
                        self.open_data_dialog();
                    }
                    ui.separator();
                    if ui.button("Export Share Table (CSV)\u{2026}").clicked() {
                        ui.close_menu();
                        self.export_shares(ExportFormat::Csv);
                    }
                    if ui.button("Export Share Table (JSON)\u{2026}").clicked() {
                        ui.close_menu();
                        self.export_shares(ExportFormat::Json);
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.state.dark_mode, "Dark mode").changed() {
                        ctx.set_visuals(if self.state.dark_mode {
                            egui::Visuals::dark()
                        } else {
                            egui::Visuals::light()
                        });
                        ui.close_menu();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About OncoViz").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(theme::STATUS_BG)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.colored_label(theme::STATUS_TEXT, &self.state.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(ref path) = self.state.data_path {
                            ui.colored_label(
                                theme::STATUS_TEXT,
                                egui::RichText::new(path.display().to_string()).small(),
                            );
                        }
                    });
                });
            });
    }

    /// Let the user pick a new data CSV and swap it in.
    fn open_data_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match loader::load_csv(&path) {
            Ok(outcome) => {
                self.state.replace_dataset(outcome.dataset, path);
                if outcome.rows_skipped > 0 {
                    self.state
                        .status_message
                        .push_str(&format!(" {} malformed rows skipped.", outcome.rows_skipped));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load dataset");
                self.state.status_message = format!("Load failed: {e}");
            }
        }
    }

    /// Export the current share table via a native save dialog.
    fn export_shares(&mut self, format: ExportFormat) {
        let (extension, filter_name) = match format {
            ExportFormat::Csv => ("csv", "CSV files"),
            ExportFormat::Json => ("json", "JSON files"),
        };
        let default_name = format!("{}.{extension}", export::default_export_stem());

        let Some(path) = rfd::FileDialog::new()
            .add_filter(filter_name, &[extension])
            .set_file_name(&default_name)
            .save_file()
        else {
            return;
        };

        let rows = &self.state.tables.type_shares;
        let result = std::fs::File::create(&path)
            .map_err(|e| ExportError::Io {
                path: path.clone(),
                source: e,
            })
            .and_then(|file| match format {
                ExportFormat::Csv => export::export_csv(rows, file, &path),
                ExportFormat::Json => export::export_json(rows, file, &path),
            });

        match result {
            Ok(count) => {
                tracing::info!(path = %path.display(), rows = count, "Share table exported");
                self.state.status_message =
                    format!("Exported {count} rows to '{}'.", path.display());
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.state.status_message = format!("Export failed: {e}");
            }
        }
    }

    fn save_session(&self) {
        let data = SessionData {
            version: SESSION_VERSION,
            data_file: self.state.data_path.clone(),
            gender: self.state.selection.gender,
            age: self.state.selection.age.clone(),
            dark_mode: self.state.dark_mode,
        };
        if let Err(e) = session::save(&data, &self.session_file) {
            tracing::warn!(error = %e, "Could not save session");
        }
    }
}

impl eframe::App for OncovizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.menu_bar(ctx);
        self.status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.add_space(4.0);
                    panels::share::render(ui, &mut self.state);

                    ui.add_space(theme::SECTION_SPACING);
                    ui.separator();
                    ui.add_space(theme::SECTION_SPACING);
                    panels::yearly::render(ui, &mut self.state);

                    ui.add_space(theme::SECTION_SPACING);
                    ui.separator();
                    ui.add_space(theme::SECTION_SPACING);
                    panels::gender_split::render(ui, &mut self.state);

                    ui.add_space(theme::SECTION_SPACING);
                    ui.separator();
                    ui.add_space(theme::SECTION_SPACING);
                    panels::age_profile::render(ui, &mut self.state);

                    ui.add_space(theme::SECTION_SPACING);
                    ui.separator();
                    ui.add_space(theme::SECTION_SPACING);
                    panels::type_ranking::render(ui, &mut self.state);

                    ui.add_space(24.0);
                });
        });

        panels::about::render(ctx, &mut self.state);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_session();
    }
}
