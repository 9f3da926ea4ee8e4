// OncoViz - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading
// 3. Logging initialisation (debug mode support)
// 4. Dataset loading (fatal if no data can be loaded)
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use oncoviz::app;
pub use oncoviz::core;
pub use oncoviz::platform;
pub use oncoviz::ui;
pub use oncoviz::util;

use clap::Parser;
use std::path::PathBuf;

/// OncoViz - Interactive dashboard for national cancer-incidence statistics.
///
/// Point OncoViz at a registry extract (CSV with Year, Gender, Age, Name,
/// Count columns) to explore incidence by cancer type, year, gender, and
/// age group.
#[derive(Parser, Debug)]
#[command(name = "OncoViz", version, about)]
struct Cli {
    /// Incidence CSV to load (falls back to config, last session, or a
    /// file dialog if omitted).
    data: Option<PathBuf>,

    /// Alternative config file path.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load configuration first so the config
    // log level can participate in logging initialisation.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());

    let config = match platform::config::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "OncoViz starting"
    );

    // Restore the previous session (selection, colour scheme, last file).
    let session_file = app::session::session_path(&platform_paths.data_dir);
    let previous_session = app::session::load(&session_file);

    // Determine the data file: CLI > config > last session > file dialog.
    let data_path = cli
        .data
        .clone()
        .or_else(|| config.data_file.clone())
        .or_else(|| {
            previous_session
                .as_ref()
                .and_then(|s| s.data_file.clone())
                .filter(|p| p.is_file())
        })
        .or_else(|| {
            rfd::FileDialog::new()
                .set_title("Select an incidence CSV")
                .add_filter("CSV files", &["csv"])
                .pick_file()
        });

    let Some(data_path) = data_path else {
        tracing::error!("No data file selected");
        eprintln!("Error: no data file given. Pass a CSV path or pick one in the dialog.");
        std::process::exit(1);
    };

    // The dashboard has nothing to show without data; a load failure at
    // startup is fatal.
    let outcome = match core::loader::load_csv(&data_path) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dataset");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Create application state
    let mut state = app::state::AppState::new(outcome.dataset, Some(data_path), cli.debug);
    state.dark_mode = config.dark_mode;

    // Re-apply the previous selection where it still fits the data.
    if let Some(session) = previous_session {
        let mut selection = session.selection();
        if let Some(ref age) = selection.age {
            if !state.dataset.age_groups().contains(age) {
                selection.age = None;
            }
        }
        state.selection = selection;
        state.dark_mode = session.dark_mode;
        state.apply_selection();
    }

    let dark_mode = state.dark_mode;
    let font_size = config.font_size;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 850.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });

            // Apply the configured body font size.
            let mut style = (*cc.egui_ctx.style()).clone();
            if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
                body.size = font_size;
            }
            if let Some(button) = style.text_styles.get_mut(&egui::TextStyle::Button) {
                button.size = font_size;
            }
            cc.egui_ctx.set_style(style);

            Ok(Box::new(gui::OncovizApp::new(state, session_file)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch OncoViz GUI: {e}");
        std::process::exit(1);
    }
}
