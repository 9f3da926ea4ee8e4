// OncoViz - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models), egui, egui_plot.
// Must NOT depend on: platform, direct I/O.

pub mod charts;
pub mod panels;
pub mod theme;
