// OncoViz - ui/theme.rs
//
// Colour scheme, series colour mapping, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Categorical palette for donut slices, in slice order. Wraps around
/// for charts with more categories than colours (the share view never
/// exceeds ten slices, so in practice it never wraps).
pub const CATEGORICAL: &[Color32] = &[
    Color32::from_rgb(31, 119, 180),  // blue
    Color32::from_rgb(255, 127, 14),  // orange
    Color32::from_rgb(44, 160, 44),   // green
    Color32::from_rgb(214, 39, 40),   // red
    Color32::from_rgb(148, 103, 189), // purple
    Color32::from_rgb(140, 86, 75),   // brown
    Color32::from_rgb(227, 119, 194), // pink
    Color32::from_rgb(127, 127, 127), // grey
    Color32::from_rgb(188, 189, 34),  // olive
    Color32::from_rgb(23, 190, 207),  // cyan
];

/// Colour of the slice/bar at `index` within a single-hue-per-category chart.
pub fn categorical_colour(index: usize) -> Color32 {
    CATEGORICAL[index % CATEGORICAL.len()]
}

/// Fixed colour per gender series so the same gender is the same colour
/// in every chart.
pub fn series_colour(series: &str) -> Color32 {
    match series {
        "Male" => Color32::from_rgb(31, 119, 180),
        "Female" => Color32::from_rgb(255, 127, 14),
        _ => Color32::from_rgb(127, 127, 127),
    }
}

/// Single-series fill for area and bar charts.
pub const SINGLE_SERIES: Color32 = Color32::from_rgb(31, 119, 180);

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Layout constants.
pub const PLOT_HEIGHT: f32 = 280.0;
pub const RANKING_PLOT_HEIGHT: f32 = 460.0;
pub const DONUT_INNER_RADIUS: f32 = 60.0;
pub const DONUT_OUTER_RADIUS: f32 = 120.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
pub const SECTION_SPACING: f32 = 18.0;
