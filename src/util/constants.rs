// OncoViz - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "OncoViz";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "OncoViz";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Tabulation
// =============================================================================

/// Years strictly after this value are included in the time-series views.
/// The registry extract contains partial data for earlier years, so the
/// trend charts start at the first complete year.
pub const TREND_BASELINE_YEAR: i32 = 2003;

/// Sort bound assigned to open-ended age brackets ("85+") and to any age
/// label that does not carry a `"L - U"` range. Must be greater than the
/// lower bound of every closed bracket in the dataset.
pub const OPEN_ENDED_AGE_BOUND: u32 = 85;

/// Number of cancer types kept verbatim in the share (donut) view.
/// Everything below the cut is folded into a single "Other" slice,
/// giving at most `SHARE_TOP_TYPES + 1` slices.
pub const SHARE_TOP_TYPES: usize = 9;

/// Number of cancer types kept verbatim in the ranking (bar) view.
pub const RANKING_TOP_TYPES: usize = 20;

/// Label of the synthetic residual group produced by the fold.
pub const OTHER_LABEL: &str = "Other";

// =============================================================================
// Data loading limits
// =============================================================================

/// Maximum number of records loaded from a single data file. Guards
/// against accidentally pointing OncoViz at a multi-gigabyte CSV; the
/// registry extracts this tool is built for are a few thousand rows.
pub const MAX_RECORDS: usize = 5_000_000;

/// Maximum number of skipped-row reports logged individually per load.
/// Further skips are only counted, keeping startup logs readable for
/// files with systematic formatting problems.
pub const MAX_LOGGED_SKIPS: usize = 20;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
