// OncoViz - core/chart.rs
//
// Chart descriptors: the contract between the tabulation engine and the
// rendering layer. A chart is a kind, axis titles, and a list of rows;
// the renderer decides how to draw each kind. No egui dependencies here.

use crate::core::tabulate::{
    AgeCount, GenderCount, TypeCount, TypeShare, YearCount, YearGenderCount,
};

// =============================================================================
// Descriptor types
// =============================================================================

/// Which mark the rendering layer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Donut / arc chart, one slice per row.
    Arc,

    /// Filled area over an ordinal x axis.
    Area,

    /// One line per series.
    Line,

    /// 100%-stacked area, one band per series.
    NormalizedArea,

    /// Vertical bars, one per row.
    Bar,

    /// Horizontal bars, one per row, top row first.
    HorizontalBar,
}

/// A chart handed to the rendering layer: what to draw and the rows to
/// draw it from. Axis titles are `None` where the original view hides
/// them.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub category_title: Option<&'static str>,
    pub value_title: Option<&'static str>,
    pub rows: Vec<ChartRow>,
}

/// One mark (slice, bar, point) of a chart.
///
/// `value` is whatever the kind plots (a count, or a 0..1 share for
/// normalized kinds); `tooltip` carries the pre-formatted field/value
/// pairs shown on hover, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    /// Category label (cancer type, year, gender, age bracket).
    pub label: String,

    /// Colour series this mark belongs to, for multi-series kinds.
    pub series: Option<String>,

    pub value: f64,

    pub tooltip: Vec<(&'static str, String)>,
}

// =============================================================================
// Value formatting
// =============================================================================

/// Format a count with thousands separators, e.g. 71492 -> "71,492".
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a 0..1 share as a percentage with the given number of decimals,
/// e.g. 0.8333 -> "83%" (0 decimals) or "83.3%" (1 decimal).
pub fn format_percent(share: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, share * 100.0)
}

// =============================================================================
// Per-view chart construction
// =============================================================================

/// Donut of the top cancer types with the "Other" residual.
/// Rows arrive already ordered, "Other" last.
pub fn type_share_chart(rows: &[TypeShare]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Arc,
        category_title: None,
        value_title: None,
        rows: rows
            .iter()
            .map(|r| ChartRow {
                label: r.name.clone(),
                series: None,
                value: r.count as f64,
                tooltip: vec![
                    ("Type", r.name.clone()),
                    ("Count", format_thousands(r.count)),
                    ("Percentage", format_percent(r.percentage, 0)),
                ],
            })
            .collect(),
    }
}

/// Area chart of total cases per year.
pub fn annual_chart(rows: &[YearCount]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Area,
        category_title: None,
        value_title: None,
        rows: rows
            .iter()
            .map(|r| ChartRow {
                label: r.year.to_string(),
                series: None,
                value: r.count as f64,
                tooltip: vec![
                    ("Year", r.year.to_string()),
                    ("Count", format_thousands(r.count)),
                ],
            })
            .collect(),
    }
}

/// Line chart of cases per year, one line per gender.
pub fn annual_by_gender_chart(rows: &[YearGenderCount]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        category_title: None,
        value_title: None,
        rows: rows
            .iter()
            .map(|r| ChartRow {
                label: r.year.to_string(),
                series: Some(r.gender.label().to_string()),
                value: r.count as f64,
                tooltip: vec![
                    ("Year", r.year.to_string()),
                    ("Gender", r.gender.label().to_string()),
                    ("Count", format_thousands(r.count)),
                ],
            })
            .collect(),
    }
}

/// 100%-stacked area of the same per-gender data, plotting shares.
pub fn annual_by_gender_normalized_chart(rows: &[YearGenderCount]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::NormalizedArea,
        category_title: None,
        value_title: None,
        rows: rows
            .iter()
            .map(|r| ChartRow {
                label: r.year.to_string(),
                series: Some(r.gender.label().to_string()),
                value: r.percentage,
                tooltip: vec![
                    ("Year", r.year.to_string()),
                    ("Gender", r.gender.label().to_string()),
                    ("Count", format_thousands(r.count)),
                    ("Percentage", format_percent(r.percentage, 1)),
                ],
            })
            .collect(),
    }
}

/// Donut of latest-year cases per gender.
pub fn gender_split_chart(rows: &[GenderCount]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Arc,
        category_title: None,
        value_title: None,
        rows: rows
            .iter()
            .map(|r| ChartRow {
                label: r.gender.label().to_string(),
                series: Some(r.gender.label().to_string()),
                value: r.count as f64,
                tooltip: vec![
                    ("Type", r.gender.label().to_string()),
                    ("Count", format_thousands(r.count)),
                    ("Percentage", format_percent(r.percentage, 0)),
                ],
            })
            .collect(),
    }
}

/// Vertical bars of latest-year cases per age bracket, in bracket order.
pub fn age_profile_chart(rows: &[AgeCount]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        category_title: Some("Age Group"),
        value_title: Some("Count"),
        rows: rows
            .iter()
            .map(|r| ChartRow {
                label: r.age.clone(),
                series: None,
                value: r.count as f64,
                tooltip: vec![
                    ("Age Group", r.age.clone()),
                    ("Count", format_thousands(r.count)),
                ],
            })
            .collect(),
    }
}

/// Horizontal bars of the top cancer types, "Other" last.
pub fn type_ranking_chart(rows: &[TypeCount]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::HorizontalBar,
        category_title: None,
        value_title: None,
        rows: rows
            .iter()
            .map(|r| ChartRow {
                label: r.name.clone(),
                series: None,
                value: r.count as f64,
                tooltip: vec![
                    ("Type", r.name.clone()),
                    ("Count", format_thousands(r.count)),
                ],
            })
            .collect(),
    }
}

// =============================================================================
// Unit tests
// =============================================================================
