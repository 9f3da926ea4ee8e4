// OncoViz - tests/e2e_dashboard.rs
//
// End-to-end tests for the full dashboard pipeline.
//
// These tests exercise the real filesystem, real CSV deserialisation,
// and the real tabulation engine — no mocks, no stubs. This is the full
// path from a registry extract on disk to the derived tables every chart
// renders from.

use oncoviz::app::state::DerivedTables;
use oncoviz::core::loader::load_csv;
use oncoviz::core::model::{Gender, Selection};
use oncoviz::core::{export, tabulate};
use oncoviz::util::error::DataError;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The fixture's grand total for its latest year (2020).
const LATEST_YEAR_TOTAL: u64 = 4740;

// =============================================================================
// Loading E2E
// =============================================================================

/// Loading the fixture should yield every row with no skips.
#[test]
fn e2e_loads_fixture_without_skips() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();

    assert_eq!(outcome.rows_skipped, 0);
    assert_eq!(outcome.dataset.len(), 22);
    assert_eq!(outcome.dataset.latest_year(), 2020);
}

/// Loading a nonexistent path returns FileNotFound.
#[test]
fn e2e_missing_data_file_returns_error() {
    let result = load_csv(&fixture("no-such-file.csv"));
    assert!(
        matches!(result, Err(DataError::FileNotFound { .. })),
        "expected FileNotFound, got {result:?}"
    );
}

/// Age groups come out of the dataset in ascending lower-bound order,
/// not lexicographic order ("5 - 9" before "10 - 14"-style brackets).
#[test]
fn e2e_age_groups_sorted_by_lower_bound() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();

    let groups = outcome.dataset.age_groups();
    assert_eq!(groups.first().map(String::as_str), Some("0 - 4"));
    assert_eq!(groups.last().map(String::as_str), Some("85+"));

    let bounds: Vec<u32> = groups
        .iter()
        .map(|g| tabulate::age_lower_bound(g))
        .collect();
    let mut sorted = bounds.clone();
    sorted.sort_unstable();
    assert_eq!(bounds, sorted, "age groups must be in ascending bound order");
}

// =============================================================================
// Derived tables E2E
// =============================================================================

/// With no selection, the share view folds the 12 fixture types into
/// 9 kept slices plus "Other", pinned last despite its large count.
#[test]
fn e2e_share_view_top_nine_plus_other() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let tables = DerivedTables::compute(&outcome.dataset, &Selection::default());

    assert_eq!(tables.type_shares.len(), 10);
    assert_eq!(tables.type_shares[0].name, "Breast");
    assert_eq!(tables.type_shares[0].count, 900);

    let other = tables.type_shares.last().unwrap();
    assert_eq!(other.name, "Other");
    // Stomach (90) + Thyroid (80) + Liver (70)
    assert_eq!(other.count, 240);
    // "Other" outweighs the smallest kept type (Kidney, 100) yet still
    // sorts last.
    assert!(other.count > tables.type_shares[8].count);

    let total: u64 = tables.type_shares.iter().map(|r| r.count).sum();
    assert_eq!(total, LATEST_YEAR_TOTAL, "fold must conserve the total");

    let percentage_sum: f64 = tables.type_shares.iter().map(|r| r.percentage).sum();
    assert!((percentage_sum - 1.0).abs() < 1e-9);
}

/// The ranking view keeps all 12 types (fewer than 20) with no "Other".
#[test]
fn e2e_ranking_view_keeps_all_types_below_cut() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let tables = DerivedTables::compute(&outcome.dataset, &Selection::default());

    assert_eq!(tables.type_ranking.len(), 12);
    assert!(tables.type_ranking.iter().all(|r| r.name != "Other"));
    assert_eq!(tables.type_ranking[0].name, "Breast");
    assert_eq!(tables.type_ranking[11].name, "Liver");

    // Descending by count throughout.
    for pair in tables.type_ranking.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
}

/// The trend views only see years after the baseline.
#[test]
fn e2e_annual_totals_start_after_baseline() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let tables = DerivedTables::compute(&outcome.dataset, &Selection::default());

    let years: Vec<i32> = tables.annual.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2004, 2010, 2020], "2002/2003 must be excluded");

    let counts: Vec<u64> = tables.annual.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![450, 650, LATEST_YEAR_TOTAL]);
}

/// Per-year gender shares sum to 1.0 and carry the per-year total.
#[test]
fn e2e_gender_trend_shares_per_year() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let tables = DerivedTables::compute(&outcome.dataset, &Selection::default());

    let year_2004: Vec<_> = tables
        .annual_by_gender
        .iter()
        .filter(|r| r.year == 2004)
        .collect();
    assert_eq!(year_2004.len(), 2);
    assert!(year_2004.iter().all(|r| r.total == 450));

    let male = year_2004.iter().find(|r| r.gender == Gender::Male).unwrap();
    assert_eq!(male.count, 200);
    assert!((male.percentage - 200.0 / 450.0).abs() < 1e-9);

    for year in [2004, 2010, 2020] {
        let sum: f64 = tables
            .annual_by_gender
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.percentage)
            .sum();
        assert!((sum - 1.0).abs() < 1e-9, "year {year}");
    }
}

/// Latest-year gender split against hand-computed fixture totals.
#[test]
fn e2e_gender_split_latest_year() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let tables = DerivedTables::compute(&outcome.dataset, &Selection::default());

    assert_eq!(tables.gender_split.len(), 2);
    let male = &tables.gender_split[0];
    let female = &tables.gender_split[1];
    assert_eq!(male.gender, Gender::Male);
    assert_eq!(male.count, 2510);
    assert_eq!(female.count, 2230);
    assert!((male.percentage - 2510.0 / LATEST_YEAR_TOTAL as f64).abs() < 1e-9);
}

/// Age profile covers every bracket of the latest year in bound order.
#[test]
fn e2e_age_profile_latest_year() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let tables = DerivedTables::compute(&outcome.dataset, &Selection::default());

    assert_eq!(tables.age_profile.first().unwrap().age, "0 - 4");
    assert_eq!(tables.age_profile.last().unwrap().age, "85+");

    let bracket_40 = tables
        .age_profile
        .iter()
        .find(|r| r.age == "40 - 44")
        .unwrap();
    // Lung (500 + 300) + Skin (200), 2020 only.
    assert_eq!(bracket_40.count, 1000);

    let total: u64 = tables.age_profile.iter().map(|r| r.count).sum();
    assert_eq!(total, LATEST_YEAR_TOTAL);
}

// =============================================================================
// Selection E2E
// =============================================================================

/// Restricting to one gender and one age bracket narrows only the share
/// view, which then covers exactly the matching records.
#[test]
fn e2e_selection_narrows_share_view_only() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();

    let unfiltered = DerivedTables::compute(&outcome.dataset, &Selection::default());
    let selection = Selection {
        gender: Some(Gender::Female),
        age: Some("40 - 44".to_string()),
    };
    let filtered = DerivedTables::compute(&outcome.dataset, &selection);

    // Only female Lung cases in 40 - 44 in 2020.
    assert_eq!(filtered.type_shares.len(), 1);
    assert_eq!(filtered.type_shares[0].name, "Lung");
    assert_eq!(filtered.type_shares[0].count, 300);
    assert!((filtered.type_shares[0].percentage - 1.0).abs() < 1e-9);

    // Every other view is untouched by the selection.
    assert_eq!(filtered.annual, unfiltered.annual);
    assert_eq!(filtered.type_ranking, unfiltered.type_ranking);
    assert_eq!(filtered.age_profile, unfiltered.age_profile);
    assert_eq!(filtered.gender_split, unfiltered.gender_split);
}

/// A selection matching nothing yields an empty share table, not a panic.
#[test]
fn e2e_empty_selection_result_is_empty_table() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let selection = Selection {
        gender: Some(Gender::Female),
        age: Some("75 - 79".to_string()), // only males in this bracket
    };
    let tables = DerivedTables::compute(&outcome.dataset, &selection);
    assert!(tables.type_shares.is_empty());
}

// =============================================================================
// Export E2E
// =============================================================================

/// The share table exports to CSV with its columns and the Other row.
#[test]
fn e2e_share_table_csv_export() {
    let outcome = load_csv(&fixture("incidence_sample.csv")).unwrap();
    let tables = DerivedTables::compute(&outcome.dataset, &Selection::default());

    let mut buf = Vec::new();
    let count =
        export::export_csv(&tables.type_shares, &mut buf, &PathBuf::from("out.csv")).unwrap();
    assert_eq!(count, 10);

    let output = String::from_utf8(buf).unwrap();
    assert!(output.starts_with("name,count,percentage"));
    assert!(output.contains("Breast,900,"));
    assert!(output.contains("Other,240,"));
}
