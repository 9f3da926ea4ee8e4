// OncoViz - core/tabulate.rs
//
// The tabulation engine: pure transformations from the base table and
// the current selection to chart-ready derived tables.
// Core layer: no I/O, no UI dependencies.
//
// Every view is a full batch recomputation; nothing here caches or
// mutates the base table.

use crate::core::model::{Dataset, Gender, IncidenceRecord, Selection};
use crate::util::constants::{OPEN_ENDED_AGE_BOUND, OTHER_LABEL, TREND_BASELINE_YEAR};
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// Derived table rows
// =============================================================================

/// One slice of the cancer-type share (donut) view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    /// Cancer type name, or the synthetic "Other" residual.
    pub name: String,

    /// Summed case count for this type.
    pub count: u64,

    /// Display ordering key. Real rows carry their own count; the
    /// "Other" row carries one less than the smallest count in the
    /// output so it sorts last even when its total is large.
    #[serde(skip)]
    pub sort_key: i64,

    /// Share of the total across all output rows. 0.0 when the total is 0.
    pub percentage: f64,
}

/// One bar of the cancer-type ranking view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    /// Cancer type name, or the synthetic "Other" residual.
    pub name: String,

    /// Summed case count for this type.
    pub count: u64,
}

/// Total detected cases for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// Detected cases for one (year, gender) pair, with the per-year total
/// and share attached for the normalized stacked view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGenderCount {
    pub year: i32,
    pub gender: Gender,
    pub count: u64,

    /// Sum of counts over all genders in this year.
    pub total: u64,

    /// count / total. 0.0 when the year total is 0.
    pub percentage: f64,
}

/// Latest-year cases for one gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderCount {
    pub gender: Gender,
    pub count: u64,

    /// Share of the latest-year grand total. 0.0 when the total is 0.
    pub percentage: f64,
}

/// Latest-year cases for one age bracket.
///
/// Rows are emitted in ascending lower-bound order; the bound itself is
/// a sort key only and never part of the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeCount {
    pub age: String,
    pub count: u64,
}

// =============================================================================
// Age bracket ordering
// =============================================================================

/// Numeric lower bound of an age-bracket label, for sort ordering.
///
/// `"40 - 44"` yields 40; `"85+"` and anything else without a parseable
/// `"L - U"` range yields the open-ended sentinel. There is no error
/// path: malformed labels are treated as open-ended-high.
pub fn age_lower_bound(label: &str) -> u32 {
    label
        .split(" - ")
        .next()
        .and_then(|prefix| prefix.trim().parse().ok())
        .unwrap_or(OPEN_ENDED_AGE_BOUND)
}

// =============================================================================
// Row restrictions
// =============================================================================

/// Latest-year records matching the current selection.
///
/// The year restriction always applies; the gender and age filters are
/// independent restrictions AND-combined on top of it.
pub fn latest_year_slice<'a>(
    dataset: &'a Dataset,
    selection: &Selection,
) -> Vec<&'a IncidenceRecord> {
    let latest = dataset.latest_year();
    dataset
        .records()
        .iter()
        .filter(|r| r.year == latest)
        .filter(|r| selection.gender.map_or(true, |g| r.gender == g))
        .filter(|r| selection.age.as_deref().map_or(true, |a| r.age == a))
        .collect()
}

/// Records strictly after the trend baseline year, for the time-series views.
pub fn trend_slice(dataset: &Dataset) -> Vec<&IncidenceRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| r.year > TREND_BASELINE_YEAR)
        .collect()
}

// =============================================================================
// Fold-into-Other views
// =============================================================================

/// Group records by cancer type and sum counts, descending by total.
/// Ties break alphabetically (the grouping map is ordered and the sort
/// is stable).
fn types_descending(records: &[&IncidenceRecord]) -> Vec<(String, u64)> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.name.as_str()).or_insert(0) += record.count;
    }
    let mut totals: Vec<(String, u64)> = groups
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Top cancer types with the residual fold, for the share (donut) view.
///
/// Keeps the `keep` largest types verbatim and folds every remaining
/// type into one synthetic "Other" row. "Other" is pinned to the end of
/// the display order by giving it a sort key strictly below the smallest
/// count in the output, rather than sorting by its own (possibly large)
/// count. No "Other" row is emitted when nothing was folded.
pub fn type_shares(records: &[&IncidenceRecord], keep: usize) -> Vec<TypeShare> {
    let totals = types_descending(records);

    let folded: u64 = totals.iter().skip(keep).map(|(_, count)| count).sum();
    let has_other = totals.len() > keep;

    let mut rows: Vec<TypeShare> = totals
        .into_iter()
        .take(keep)
        .map(|(name, count)| TypeShare {
            name,
            count,
            sort_key: count as i64,
            percentage: 0.0,
        })
        .collect();
    if has_other {
        rows.push(TypeShare {
            name: OTHER_LABEL.to_string(),
            count: folded,
            sort_key: 0,
            percentage: 0.0,
        });
    }

    // The "Other" sort key is derived from the smallest count in the
    // whole output, the folded row included.
    let min_count = rows.iter().map(|r| r.count).min().unwrap_or(0);
    for row in &mut rows {
        if row.name == OTHER_LABEL {
            row.sort_key = min_count as i64 - 1;
        }
    }
    rows.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));

    let total: u64 = rows.iter().map(|r| r.count).sum();
    if total > 0 {
        for row in &mut rows {
            row.percentage = row.count as f64 / total as f64;
        }
    }
    rows
}

/// Top cancer types with the residual fold, for the ranking (bar) view.
///
/// Same fold as `type_shares`, but "Other" is appended after the
/// descending sort purely by position. The two placement rules are
/// intentionally distinct and must not be unified.
pub fn type_ranking(records: &[&IncidenceRecord], keep: usize) -> Vec<TypeCount> {
    let totals = types_descending(records);

    let folded: u64 = totals.iter().skip(keep).map(|(_, count)| count).sum();
    let has_other = totals.len() > keep;

    let mut rows: Vec<TypeCount> = totals
        .into_iter()
        .take(keep)
        .map(|(name, count)| TypeCount { name, count })
        .collect();
    if has_other {
        rows.push(TypeCount {
            name: OTHER_LABEL.to_string(),
            count: folded,
        });
    }
    rows
}

// =============================================================================
// Time-series views
// =============================================================================

/// Total detected cases per year, ascending year order.
pub fn annual_totals(records: &[&IncidenceRecord]) -> Vec<YearCount> {
    let mut groups: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.year).or_insert(0) += record.count;
    }
    groups
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Detected cases per (year, gender), ascending year order, with the
/// per-year total and share attached to every row.
pub fn annual_totals_by_gender(records: &[&IncidenceRecord]) -> Vec<YearGenderCount> {
    let mut groups: BTreeMap<(i32, Gender), u64> = BTreeMap::new();
    let mut year_totals: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        *groups.entry((record.year, record.gender)).or_insert(0) += record.count;
        *year_totals.entry(record.year).or_insert(0) += record.count;
    }
    groups
        .into_iter()
        .map(|((year, gender), count)| {
            let total = year_totals[&year];
            YearGenderCount {
                year,
                gender,
                count,
                total,
                percentage: if total > 0 {
                    count as f64 / total as f64
                } else {
                    0.0
                },
            }
        })
        .collect()
}

// =============================================================================
// Latest-year breakdowns
// =============================================================================

/// Latest-year cases per gender with share of the grand total.
pub fn gender_split(records: &[&IncidenceRecord]) -> Vec<GenderCount> {
    let mut groups: BTreeMap<Gender, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.gender).or_insert(0) += record.count;
    }
    let grand_total: u64 = groups.values().sum();
    groups
        .into_iter()
        .map(|(gender, count)| GenderCount {
            gender,
            count,
            percentage: if grand_total > 0 {
                count as f64 / grand_total as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Latest-year cases per age bracket, ascending by bracket lower bound.
pub fn age_profile(records: &[&IncidenceRecord]) -> Vec<AgeCount> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.age.as_str()).or_insert(0) += record.count;
    }
    let mut rows: Vec<AgeCount> = groups
        .into_iter()
        .map(|(age, count)| AgeCount {
            age: age.to_string(),
            count,
        })
        .collect();
    rows.sort_by_key(|row| age_lower_bound(&row.age));
    rows
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Dataset, Gender, IncidenceRecord, Selection};

    fn rec(year: i32, gender: Gender, age: &str, name: &str, count: u64) -> IncidenceRecord {
        IncidenceRecord {
            year,
            gender,
            age: age.to_string(),
            name: name.to_string(),
            count,
        }
    }

    fn refs(records: &[IncidenceRecord]) -> Vec<&IncidenceRecord> {
        records.iter().collect()
    }

    // -------------------------------------------------------------------------
    // age_lower_bound
    // -------------------------------------------------------------------------

    #[test]
    fn test_age_lower_bound_parses_closed_brackets() {
        assert_eq!(age_lower_bound("40 - 44"), 40);
        assert_eq!(age_lower_bound("0 - 4"), 0);
        assert_eq!(age_lower_bound("5 - 9"), 5);
    }

    #[test]
    fn test_age_lower_bound_open_ended_is_sentinel() {
        assert_eq!(age_lower_bound("85+"), 85);
    }

    #[test]
    fn test_age_lower_bound_malformed_is_sentinel() {
        // No separator, wrong separator, or garbage all map to the
        // open-ended bound rather than erroring.
        assert_eq!(age_lower_bound("unknown"), 85);
        assert_eq!(age_lower_bound("40-44"), 85);
        assert_eq!(age_lower_bound(""), 85);
    }

    // -------------------------------------------------------------------------
    // latest_year_slice
    // -------------------------------------------------------------------------

    #[test]
    fn test_latest_year_slice_restricts_to_latest_year() {
        let ds = Dataset::new(vec![
            rec(2019, Gender::Male, "40 - 44", "Lung", 4),
            rec(2020, Gender::Male, "40 - 44", "Lung", 10),
            rec(2020, Gender::Female, "40 - 44", "Breast", 6),
        ]);
        let rows = latest_year_slice(&ds, &Selection::default());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.year == 2020));
    }

    #[test]
    fn test_latest_year_slice_filters_compose_as_conjunction() {
        let ds = Dataset::new(vec![
            rec(2020, Gender::Male, "40 - 44", "Lung", 10),
            rec(2020, Gender::Male, "85+", "Lung", 2),
            rec(2020, Gender::Female, "40 - 44", "Breast", 6),
        ]);
        let sel = Selection {
            gender: Some(Gender::Male),
            age: Some("40 - 44".to_string()),
        };
        let rows = latest_year_slice(&ds, &sel);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Lung");
        assert_eq!(rows[0].count, 10);
    }

    #[test]
    fn test_latest_year_slice_no_match_is_empty() {
        let ds = Dataset::new(vec![rec(2020, Gender::Male, "40 - 44", "Lung", 10)]);
        let sel = Selection {
            gender: Some(Gender::Female),
            age: None,
        };
        assert!(latest_year_slice(&ds, &sel).is_empty());
    }

    // -------------------------------------------------------------------------
    // type_shares
    // -------------------------------------------------------------------------

    #[test]
    fn test_type_shares_end_to_end_scenario() {
        // Three records, two types, well under the keep limit: no
        // "Other" row, percentages split 15/18 and 3/18.
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "Lung", 10),
            rec(2020, Gender::Female, "40 - 44", "Lung", 5),
            rec(2020, Gender::Male, "40 - 44", "Skin", 3),
        ];
        let rows = type_shares(&refs(&records), 9);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Lung");
        assert_eq!(rows[0].count, 15);
        assert!((rows[0].percentage - 15.0 / 18.0).abs() < 1e-9);
        assert_eq!(rows[1].name, "Skin");
        assert_eq!(rows[1].count, 3);
        assert!((rows[1].percentage - 3.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_type_shares_folds_excess_types_into_other() {
        let records: Vec<IncidenceRecord> = (0..5)
            .map(|i| {
                rec(
                    2020,
                    Gender::Male,
                    "40 - 44",
                    &format!("Type{i}"),
                    10 - i as u64,
                )
            })
            .collect();
        let rows = type_shares(&refs(&records), 3);

        // 3 kept + 1 Other
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].name, "Other");
        // Folded: the two smallest groups (7 + 6)
        assert_eq!(rows[3].count, 13);
    }

    #[test]
    fn test_type_shares_conservation_law() {
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 12),
            rec(2020, Gender::Male, "40 - 44", "B", 9),
            rec(2020, Gender::Female, "40 - 44", "C", 7),
            rec(2020, Gender::Female, "40 - 44", "D", 4),
            rec(2020, Gender::Male, "85+", "E", 1),
        ];
        let input_total: u64 = records.iter().map(|r| r.count).sum();
        for keep in 0..=6 {
            let rows = type_shares(&refs(&records), keep);
            let output_total: u64 = rows.iter().map(|r| r.count).sum();
            assert_eq!(output_total, input_total, "keep={keep}");
            assert!(rows.len() <= keep + 1, "keep={keep}");
        }
    }

    #[test]
    fn test_type_shares_other_sorts_last_even_when_largest() {
        // Many small types fold into an "Other" bigger than every kept
        // row. The synthetic sort key must still pin it to the end.
        let mut records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 10),
            rec(2020, Gender::Male, "40 - 44", "B", 8),
        ];
        for i in 0..6 {
            records.push(rec(2020, Gender::Male, "40 - 44", &format!("Small{i}"), 7));
        }
        let rows = type_shares(&refs(&records), 2);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.last().unwrap().name, "Other");
        assert_eq!(rows.last().unwrap().count, 42);
        assert!(rows.last().unwrap().count > rows[0].count);
        // Sort key sits strictly below the smallest kept count.
        assert_eq!(rows.last().unwrap().sort_key, 7);
    }

    #[test]
    fn test_type_shares_percentages_sum_to_one() {
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 5),
            rec(2020, Gender::Male, "40 - 44", "B", 3),
            rec(2020, Gender::Female, "40 - 44", "C", 2),
        ];
        let rows = type_shares(&refs(&records), 2);
        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_type_shares_empty_input() {
        let rows = type_shares(&[], 9);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_type_shares_zero_counts_have_zero_percentage() {
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 0),
            rec(2020, Gender::Male, "40 - 44", "B", 0),
        ];
        let rows = type_shares(&refs(&records), 9);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.percentage == 0.0));
    }

    // -------------------------------------------------------------------------
    // type_ranking
    // -------------------------------------------------------------------------

    #[test]
    fn test_type_ranking_kept_rows_descending_other_appended() {
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 3),
            rec(2020, Gender::Male, "40 - 44", "B", 9),
            rec(2020, Gender::Female, "40 - 44", "C", 6),
            rec(2020, Gender::Female, "40 - 44", "D", 1),
        ];
        let rows = type_ranking(&refs(&records), 2);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], TypeCount { name: "B".into(), count: 9 });
        assert_eq!(rows[1], TypeCount { name: "C".into(), count: 6 });
        assert_eq!(rows[2], TypeCount { name: "Other".into(), count: 4 });
    }

    #[test]
    fn test_type_ranking_no_other_when_nothing_folded() {
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 3),
            rec(2020, Gender::Male, "40 - 44", "B", 9),
        ];
        let rows = type_ranking(&refs(&records), 20);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.name != "Other"));
    }

    #[test]
    fn test_type_ranking_conservation_law() {
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 3),
            rec(2020, Gender::Male, "40 - 44", "B", 9),
            rec(2020, Gender::Female, "40 - 44", "C", 6),
        ];
        let rows = type_ranking(&refs(&records), 1);
        let total: u64 = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, 18);
    }

    // -------------------------------------------------------------------------
    // annual totals
    // -------------------------------------------------------------------------

    #[test]
    fn test_annual_totals_ascending_years() {
        let records = vec![
            rec(2006, Gender::Male, "40 - 44", "A", 3),
            rec(2004, Gender::Male, "40 - 44", "A", 1),
            rec(2004, Gender::Female, "40 - 44", "B", 2),
            rec(2005, Gender::Male, "40 - 44", "A", 5),
        ];
        let rows = annual_totals(&refs(&records));
        assert_eq!(
            rows,
            vec![
                YearCount { year: 2004, count: 3 },
                YearCount { year: 2005, count: 5 },
                YearCount { year: 2006, count: 3 },
            ]
        );
    }

    #[test]
    fn test_trend_slice_excludes_baseline_and_earlier() {
        let ds = Dataset::new(vec![
            rec(2002, Gender::Male, "40 - 44", "A", 1),
            rec(2003, Gender::Male, "40 - 44", "A", 1),
            rec(2004, Gender::Male, "40 - 44", "A", 1),
        ]);
        let rows = trend_slice(&ds);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2004);
    }

    #[test]
    fn test_annual_totals_by_gender_percentages_sum_per_year() {
        let records = vec![
            rec(2004, Gender::Male, "40 - 44", "A", 30),
            rec(2004, Gender::Female, "40 - 44", "B", 70),
            rec(2005, Gender::Male, "40 - 44", "A", 12),
            rec(2005, Gender::Female, "40 - 44", "B", 4),
        ];
        let rows = annual_totals_by_gender(&refs(&records));
        assert_eq!(rows.len(), 4);

        for year in [2004, 2005] {
            let sum: f64 = rows
                .iter()
                .filter(|r| r.year == year)
                .map(|r| r.percentage)
                .sum();
            assert!((sum - 1.0).abs() < 1e-9, "year {year}");
        }

        // Totals are per-year, attached to every row of that year.
        assert!(rows
            .iter()
            .filter(|r| r.year == 2004)
            .all(|r| r.total == 100));
        assert!(rows.iter().filter(|r| r.year == 2005).all(|r| r.total == 16));
    }

    #[test]
    fn test_annual_totals_by_gender_single_gender_year() {
        let records = vec![rec(2004, Gender::Female, "40 - 44", "B", 7)];
        let rows = annual_totals_by_gender(&refs(&records));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].gender, Gender::Female);
        assert!((rows[0].percentage - 1.0).abs() < 1e-9);
    }

    // -------------------------------------------------------------------------
    // gender_split
    // -------------------------------------------------------------------------

    #[test]
    fn test_gender_split_shares_of_grand_total() {
        let records = vec![
            rec(2020, Gender::Male, "40 - 44", "A", 25),
            rec(2020, Gender::Female, "40 - 44", "B", 75),
            rec(2020, Gender::Male, "85+", "C", 0),
        ];
        let rows = gender_split(&refs(&records));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].gender, Gender::Male);
        assert!((rows[0].percentage - 0.25).abs() < 1e-9);
        assert_eq!(rows[1].gender, Gender::Female);
        assert!((rows[1].percentage - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_gender_split_empty_input() {
        assert!(gender_split(&[]).is_empty());
    }

    // -------------------------------------------------------------------------
    // age_profile
    // -------------------------------------------------------------------------

    #[test]
    fn test_age_profile_ordered_by_lower_bound() {
        let records = vec![
            rec(2020, Gender::Male, "10 - 14", "A", 2),
            rec(2020, Gender::Male, "0 - 4", "A", 1),
            rec(2020, Gender::Female, "85+", "B", 3),
            rec(2020, Gender::Female, "10 - 14", "B", 4),
        ];
        let rows = age_profile(&refs(&records));
        let labels: Vec<&str> = rows.iter().map(|r| r.age.as_str()).collect();
        assert_eq!(labels, vec!["0 - 4", "10 - 14", "85+"]);
        assert_eq!(rows[1].count, 6);
    }
}
