// OncoViz - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::core::tabulate::age_lower_bound;
use serde::{Deserialize, Serialize};

// =============================================================================
// Incidence record (one row of the source table)
// =============================================================================

/// A single row of the registry extract: the aggregated case count for
/// one (year, gender, age group, cancer type) combination.
///
/// The source table carries exactly one record per combination; OncoViz
/// never writes back to it, it only derives views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidenceRecord {
    /// Diagnosis year.
    #[serde(rename = "Year")]
    pub year: i32,

    /// Patient gender as recorded by the registry.
    #[serde(rename = "Gender")]
    pub gender: Gender,

    /// Age bracket label, e.g. "40 - 44" or the open-ended "85+".
    #[serde(rename = "Age")]
    pub age: String,

    /// Cancer type name, e.g. "Lung" or "Breast".
    #[serde(rename = "Name")]
    pub name: String,

    /// Number of cases detected for this combination.
    #[serde(rename = "Count")]
    pub count: u64,
}

// =============================================================================
// Gender
// =============================================================================

/// Gender dimension of the registry extract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns all variants in display order.
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Dataset (the base table)
// =============================================================================

/// The in-memory base table. Read-only after load.
///
/// Construction precomputes the two implicit inputs every render pass
/// needs: the latest year present in the data and the distinct age
/// labels in ascending lower-bound order (the order the Age selector
/// and the age-profile chart both use).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<IncidenceRecord>,
    latest_year: i32,
    age_groups: Vec<String>,
}

impl Dataset {
    /// Build a dataset from loaded records.
    pub fn new(records: Vec<IncidenceRecord>) -> Self {
        let latest_year = records.iter().map(|r| r.year).max().unwrap_or(0);

        let mut age_groups: Vec<String> = Vec::new();
        for record in &records {
            if !age_groups.contains(&record.age) {
                age_groups.push(record.age.clone());
            }
        }
        // Brackets sort by their numeric lower bound, not lexicographically
        // ("5 - 9" must come before "10 - 14").
        age_groups.sort_by_key(|label| age_lower_bound(label));

        Self {
            records,
            latest_year,
            age_groups,
        }
    }

    /// All records, every year.
    pub fn records(&self) -> &[IncidenceRecord] {
        &self.records
    }

    /// The most recent year present in the data (0 for an empty dataset).
    pub fn latest_year(&self) -> i32 {
        self.latest_year
    }

    /// Distinct age-bracket labels in ascending lower-bound order.
    pub fn age_groups(&self) -> &[String] {
        &self.age_groups
    }

    /// Number of records in the base table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the base table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Selection (the two user-facing selectors)
// =============================================================================

/// Selector state for the latest-year share view.
///
/// Both filters are AND-combined when applied; `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Restrict to one gender. `None` = all genders.
    pub gender: Option<Gender>,

    /// Restrict to one age bracket by exact label. `None` = all brackets.
    pub age: Option<String>,
}

impl Selection {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.gender.is_none() && self.age.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, gender: Gender, age: &str, name: &str, count: u64) -> IncidenceRecord {
        IncidenceRecord {
            year,
            gender,
            age: age.to_string(),
            name: name.to_string(),
            count,
        }
    }

    #[test]
    fn test_latest_year_is_max_year() {
        let ds = Dataset::new(vec![
            rec(2018, Gender::Male, "40 - 44", "Lung", 3),
            rec(2020, Gender::Female, "40 - 44", "Breast", 7),
            rec(2019, Gender::Male, "85+", "Skin", 1),
        ]);
        assert_eq!(ds.latest_year(), 2020);
    }

    #[test]
    fn test_empty_dataset_latest_year_is_zero() {
        let ds = Dataset::new(Vec::new());
        assert_eq!(ds.latest_year(), 0);
        assert!(ds.is_empty());
        assert!(ds.age_groups().is_empty());
    }

    #[test]
    fn test_age_groups_deduplicated_and_ordered_by_lower_bound() {
        let ds = Dataset::new(vec![
            rec(2020, Gender::Male, "10 - 14", "Lung", 1),
            rec(2020, Gender::Male, "0 - 4", "Lung", 1),
            rec(2020, Gender::Female, "85+", "Breast", 1),
            rec(2020, Gender::Female, "0 - 4", "Breast", 1),
        ]);
        assert_eq!(ds.age_groups(), &["0 - 4", "10 - 14", "85+"]);
    }

    #[test]
    fn test_selection_is_empty() {
        assert!(Selection::default().is_empty());
        let sel = Selection {
            gender: Some(Gender::Female),
            age: None,
        };
        assert!(!sel.is_empty());
    }
}
