// OncoViz - core/loader.rs
//
// CSV loading of the incidence base table.
//
// Column contract: Year, Gender, Age, Name, Count. Malformed rows are
// skipped and counted, never fatal; a file that yields zero usable
// records is an error because the dashboard would have nothing to show.

use crate::core::model::{Dataset, IncidenceRecord};
use crate::util::constants::{MAX_LOGGED_SKIPS, MAX_RECORDS};
use crate::util::error::DataError;
use std::path::Path;

/// Result of a completed load: the dataset plus the number of rows that
/// failed the column contract and were dropped.
#[derive(Debug)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub rows_skipped: usize,
}

/// Load the base table from a CSV file.
pub fn load_csv(path: &Path) -> Result<LoadOutcome, DataError> {
    if !path.is_file() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut records: Vec<IncidenceRecord> = Vec::new();
    let mut rows_skipped = 0usize;

    for (row_index, result) in reader.deserialize::<IncidenceRecord>().enumerate() {
        match result {
            Ok(record) => {
                if records.len() >= MAX_RECORDS {
                    return Err(DataError::TooManyRecords {
                        path: path.to_path_buf(),
                        max: MAX_RECORDS,
                    });
                }
                records.push(record);
            }
            Err(e) => {
                rows_skipped += 1;
                if rows_skipped <= MAX_LOGGED_SKIPS {
                    // +2: one for the header, one for 1-based numbering.
                    tracing::warn!(
                        path = %path.display(),
                        line = row_index + 2,
                        error = %e,
                        "Skipping malformed row"
                    );
                }
            }
        }
    }

    if rows_skipped > MAX_LOGGED_SKIPS {
        tracing::warn!(
            path = %path.display(),
            rows_skipped,
            "Further malformed rows suppressed from the log"
        );
    }

    if records.is_empty() {
        return Err(DataError::NoRecords {
            path: path.to_path_buf(),
            rows_skipped,
        });
    }

    let dataset = Dataset::new(records);
    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        rows_skipped,
        latest_year = dataset.latest_year(),
        age_groups = dataset.age_groups().len(),
        "Dataset loaded"
    );

    Ok(LoadOutcome {
        dataset,
        rows_skipped,
    })
}
