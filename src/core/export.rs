// OncoViz - core/export.rs
//
// CSV and JSON export of derived tables.
// Core layer: writes to any Write trait object; generic over the row
// type so every derived view exports through the same two functions.

use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Export derived-table rows to CSV. Column headers come from the row
/// type's field names. Returns the number of rows written.
pub fn export_csv<W: Write, T: Serialize>(
    rows: &[T],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        csv_writer.serialize(row).map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(rows.len())
}

/// Export derived-table rows to JSON (array of objects).
pub fn export_json<W: Write, T: Serialize>(
    rows: &[T],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}

/// Default export file stem, stamped with the current date so repeated
/// exports do not overwrite each other, e.g. "oncoviz-2026-08-06".
pub fn default_export_stem() -> String {
    format!("oncoviz-{}", chrono::Local::now().format("%Y-%m-%d"))
}
