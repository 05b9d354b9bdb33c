//! CSV persistence
//!
//! UTF-8, comma separated, header row first.

use crate::output::records::CsvRecord;
use crate::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Writes `records` to `path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written
/// * `Err(ExportError)` - The file could not be created or written
pub fn write_records<T: CsvRecord>(path: &Path, records: &[T]) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());

    Ok(records.len())
}

/// Reads rows written by [`write_records`]
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}
