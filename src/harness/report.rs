//! Writes the per-question results as CSV.
use super::OutcomeRecord;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Sorts by database, category then question and writes a header plus one line per record.
pub fn write_report<W: Write>(writer: W, records: &mut [OutcomeRecord]) -> Result<(), ReportError> {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut writer = csv::Writer::from_writer(writer);
    for record in records.iter() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_report_file(path: &Path, records: &mut [OutcomeRecord]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_report(file, records)
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    CsvError(#[from] csv::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
