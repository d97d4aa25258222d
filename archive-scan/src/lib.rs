//! ZIP archive scanning for pre-computed answers.
//!
//! Graded-assignment uploads sometimes ship a CSV whose `answer` column
//! already contains the value the caller is looking for. [`scan`] extracts a
//! ZIP payload into a scoped temporary directory, walks the entries in
//! archive order, and returns the first data row's value of the first CSV
//! that carries such a column.
//!
//! The temporary directory is removed on every exit path (success, no match,
//! or parse failure) via `tempfile::TempDir` RAII.

use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

/// Header name that marks a CSV column as a pre-computed answer.
pub const ANSWER_COLUMN: &str = "answer";

/// Errors produced while scanning an uploaded archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The payload could not be opened as a ZIP container.
    ///
    /// Callers usually treat this as "no answer found" and fall through to
    /// the model path instead of failing the request.
    #[error("[Archive Scan] payload is not a readable ZIP archive: {0}")]
    InvalidArchive(String),

    /// Filesystem error while extracting an entry.
    #[error("[Archive Scan] io error: {0}")]
    Io(#[from] io::Error),

    /// A CSV entry could not be parsed.
    #[error("[Archive Scan] csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for archive scanning.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Scans `archive_bytes` for a CSV entry with an [`ANSWER_COLUMN`] column.
///
/// Entries are visited in the enumeration order produced by the archive.
/// Only entries whose name ends in `.csv` are considered; the first one whose
/// header row contains a column literally named `answer` wins, and the result
/// is the textual value of the first data row in that column, passed through
/// exactly as it appears in the file.
///
/// A CSV that fails to parse or lacks the column is skipped with a warning.
/// Entries whose path would escape the extraction root are skipped as well.
///
/// # Errors
/// - [`ArchiveError::InvalidArchive`] if the bytes are not a ZIP container
/// - [`ArchiveError::Io`] on extraction failures
pub fn scan(archive_bytes: &[u8]) -> Result<Option<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes))
        .map_err(|e| ArchiveError::InvalidArchive(e.to_string()))?;

    // All extracted content lives under this directory; dropped on return.
    let extract_dir = tempfile::tempdir()?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ArchiveError::InvalidArchive(e.to_string()))?;
        if entry.is_dir() || !entry.name().ends_with(".csv") {
            continue;
        }

        // Entries without an enclosed name would extract outside the root.
        let Some(relative) = entry.enclosed_name() else {
            warn!(entry = entry.name(), "skipping entry with unsafe path");
            continue;
        };

        let target = extract_dir.path().join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        drop(out);

        match first_answer_in_csv(&target) {
            Ok(Some(answer)) => {
                debug!(entry = entry.name(), "found answer column in archive entry");
                return Ok(Some(answer));
            }
            Ok(None) => continue,
            Err(err) => {
                warn!(
                    entry = entry.name(),
                    error = %err,
                    "failed to parse CSV entry; skipping"
                );
                continue;
            }
        }
    }

    Ok(None)
}

/// Reads one CSV file and returns the first data row's value in the
/// [`ANSWER_COLUMN`] column, or `None` when the column (or any data row)
/// is missing.
fn first_answer_in_csv(path: &Path) -> Result<Option<String>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let Some(column) = headers.iter().position(|h| h == ANSWER_COLUMN) else {
        return Ok(None);
    };

    match reader.records().next() {
        Some(record) => {
            let record = record?;
            Ok(record.get(column).map(str::to_string))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn finds_answer_in_csv() {
        let bytes = zip_with(&[("answers.csv", "answer,other_column\n42,some data\n")]);
        assert_eq!(scan(&bytes).unwrap(), Some("42".to_string()));
    }

    #[test]
    fn answer_value_is_passed_through_exactly() {
        let bytes = zip_with(&[("answers.csv", "answer\n 0042.0 \n")]);
        assert_eq!(scan(&bytes).unwrap(), Some(" 0042.0 ".to_string()));
    }

    #[test]
    fn takes_first_data_row_only() {
        let bytes = zip_with(&[("answers.csv", "answer\nfirst\nsecond\n")]);
        assert_eq!(scan(&bytes).unwrap(), Some("first".to_string()));
    }

    #[test]
    fn finds_csv_in_nested_directory() {
        let bytes = zip_with(&[
            ("readme.txt", "nothing here"),
            ("data/inner.csv", "x,answer\n1,nested\n"),
        ]);
        assert_eq!(scan(&bytes).unwrap(), Some("nested".to_string()));
    }

    #[test]
    fn skips_csv_without_answer_column() {
        let bytes = zip_with(&[
            ("first.csv", "a,b\n1,2\n"),
            ("second.csv", "answer,b\nlater,2\n"),
        ]);
        assert_eq!(scan(&bytes).unwrap(), Some("later".to_string()));
    }

    #[test]
    fn no_csv_yields_none() {
        let bytes = zip_with(&[("notes.txt", "plain text")]);
        assert_eq!(scan(&bytes).unwrap(), None);
    }

    #[test]
    fn columnless_archive_yields_none() {
        let bytes = zip_with(&[("table.csv", "a,b\n1,2\n")]);
        assert_eq!(scan(&bytes).unwrap(), None);
    }

    #[test]
    fn csv_with_headers_but_no_rows_yields_none() {
        let bytes = zip_with(&[("empty.csv", "answer,b\n")]);
        assert_eq!(scan(&bytes).unwrap(), None);
    }

    #[test]
    fn non_zip_bytes_are_invalid_archive() {
        let err = scan(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));
    }
}
