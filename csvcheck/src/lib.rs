//! # CSV row validation
//!
//! Checks rows of a `;`-delimited, UTF-16 encoded CSV export against a regex
//! per column. [`read_rows`] loads the file (header skipped), and
//! [`ColumnChecks::find_invalid`] returns the 0-based indices of the rows
//! that fail.
//!
//! Matching rules, kept from the legacy checker:
//!
//! - a pattern matches from the *start* of its field, not anywhere inside it;
//! - columns are compared in pattern declaration order;
//! - when a row and the pattern list have different lengths, only the
//!   overlapping prefix is compared.
//!
//! Unreadable or undecodable input is a [`ReportError`], so callers can tell
//! a broken file apart from a clean one.

use std::fs;
use std::path::Path;

use regex::Regex;
use thiserror::Error;

/// Why the report file could not be checked.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-16")]
    Decode { path: String },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("bad pattern for column `{column}`: {source}")]
    Pattern {
        column: String,
        #[source]
        source: regex::Error,
    },
}

/// Per-column regex checks, applied in declaration order.
#[derive(Debug)]
pub struct ColumnChecks {
    columns: Vec<(String, Regex)>,
}

impl ColumnChecks {
    /// Compile `(column, pattern)` pairs. Each pattern is anchored to the
    /// start of its field.
    pub fn compile<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ReportError> {
        let mut columns = Vec::new();
        for (column, pattern) in pairs {
            let regex = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|source| {
                ReportError::Pattern {
                    column: column.to_string(),
                    source,
                }
            })?;
            columns.push((column.to_string(), regex));
        }
        Ok(Self { columns })
    }

    /// True iff every column, zipped with the row, matches its pattern.
    /// Differing lengths compare only the overlapping prefix.
    pub fn validate_row(&self, row: &[String]) -> bool {
        self.columns
            .iter()
            .zip(row)
            .all(|((_, regex), field)| regex.is_match(field))
    }

    /// 0-based indices (post-header, in row order) of rows failing validation.
    pub fn find_invalid(&self, rows: &[Vec<String>]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| !self.validate_row(row))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Read a `;`-delimited UTF-16 file, skipping the header row. Rows may have
/// differing widths; the whole file is read in one go.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>, ReportError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    // A BOM wins if present; BOM-less input is taken as little-endian.
    let (text, _, had_errors) = encoding_rs::UTF_16LE.decode(&bytes);
    if had_errors {
        return Err(ReportError::Decode {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn digit_and_upper() -> ColumnChecks {
        ColumnChecks::compile([("a", r"^\d+$"), ("b", r"^[A-Z]+$")]).unwrap()
    }

    #[test]
    fn find_invalid_flags_failing_rows() {
        let checks = digit_and_upper();
        let data = rows(&[&["12", "AB"], &["1x", "AB"]]);
        assert_eq!(checks.find_invalid(&data), [1]);
    }

    #[test]
    fn all_valid_yields_no_indices() {
        let checks = digit_and_upper();
        let data = rows(&[&["1", "A"], &["22", "BB"]]);
        assert!(checks.find_invalid(&data).is_empty());
    }

    #[test]
    fn length_mismatch_compares_the_overlap_only() {
        let checks = digit_and_upper();

        // Short row: only the first column is checked.
        assert!(checks.validate_row(&rows(&[&["12"]])[0]));
        // Extra fields beyond the patterns are ignored.
        assert!(checks.validate_row(&rows(&[&["12", "AB", "anything"]])[0]));
        // The overlap still has to match.
        assert!(!checks.validate_row(&rows(&[&["x"]])[0]));
    }

    #[test]
    fn patterns_match_from_the_start_of_the_field() {
        let checks = ColumnChecks::compile([("a", r"\d+")]).unwrap();
        // A prefix match is enough...
        assert!(checks.validate_row(&rows(&[&["12x"]])[0]));
        // ...but the match may not begin mid-field.
        assert!(!checks.validate_row(&rows(&[&["x12"]])[0]));
    }

    #[test]
    fn bad_pattern_is_reported_with_its_column() {
        let err = ColumnChecks::compile([("broken", "(")]).unwrap_err();
        assert!(matches!(err, ReportError::Pattern { column, .. } if column == "broken"));
    }

    fn write_utf16le(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut bytes = vec![0xFF, 0xFE]; // BOM
        for unit in content.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn read_rows_decodes_utf16_and_skips_the_header() {
        let file = write_utf16le("id;name\n1;Anna\n2;Björn\n");
        let data = read_rows(file.path()).unwrap();
        assert_eq!(data, rows(&[&["1", "Anna"], &["2", "Björn"]]));
    }

    #[test]
    fn read_rows_accepts_ragged_rows() {
        let file = write_utf16le("a;b\n1;X\n2\n3;Y;extra\n");
        let data = read_rows(file.path()).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[1], ["2"]);
        assert_eq!(data[2], ["3", "Y", "extra"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_rows("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
