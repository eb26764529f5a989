use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{CellValue, Record, Table};

/// Extension picked for directory sources when none is configured.
pub const DEFAULT_EXTENSION: &str = "txt";

const NAME_COLUMN: &str = "Name";
const SEX_COLUMN: &str = "Sex";
const BIRTHS_COLUMN: &str = "Births";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single file could not be turned into records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing '{0}' column in header")]
    MissingColumn(&'static str),
    #[error("line {line}: expected 3 fields, found {found}")]
    FieldCount { line: u64, found: usize },
    #[error("line {line}: missing '{column}' value")]
    MissingField { line: u64, column: &'static str },
    #[error("line {line}: births '{value}' is not a non-negative integer")]
    InvalidBirths { line: u64, value: String },
}

/// Load failures the caller must distinguish and report.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The source '{}' does not exist.", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Error reading the file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error(
        "No data found in '{}'. Please check the source and ensure it contains valid data.{}",
        path.display(),
        list_failures(skipped)
    )]
    Empty {
        path: PathBuf,
        /// Directory mode: every file that failed, when none loaded.
        skipped: Vec<FileFailure>,
    },
    #[error("Cannot list directory '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A directory-mode file that was skipped because it failed to parse.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ParseError,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

fn list_failures(skipped: &[FileFailure]) -> String {
    skipped
        .iter()
        .map(|failure| format!("\nSkipped {failure}"))
        .collect()
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Where the table comes from.  Also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// One delimited file with a `Name,Sex,Births` header.
    CsvFile { path: PathBuf },
    /// Headerless `Name,Sex,Births` files with the given extension.
    Directory { path: PathBuf, extension: String },
}

impl Source {
    /// Pick the variant from what is on disk: directories are scanned for
    /// `.txt` files, anything else is read as a single CSV.
    pub fn from_path(path: impl Into<PathBuf>) -> Source {
        let path = path.into();
        if path.is_dir() {
            Source::Directory {
                path,
                extension: DEFAULT_EXTENSION.to_string(),
            }
        } else {
            Source::CsvFile { path }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Source::CsvFile { path } | Source::Directory { path, .. } => path,
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::CsvFile {
            path: PathBuf::from("all_data.csv"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Result of a successful load.
#[derive(Debug)]
pub struct Loaded {
    pub table: Table,
    /// Directory mode only: files rejected while the rest loaded.
    pub skipped: Vec<FileFailure>,
}

/// Load a table from `source`.
///
/// * CSV file: any parse failure is fatal, no partial table is returned.
/// * Directory: each matching file is parsed on its own; failures are
///   collected in [`Loaded::skipped`] and the remaining files still load.
///
/// Zero resulting records is reported as [`LoadError::Empty`].
pub fn load(source: &Source) -> Result<Loaded, LoadError> {
    let result = match source {
        Source::CsvFile { path } => load_csv_file(path),
        Source::Directory { path, extension } => load_directory(path, extension),
    };

    match &result {
        Ok(loaded) => {
            log::info!(
                "Data successfully loaded from {}: {} records, {} file(s) skipped",
                source.path().display(),
                loaded.table.len(),
                loaded.skipped.len()
            );
        }
        Err(LoadError::Empty { path, skipped }) => {
            log::warn!(
                "No data was loaded from {} ({} file(s) failed)",
                path.display(),
                skipped.len()
            );
        }
        Err(e) => log::error!("{e}"),
    }
    result
}

// ---------------------------------------------------------------------------
// CSV file loader
// ---------------------------------------------------------------------------

/// Header row required; `Name`, `Sex`, `Births` are located by name and
/// every other column is kept as an extra column.
fn load_csv_file(path: &Path) -> Result<Loaded, LoadError> {
    if !path.is_file() {
        return Err(LoadError::SourceNotFound(path.to_path_buf()));
    }

    let table = parse_csv(path).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if table.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
            skipped: Vec::new(),
        });
    }
    Ok(Loaded {
        table,
        skipped: Vec::new(),
    })
}

fn parse_csv(path: &Path) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let position = |column: &'static str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(ParseError::MissingColumn(column))
    };
    let name_idx = position(NAME_COLUMN)?;
    let sex_idx = position(SEX_COLUMN)?;
    let births_idx = position(BIRTHS_COLUMN)?;

    let extra_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != name_idx && *i != sex_idx && *i != births_idx)
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = line_of(&row);

        let field = |idx: usize, column: &'static str| {
            row.get(idx)
                .ok_or(ParseError::MissingField { line, column })
        };
        let mut record = Record::new(
            field(name_idx, NAME_COLUMN)?,
            field(sex_idx, SEX_COLUMN)?,
            parse_births(field(births_idx, BIRTHS_COLUMN)?, line)?,
        );
        for (idx, col) in &extra_cols {
            let value = row.get(*idx).map(CellValue::guess).unwrap_or(CellValue::Null);
            record.extra.insert(col.clone(), value);
        }
        records.push(record);
    }

    let columns = extra_cols.into_iter().map(|(_, name)| name).collect();
    Ok(Table::new(columns, records))
}

// ---------------------------------------------------------------------------
// Directory loader
// ---------------------------------------------------------------------------

fn load_directory(dir: &Path, extension: &str) -> Result<Loaded, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::SourceNotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| LoadError::Unreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_extension(p, extension))
        .collect();
    files.sort();

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for file in files {
        match parse_headerless(&file) {
            Ok(mut rows) => {
                log::debug!("{}: {} records", file.display(), rows.len());
                records.append(&mut rows);
            }
            Err(error) => {
                log::warn!("Skipping {}: {error}", file.display());
                skipped.push(FileFailure { path: file, error });
            }
        }
    }

    if records.is_empty() {
        return Err(LoadError::Empty {
            path: dir.to_path_buf(),
            skipped,
        });
    }
    Ok(Loaded {
        table: Table::from_records(records),
        skipped,
    })
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension.trim_start_matches('.')))
}

/// Each line is exactly `Name,Sex,Births`.
fn parse_headerless(path: &Path) -> Result<Vec<Record>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = line_of(&row);
        if row.len() != 3 {
            return Err(ParseError::FieldCount {
                line,
                found: row.len(),
            });
        }
        records.push(Record::new(&row[0], &row[1], parse_births(&row[2], line)?));
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_births(raw: &str, line: u64) -> Result<u64, ParseError> {
    raw.parse::<u64>().map_err(|_| ParseError::InvalidBirths {
        line,
        value: raw.to_string(),
    })
}

fn line_of(row: &csv::StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_keeps_extra_columns() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "all_data.csv",
            "Year,Name,Sex,Births\n2001,Emma,F,100\n2002,Emma,F,50\n2001,Liam,M,80\n",
        );

        let loaded = load(&Source::CsvFile { path }).unwrap();
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.table.columns, vec!["Year".to_string()]);
        assert_eq!(loaded.table.len(), 3);

        let first = &loaded.table.records[0];
        assert_eq!(first.name, "Emma");
        assert_eq!(first.sex, "F");
        assert_eq!(first.births, 100);
        assert_eq!(first.extra.get("Year"), Some(&CellValue::Integer(2001)));
    }

    #[test]
    fn csv_missing_file_is_source_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load(&Source::CsvFile {
            path: tmp.path().join("nope.csv"),
        })
        .unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound(_)));
    }

    #[test]
    fn csv_bad_row_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "bad.csv",
            "Name,Sex,Births\nEmma,F,100\nLiam,M,lots\n",
        );
        let err = load(&Source::CsvFile { path }).unwrap_err();
        match err {
            LoadError::Parse {
                source: ParseError::InvalidBirths { value, .. },
                ..
            } => assert_eq!(value, "lots"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn csv_negative_births_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "neg.csv", "Name,Sex,Births\nEmma,F,-3\n");
        assert!(matches!(
            load(&Source::CsvFile { path }),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn csv_missing_column_named() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "cols.csv", "Name,Sex,Count\nEmma,F,1\n");
        match load(&Source::CsvFile { path }).unwrap_err() {
            LoadError::Parse {
                source: ParseError::MissingColumn(col),
                ..
            } => assert_eq!(col, "Births"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn csv_header_only_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "empty.csv", "Name,Sex,Births\n");
        assert!(matches!(
            load(&Source::CsvFile { path }),
            Err(LoadError::Empty { .. })
        ));
    }

    #[test]
    fn unknown_sex_loads() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "x.csv", "Name,Sex,Births\nSam,X,7\n");
        let loaded = load(&Source::CsvFile { path }).unwrap();
        assert_eq!(loaded.table.records[0].sex, "X");
    }

    #[test]
    fn directory_skips_malformed_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "yob2000.txt", "Emma,F,100\nLiam,M,80\n");
        write(tmp.path(), "yob2001.txt", "Emma,F\n");
        write(tmp.path(), "notes.md", "not,a,record,at,all\n");

        let loaded = load(&Source::Directory {
            path: tmp.path().to_path_buf(),
            extension: "txt".into(),
        })
        .unwrap();

        assert_eq!(loaded.table.len(), 2);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(loaded.skipped[0].path.ends_with("yob2001.txt"));
        assert!(matches!(
            loaded.skipped[0].error,
            ParseError::FieldCount { found: 2, .. }
        ));
    }

    #[test]
    fn directory_concatenates_in_path_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.TXT", "Liam,M,80\n");
        write(tmp.path(), "a.txt", "Emma,F,100\n");
        let loaded = load(&Source::Directory {
            path: tmp.path().to_path_buf(),
            extension: ".txt".into(),
        })
        .unwrap();
        let names: Vec<&str> = loaded.table.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Emma", "Liam"]);
    }

    #[test]
    fn empty_directory_is_empty_result() {
        let tmp = TempDir::new().unwrap();
        let err = load(&Source::Directory {
            path: tmp.path().to_path_buf(),
            extension: "txt".into(),
        })
        .unwrap_err();
        assert!(matches!(err, LoadError::Empty { ref skipped, .. } if skipped.is_empty()));
    }

    #[test]
    fn directory_with_only_bad_files_reports_each_failure() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.txt", "Emma,F\n");
        write(tmp.path(), "b.txt", "Liam,M,lots\n");

        let err = load(&Source::Directory {
            path: tmp.path().to_path_buf(),
            extension: "txt".into(),
        })
        .unwrap_err();

        let message = err.to_string();
        match err {
            LoadError::Empty { skipped, .. } => {
                assert_eq!(skipped.len(), 2);
                assert!(skipped[0].path.ends_with("a.txt"));
                assert!(matches!(skipped[0].error, ParseError::FieldCount { found: 2, .. }));
                assert!(matches!(
                    skipped[1].error,
                    ParseError::InvalidBirths { ref value, .. } if value == "lots"
                ));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(message.contains("a.txt"));
        assert!(message.contains("'lots'"));
    }

    #[test]
    fn missing_directory_is_source_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load(&Source::Directory {
            path: tmp.path().join("missing"),
            extension: "txt".into(),
        })
        .unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound(_)));
    }

    #[test]
    fn from_path_detects_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            Source::from_path(tmp.path()),
            Source::Directory { ref extension, .. } if extension == "txt"
        ));
        assert!(matches!(
            Source::from_path(tmp.path().join("all_data.csv")),
            Source::CsvFile { .. }
        ));
    }
}
