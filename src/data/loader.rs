//! CSV Data Loader Module
//! Handles CSV file loading into a `Table` using Polars.

use super::Table;
use crate::error::ErrorKind;
use polars::prelude::*;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Field contents read as missing values, in addition to empty fields.
pub const MISSING_MARKERS: [&str; 8] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "-"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("file is empty: {}", .0.display())]
    EmptyInput(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
}

impl LoaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoaderError::NotFound(_) => ErrorKind::NotFound,
            LoaderError::EmptyInput(_) => ErrorKind::EmptyInput,
            LoaderError::Io { .. } | LoaderError::Csv(_) => ErrorKind::Unexpected,
        }
    }
}

/// Reads a comma-delimited file with a header row into a `Table`.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file. The first line names the columns.
    pub fn load(path: &Path) -> Result<Table, LoaderError> {
        let bytes = Self::read_bytes(path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(LoaderError::EmptyInput(path.to_path_buf()));
        }

        let df = match Self::parse(bytes) {
            Ok(df) => df,
            Err(PolarsError::NoData(_)) => {
                return Err(LoaderError::EmptyInput(path.to_path_buf()))
            }
            Err(err) => return Err(err.into()),
        };
        if df.width() == 0 {
            return Err(LoaderError::EmptyInput(path.to_path_buf()));
        }

        tracing::debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded CSV"
        );
        Ok(Table::new(df))
    }

    fn read_bytes(path: &Path) -> Result<Vec<u8>, LoaderError> {
        if path.is_dir() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }
        std::fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoaderError::NotFound(path.to_path_buf()),
            _ => LoaderError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn parse(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
        let null_values =
            NullValues::AllColumns(MISSING_MARKERS.iter().map(|m| (*m).into()).collect());
        CsvReadOptions::default()
            .with_has_header(true)
            // Scan every row: a late decimal must widen an integer column.
            .with_infer_schema_length(None)
            .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
    }
}
