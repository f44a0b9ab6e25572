//! Data Processor Module
//! Handles data cleaning: date coercion and forward-fill of missing values.

use super::{MissingColumn, Table, DATE_COLUMN, TEMPERATURE_COLUMN};
use crate::error::ErrorKind;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use thiserror::Error;

/// Date-only layouts tried in order. Month-first wins over day-first.
pub const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Date-time layouts whose time part is dropped.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    MissingColumn(#[from] MissingColumn),
    #[error("row {row}: '{value}' in column 'Date' is not a date")]
    UnparseableDate { row: usize, value: String },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

impl ProcessorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessorError::MissingColumn(_) => ErrorKind::MissingColumn,
            ProcessorError::UnparseableDate { .. } | ProcessorError::PolarsError(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Columns that must be present before cleaning starts.
    pub const REQUIRED_COLUMNS: [&'static str; 2] = [DATE_COLUMN, TEMPERATURE_COLUMN];

    /// Coerce `Date` to a calendar date, then forward-fill every column.
    ///
    /// Either the whole table is cleaned or an error is returned; leading
    /// missing values (nothing observed above them) stay missing.
    pub fn clean(table: Table) -> Result<Table, ProcessorError> {
        table.require(&Self::REQUIRED_COLUMNS)?;

        let dates = Self::parse_dates(table.column(DATE_COLUMN)?)?;
        let mut df = table.into_dataframe();
        df.with_column(dates)?;
        let df = Self::forward_fill(&df)?;

        tracing::debug!(
            rows = df.height(),
            remaining_nulls = df.get_columns().iter().map(|c| c.null_count()).sum::<usize>(),
            "cleaned table"
        );
        Ok(Table::new(df))
    }

    /// Replace each missing value with the nearest observed value above it.
    pub fn forward_fill(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        Ok(df.fill_null(FillNullStrategy::Forward(None))?)
    }

    /// Reinterpret a column as `Date`. Fails on the first unparseable value.
    pub fn parse_dates(column: &Column) -> Result<Series, ProcessorError> {
        if column.dtype() == &DataType::Date {
            return Ok(column.as_materialized_series().clone());
        }

        let text = column.cast(&DataType::String)?;
        let mut days: Vec<Option<i32>> = Vec::with_capacity(text.len());
        for (row, value) in text.str()?.into_iter().enumerate() {
            let parsed = match value.map(str::trim) {
                None | Some("") => None,
                Some(raw) => {
                    let date =
                        Self::parse_date(raw).ok_or_else(|| ProcessorError::UnparseableDate {
                            row,
                            value: raw.to_string(),
                        })?;
                    Some(days_since_epoch(date))
                }
            };
            days.push(parsed);
        }

        Ok(Series::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?)
    }

    /// Parse a single date string in any supported layout.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|dt| dt.date())
            })
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}
