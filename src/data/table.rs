//! Table Module
//! Named-column table shared by every pipeline stage.

use polars::prelude::*;
use thiserror::Error;

/// Column holding the observation date.
pub const DATE_COLUMN: &str = "Date";
/// Column holding the measured temperature.
pub const TEMPERATURE_COLUMN: &str = "Temperature";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("required column '{0}' not found")]
pub struct MissingColumn(pub String);

/// Ordered rows of named columns, in source file order.
///
/// Row position is meaningful: it is the x-axis of the temperature trend.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
}

impl Table {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Check that every named column exists, reporting the first one missing.
    pub fn require(&self, columns: &[&str]) -> Result<(), MissingColumn> {
        match columns.iter().find(|name| self.df.column(name).is_err()) {
            Some(name) => Err(MissingColumn((*name).to_string())),
            None => Ok(()),
        }
    }

    pub fn column(&self, name: &str) -> Result<&Column, MissingColumn> {
        self.df
            .column(name)
            .map_err(|_| MissingColumn(name.to_string()))
    }

    /// Get list of column names in header order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Number of missing values in a column (0 when the column is absent).
    pub fn null_count(&self, name: &str) -> usize {
        self.df.column(name).map(|c| c.null_count()).unwrap_or(0)
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }
}

impl From<DataFrame> for Table {
    fn from(df: DataFrame) -> Self {
        Self::new(df)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.df.equals_missing(&other.df)
    }
}
