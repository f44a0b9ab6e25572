//! Statistics Calculator Module
//! Computes the mean temperature and its linear trend over row position.

use crate::data::{MissingColumn, Table, TEMPERATURE_COLUMN};
use crate::error::ErrorKind;
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error(transparent)]
    MissingColumn(#[from] MissingColumn),
    #[error("column '{column}' is not numeric: {reason}")]
    NonNumeric { column: String, reason: String },
    #[error("table has no rows; mean temperature is undefined")]
    EmptyTable,
    #[error("column '{column}' has no observed values")]
    NoObservations { column: String },
    #[error("column '{column}' has {count} missing value(s); trend is undefined")]
    MissingValues { column: String, count: usize },
    #[error("trend fit produced a non-finite coefficient")]
    NonFinite,
}

impl CalculatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalculatorError::MissingColumn(_) => ErrorKind::MissingColumn,
            _ => ErrorKind::Unexpected,
        }
    }
}

/// Degree-1 polynomial fitted against row position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    /// Coefficients highest degree first: `[slope, intercept]`.
    pub fn coefficients(&self) -> [f64; 2] {
        [self.slope, self.intercept]
    }

    /// Fitted value at a row position.
    pub fn value_at(&self, index: f64) -> f64 {
        self.slope * index + self.intercept
    }
}

/// Result of analyzing a cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub mean_temperature: f64,
    pub temperature_trend: Trend,
}

/// Handles statistical calculations over the temperature column.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute the mean temperature and the temperature trend.
    ///
    /// The trend's x-axis is the row index `0..n`, not the date, so it is only
    /// meaningful for evenly spaced observations.
    pub fn analyze(table: &Table) -> Result<AnalysisResult, CalculatorError> {
        table.require(&[TEMPERATURE_COLUMN])?;

        let values = Self::temperature_values(table)?;
        if values.is_empty() {
            return Err(CalculatorError::EmptyTable);
        }

        let observed: Vec<f64> = values.iter().flatten().copied().collect();
        if observed.is_empty() {
            return Err(CalculatorError::NoObservations {
                column: TEMPERATURE_COLUMN.to_string(),
            });
        }
        let mean_temperature = observed.iter().mean();

        let missing = values.len() - observed.len();
        if missing > 0 {
            return Err(CalculatorError::MissingValues {
                column: TEMPERATURE_COLUMN.to_string(),
                count: missing,
            });
        }

        let temperature_trend = Self::linear_fit(&observed);
        let finite = mean_temperature.is_finite()
            && temperature_trend.coefficients().iter().all(|c| c.is_finite());
        if !finite {
            return Err(CalculatorError::NonFinite);
        }

        tracing::debug!(
            rows = values.len(),
            mean = mean_temperature,
            slope = temperature_trend.slope,
            intercept = temperature_trend.intercept,
            "analyzed temperature"
        );
        Ok(AnalysisResult {
            mean_temperature,
            temperature_trend,
        })
    }

    /// Read `Temperature` as floats; anything that does not convert cleanly is an error.
    ///
    /// Text columns (e.g. values padded with spaces) are trimmed and parsed
    /// value by value; a blank value counts as missing.
    pub fn temperature_values(table: &Table) -> Result<Vec<Option<f64>>, CalculatorError> {
        let non_numeric = |reason: String| CalculatorError::NonNumeric {
            column: TEMPERATURE_COLUMN.to_string(),
            reason,
        };

        let column = table.column(TEMPERATURE_COLUMN)?;
        if column.dtype() == &DataType::String {
            let text = column.str().map_err(|err| non_numeric(err.to_string()))?;
            return text
                .into_iter()
                .enumerate()
                .map(|(row, value)| match value.map(str::trim) {
                    None | Some("") => Ok(None),
                    Some(raw) => raw
                        .parse::<f64>()
                        .map(Some)
                        .map_err(|_| non_numeric(format!("row {row}: '{raw}' is not a number"))),
                })
                .collect();
        }

        let values = column
            .as_materialized_series()
            .strict_cast(&DataType::Float64)
            .map_err(|err| non_numeric(err.to_string()))?;
        let values = values.f64().map_err(|err| non_numeric(err.to_string()))?;
        Ok(values.into_iter().collect())
    }

    /// Ordinary least squares line through `(i, values[i])`.
    ///
    /// A single point has no defined slope; it yields a flat line through it.
    pub fn linear_fit(values: &[f64]) -> Trend {
        let n = values.len();
        if n < 2 {
            return Trend {
                slope: 0.0,
                intercept: values.first().copied().unwrap_or(f64::NAN),
            };
        }

        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n as f64;

        let (sxy, sxx) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (i, &y)| {
                let dx = i as f64 - x_mean;
                (sxy + dx * (y - y_mean), sxx + dx * dx)
            });

        let slope = sxy / sxx;
        Trend {
            slope,
            intercept: y_mean - slope * x_mean,
        }
    }
}
