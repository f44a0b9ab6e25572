//! Temptrend - CSV Temperature Cleaning & Trend Analysis
//!
//! Loads a CSV file with `Date` and `Temperature` columns, coerces dates and
//! forward-fills gaps, then computes the mean temperature and a linear trend
//! over row position. The trend can be rendered as an SVG chart.

pub mod charts;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod stats;

pub use data::{DataLoader, DataProcessor, Table};
pub use error::{ErrorKind, PipelineError, Stage};
pub use pipeline::{Pipeline, PipelineOutput};
pub use stats::{AnalysisResult, StatsCalculator, Trend};

/// Input file read when no path is given.
pub const DEFAULT_INPUT_PATH: &str = "data.csv";
/// Chart file written when no path is given.
pub const DEFAULT_CHART_PATH: &str = "temperature_trend.svg";
