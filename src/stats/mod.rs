//! Stats module - Mean and trend calculations

mod calculator;

pub use calculator::{AnalysisResult, CalculatorError, StatsCalculator, Trend};
