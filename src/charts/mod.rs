//! Charts module - Chart rendering

mod renderer;

pub use renderer::{ChartError, TrendChartRenderer, DEFAULT_SIZE};
