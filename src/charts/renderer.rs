//! Static Chart Renderer
//! Draws the temperature series and its fitted trend as an SVG line chart.
//!
//! Layout:
//! 1. Caption: "Temperature trend (mean {mean})"
//! 2. Temperature over row position, x ticks labelled with the row's date
//! 3. Trend line across the full row range
//! 4. Legend in the upper-left corner

use crate::data::{Table, DATE_COLUMN};
use crate::stats::{AnalysisResult, StatsCalculator};
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SIZE: (u32, u32) = (1000, 600);

const SERIES_COLOR: RGBColor = RGBColor(91, 155, 213); // Blue
const TREND_COLOR: RGBColor = RGBColor(237, 125, 49); // Orange
const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("nothing to plot: table has no observed temperatures")]
    NoData,
    #[error("failed to read table: {0}")]
    Data(String),
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a cleaned table and its analysis.
pub struct TrendChartRenderer;

impl TrendChartRenderer {
    /// Render the chart to an SVG document.
    pub fn render_svg(
        table: &Table,
        analysis: &AnalysisResult,
        size: (u32, u32),
    ) -> Result<String, ChartError> {
        let points = Self::temperature_points(table)?;
        if points.is_empty() {
            return Err(ChartError::NoData);
        }
        let labels = Self::date_labels(table);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            Self::draw(&root, &points, &labels, analysis, table.height())
                .map_err(|err| ChartError::Render(err.to_string()))?;
            root.present()
                .map_err(|err| ChartError::Render(err.to_string()))?;
        }
        Ok(svg)
    }

    /// Render the chart and write it to `path`.
    pub fn save_svg(
        table: &Table,
        analysis: &AnalysisResult,
        path: &Path,
    ) -> Result<(), ChartError> {
        let svg = Self::render_svg(table, analysis, DEFAULT_SIZE)?;
        std::fs::write(path, svg)?;
        tracing::debug!(path = %path.display(), "wrote chart");
        Ok(())
    }

    fn draw(
        root: &DrawingArea<SVGBackend<'_>, Shift>,
        points: &[(f64, f64)],
        labels: &[String],
        analysis: &AnalysisResult,
        rows: usize,
    ) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
        root.fill(&WHITE)?;

        let trend = analysis.temperature_trend;
        let x_max = rows.saturating_sub(1).max(1) as f64;
        let trend_line = [(0.0, trend.value_at(0.0)), (x_max, trend.value_at(x_max))];
        let (y_min, y_max) = Self::get_y_range(points.iter().chain(trend_line.iter()).map(|p| p.1));

        let mut chart = ChartBuilder::on(root)
            .caption(
                format!("Temperature trend (mean {:.2})", analysis.mean_temperature),
                ("sans-serif", 22),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

        let x_label = |x: &f64| {
            let idx = x.round();
            if idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        };
        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Temperature")
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&x_label)
            .light_line_style(GRID_COLOR.mix(0.3))
            .draw()?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), SERIES_COLOR.stroke_width(2)))?
            .label("Temperature")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SERIES_COLOR));

        chart
            .draw_series(LineSeries::new(trend_line, TREND_COLOR.stroke_width(2)))?
            .label(format!("Trend ({:+.3} per row)", trend.slope))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TREND_COLOR));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    /// Observed `(row, temperature)` pairs; missing rows are skipped.
    fn temperature_points(table: &Table) -> Result<Vec<(f64, f64)>, ChartError> {
        let values = StatsCalculator::temperature_values(table)
            .map_err(|err| ChartError::Data(err.to_string()))?;
        Ok(values
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .collect())
    }

    /// One label per row: the ISO date, or empty when the date is missing.
    fn date_labels(table: &Table) -> Vec<String> {
        let epoch = NaiveDate::default();
        table
            .column(DATE_COLUMN)
            .ok()
            .and_then(|col| col.cast(&polars::prelude::DataType::Int32).ok())
            .and_then(|col| {
                col.i32().ok().map(|days| {
                    days.into_iter()
                        .map(|d| {
                            d.and_then(|d| epoch.checked_add_signed(Duration::days(d as i64)))
                                .map(|date| date.format("%Y-%m-%d").to_string())
                                .unwrap_or_default()
                        })
                        .collect()
                })
            })
            .unwrap_or_default()
    }

    fn get_y_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * 0.15).max(1.0);
        (min - pad, max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use polars::df;

    fn cleaned() -> (Table, AnalysisResult) {
        let table: Table = df!(
            "Date" => ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"],
            "Temperature" => [Some(1.0), None, Some(3.0), Some(4.0)]
        )
        .unwrap()
        .into();
        let table = DataProcessor::clean(table).unwrap();
        let analysis = StatsCalculator::analyze(&table).unwrap();
        (table, analysis)
    }

    #[test]
    fn renders_svg_with_legend() {
        let (table, analysis) = cleaned();
        let svg = TrendChartRenderer::render_svg(&table, &analysis, (800, 500)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Temperature"));
        assert!(svg.contains("Trend"));
    }

    #[test]
    fn date_labels_follow_rows() {
        let (table, _) = cleaned();
        assert_eq!(
            TrendChartRenderer::date_labels(&table),
            vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]
        );
    }

    #[test]
    fn save_writes_file() {
        let (table, analysis) = cleaned();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.svg");
        TrendChartRenderer::save_svg(&table, &analysis, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[test]
    fn y_range_pads_flat_series() {
        assert_eq!(TrendChartRenderer::get_y_range([5.0, 5.0].into_iter()), (4.0, 6.0));
    }
}
