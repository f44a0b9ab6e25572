//! Pipeline Module
//! Runs load → clean → analyze, reporting one diagnostic line per failed stage.

use crate::data::{DataLoader, DataProcessor, Table};
use crate::error::PipelineError;
use crate::stats::{AnalysisResult, StatsCalculator};
use std::io::Write;
use std::path::Path;

/// Everything the presenter needs from a successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: Table,
    pub analysis: AnalysisResult,
}

/// Stage runner that writes a diagnostic line for every failure it observes.
///
/// Each stage returns its error as the "no result" value; callers stop at the
/// first `Err`.
pub struct Pipeline<W: Write> {
    diagnostics: W,
}

impl<W: Write> Pipeline<W> {
    pub fn new(diagnostics: W) -> Self {
        Self { diagnostics }
    }

    pub fn load(&mut self, path: &Path) -> Result<Table, PipelineError> {
        let result = DataLoader::load(path).map_err(PipelineError::from);
        self.observe(result)
    }

    pub fn clean(&mut self, table: Table) -> Result<Table, PipelineError> {
        let result = DataProcessor::clean(table).map_err(PipelineError::from);
        self.observe(result)
    }

    pub fn analyze(&mut self, table: &Table) -> Result<AnalysisResult, PipelineError> {
        let result = StatsCalculator::analyze(table).map_err(PipelineError::from);
        self.observe(result)
    }

    /// Run every stage in order, halting at the first failure.
    pub fn run(&mut self, path: &Path) -> Result<PipelineOutput, PipelineError> {
        let table = self.load(path)?;
        let table = self.clean(table)?;
        let analysis = self.analyze(&table)?;

        tracing::info!(
            path = %path.display(),
            rows = table.height(),
            mean = analysis.mean_temperature,
            "pipeline complete"
        );
        Ok(PipelineOutput { table, analysis })
    }

    pub fn into_diagnostics(self) -> W {
        self.diagnostics
    }

    fn observe<T>(&mut self, result: Result<T, PipelineError>) -> Result<T, PipelineError> {
        if let Err(err) = &result {
            if let Err(io) = writeln!(self.diagnostics, "{}", err.diagnostic()) {
                tracing::warn!(error = %io, "failed to write diagnostic");
            }
        }
        result
    }
}
