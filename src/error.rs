//! Error Module
//! Failure categories shared by every pipeline stage.

use crate::data::{LoaderError, ProcessorError};
use crate::stats::CalculatorError;
use std::fmt;
use thiserror::Error;

/// Category a stage failure is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input path does not exist or is not a file.
    NotFound,
    /// Input file has no parseable content.
    EmptyInput,
    /// A column a stage requires is absent.
    MissingColumn,
    /// Anything else: parse, cast or compute failures.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::EmptyInput => "empty input",
            ErrorKind::MissingColumn => "missing column",
            ErrorKind::Unexpected => "unexpected error",
        };
        f.write_str(label)
    }
}

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Clean,
    Analyze,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Load => "load",
            Stage::Clean => "clean",
            Stage::Analyze => "analyze",
        };
        f.write_str(label)
    }
}

/// Failure of one pipeline stage, carrying that stage's own error.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] ProcessorError),
    #[error(transparent)]
    Analyze(#[from] CalculatorError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Load(_) => Stage::Load,
            PipelineError::Clean(_) => Stage::Clean,
            PipelineError::Analyze(_) => Stage::Analyze,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Load(err) => err.kind(),
            PipelineError::Clean(err) => err.kind(),
            PipelineError::Analyze(err) => err.kind(),
        }
    }

    /// Single-line, human-readable diagnostic for this failure.
    pub fn diagnostic(&self) -> String {
        let message = self.to_string();
        let message = message.split_whitespace().collect::<Vec<_>>().join(" ");
        format!("{} failed [{}]: {}", self.stage(), self.kind(), message)
    }
}
