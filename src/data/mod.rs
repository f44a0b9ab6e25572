//! Data module - CSV loading, table model and cleaning

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError, MISSING_MARKERS};
pub use processor::{DataProcessor, ProcessorError, DATE_FORMATS};
pub use table::{MissingColumn, Table, DATE_COLUMN, TEMPERATURE_COLUMN};
