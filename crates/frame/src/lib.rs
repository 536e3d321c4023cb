//! # riverscope-frame
//!
//! In-memory model of one simulation step's tabular snapshot, plus the
//! legacy iRIC result CSV format: a byte-exact writer and a reader for
//! round-trips and already-converted folders.

mod error;
mod format;
mod frame;
mod grid;
mod reader;
mod writer;

pub use error::FrameError;
pub use format::{format_time, format_value};
pub use frame::{IndexOrder, StepFrame, VariableColumn, VariableEntry};
pub use grid::CoordinateGrid;
pub use reader::{ResultCsv, read_result_csv};
pub use writer::{CsvWriterConfig, write_result_csv};
