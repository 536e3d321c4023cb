//! # riverscope-convert
//!
//! The conversion pipeline: resolve an input, walk its CGNS structure,
//! reconstruct the step sequence, and serialize every step into the
//! legacy result CSV format. One `convert` call per input; a cheap
//! `classify` query tells callers whether conversion is needed at all.

mod cancel;
mod error;
mod options;
mod outcome;
mod pipeline;
mod steps;

pub use cancel::CancelToken;
pub use error::ConvertError;
pub use options::{ConvertOptions, DEFAULT_ZONE_PATH};
pub use outcome::{ConvertReport, SkippedVariable, StepOutcome, StepStatus};
pub use pipeline::{convert, convert_with_cancel};
pub use steps::StepDescriptor;

// The classification query is part of this crate's caller surface.
pub use riverscope_project::{Classification, classify};
