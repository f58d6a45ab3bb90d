//! Raw source readers
//!
//! Turn files on disk into untyped structures for the scenario builder:
//! - Scenario files → [`ScenarioMap`](crate::source::ScenarioMap)
//! - Instance files → tokenized lines
//! - Feature files → [`FeatureTable`]
//!
//! Each reader has a text-level twin (`parse_*`) that does the actual work,
//! so in-memory content goes through the same rules as files.

mod feature_file;
mod instance_file;
mod scenario_file;

pub use feature_file::{parse_feature_text, read_feature_file, FeatureTable};
pub use instance_file::{parse_instance_text, read_instance_file};
pub use scenario_file::{parse_scenario_text, read_scenario_file};

use crate::error::ReadError;
use std::path::Path;

/// Read a whole file as UTF-8 text
pub(crate) fn read_text(path: &Path) -> Result<String, ReadError> {
    std::fs::read_to_string(path).map_err(|e| ReadError::io_error(path, e))
}
