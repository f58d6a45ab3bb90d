//! Scenario file reader
//!
//! One assignment per line, either `key = value` or `key value`. Blank
//! lines and lines starting with `#` are skipped. Runs of whitespace inside
//! a key collapse to a single space; values are only trimmed, so quoted
//! arguments reach the shell splitter intact. A key given twice keeps the
//! last value.

use super::read_text;
use crate::error::ReadError;
use crate::source::ScenarioMap;
use std::path::Path;

/// Read a scenario file into a key/value mapping
///
/// # Errors
/// - `ReadError::Io` if the file cannot be read
/// - `ReadError::MalformedLine` for a line with an empty key
pub fn read_scenario_file(path: impl AsRef<Path>) -> Result<ScenarioMap, ReadError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    parse_scenario_text(&text, path)
}

/// Parse scenario text; `origin` is only used in error messages
///
/// # Errors
/// `ReadError::MalformedLine` for a line with an empty key.
pub fn parse_scenario_text(text: &str, origin: &Path) -> Result<ScenarioMap, ReadError> {
    let mut map = ScenarioMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .or_else(|| line.split_once(char::is_whitespace))
            .unwrap_or((line, ""));
        let (key, value) = (normalize(key), value.trim().to_string());

        if key.is_empty() {
            return Err(ReadError::MalformedLine {
                path: origin.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
            });
        }
        map.insert(key, value);
    }

    Ok(map)
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
