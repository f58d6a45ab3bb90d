//! Instance file reader: one whitespace-tokenized instance per line

use super::read_text;
use crate::error::ReadError;
use std::path::Path;

/// Read an instance file into tokenized lines
///
/// # Errors
/// `ReadError::Io` if the file cannot be read.
pub fn read_instance_file(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>, ReadError> {
    let text = read_text(path.as_ref())?;
    Ok(parse_instance_text(&text))
}

/// Tokenize instance text, skipping blank lines
#[must_use]
pub fn parse_instance_text(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| line.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
        .collect()
}
