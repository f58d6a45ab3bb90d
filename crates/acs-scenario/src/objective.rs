//! Overall objective parsing
//!
//! `parK` penalizes unsuccessful runs with K times the cutoff; `meanK` uses
//! the same factor for plain averaging. Prefixes match case-insensitively;
//! any other objective has factor 1.

use crate::error::{ScenarioError, ScenarioResult};

/// Derive the penalization factor from an overall objective string
///
/// # Errors
/// Returns `InvalidObjective` when a `par`/`mean` prefix is followed by
/// something other than a positive integer.
pub fn par_factor(overall_objective: &str) -> ScenarioResult<u32> {
    let suffix = strip_prefix_ignore_case(overall_objective, "par")
        .or_else(|| strip_prefix_ignore_case(overall_objective, "mean"));

    let Some(suffix) = suffix else {
        return Ok(1);
    };

    match suffix.parse::<u32>() {
        Ok(factor) if factor >= 1 => Ok(factor),
        _ => Err(ScenarioError::InvalidObjective(overall_objective.to_string())),
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
