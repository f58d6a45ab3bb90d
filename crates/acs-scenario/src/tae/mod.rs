//! Target algorithm execution
//!
//! Provides the [`TargetAlgorithmRunner`] trait the scenario binds to, the
//! request/result types that cross it, and two implementations:
//! - [`CommandLineRunner`]: launches the target algorithm as a wrapper process
//! - [`FnRunner`]: adapts a closure, mostly for tests and in-process targets

mod command_line;

pub use command_line::{CommandLineRunner, RESULT_LINE};

use crate::error::TaeError;
use acs_configspace::Configuration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One evaluation of a configuration on an instance
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    /// Configuration to evaluate
    pub configuration: &'a Configuration,
    /// Instance ID, `None` for instance-free scenarios
    pub instance: Option<&'a str>,
    /// Instance-specific argument string
    pub instance_specific: Option<&'a str>,
    /// Per-run cutoff in seconds
    pub cutoff: f64,
    /// Seed handed to the target algorithm
    pub seed: u64,
    /// Working directory for the run, `None` for the current one
    pub exec_dir: Option<&'a Path>,
}

/// Outcome reported for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run finished with a valid answer
    Success,
    /// Run hit the cutoff
    Timeout,
    /// Target algorithm crashed
    Crashed,
    /// Target algorithm asked the optimizer to stop
    Abort,
    /// Target algorithm ran out of memory
    Memout,
}

impl RunStatus {
    /// Whether the run counts as successful
    #[inline]
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "SUCCESS",
            Self::Timeout => "TIMEOUT",
            Self::Crashed => "CRASHED",
            Self::Abort => "ABORT",
            Self::Memout => "MEMOUT",
        };
        f.write_str(s)
    }
}

impl FromStr for RunStatus {
    type Err = TaeError;

    /// Wrapper status words; `SAT` and `UNSAT` count as success
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAT" | "UNSAT" | "SUCCESS" => Ok(Self::Success),
            "TIMEOUT" => Ok(Self::Timeout),
            "CRASHED" => Ok(Self::Crashed),
            "ABORT" => Ok(Self::Abort),
            "MEMOUT" => Ok(Self::Memout),
            other => Err(TaeError::MalformedResult(format!("unknown status '{other}'"))),
        }
    }
}

/// Result of a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunValue {
    /// Reported status
    pub status: RunStatus,
    /// Cost the optimizer minimizes
    pub cost: f64,
    /// Measured or reported runtime in seconds
    pub runtime: f64,
    /// Free-form extra output from the target algorithm
    pub additional_info: String,
}

/// Anything that can evaluate a configuration
///
/// Implementations must be shareable across threads; the scenario holds the
/// runner behind an `Arc` and hands out clones freely.
pub trait TargetAlgorithmRunner: Send + Sync + fmt::Debug {
    /// Evaluate one configuration on one instance
    ///
    /// # Errors
    /// Returns `TaeError` when the run could not be performed or its result
    /// could not be interpreted. A run that executed but failed is an `Ok`
    /// with a non-success status.
    fn evaluate(&self, request: &RunRequest<'_>) -> Result<RunValue, TaeError>;

    /// Runner name (for logging)
    fn name(&self) -> &str {
        "custom"
    }
}

/// Runner backed by a closure
pub struct FnRunner<F> {
    name: String,
    func: F,
}

impl<F> FnRunner<F>
where
    F: Fn(&RunRequest<'_>) -> Result<RunValue, TaeError> + Send + Sync,
{
    /// Wrap a closure under a name
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> fmt::Debug for FnRunner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRunner").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F> TargetAlgorithmRunner for FnRunner<F>
where
    F: Fn(&RunRequest<'_>) -> Result<RunValue, TaeError> + Send + Sync,
{
    fn evaluate(&self, request: &RunRequest<'_>) -> Result<RunValue, TaeError> {
        (self.func)(request)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap a closure as an unnamed runner
pub fn runner_fn<F>(func: F) -> FnRunner<F>
where
    F: Fn(&RunRequest<'_>) -> Result<RunValue, TaeError> + Send + Sync,
{
    FnRunner::new("custom", func)
}
