//! Typed scenario options
//!
//! [`ScenarioOptions::from_map`] turns the raw key/value mapping into typed
//! fields. Every optional field has its default named below; unknown keys
//! are ignored so newer scenario files still load.

use crate::error::{ScenarioError, ScenarioResult};
use crate::source::ScenarioMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Scenario file keys
pub mod keys {
    //! Key names understood by the scenario format
    pub const ALGO: &str = "algo";
    pub const EXEC_DIR: &str = "execdir";
    pub const DETERMINISTIC: &str = "deterministic";
    pub const PARAM_FILE: &str = "paramfile";
    pub const RUN_OBJ: &str = "run_obj";
    pub const OVERALL_OBJ: &str = "overall_obj";
    pub const CUTOFF_TIME: &str = "cutoff_time";
    pub const TUNER_TIMEOUT: &str = "tunerTimeout";
    pub const WALLCLOCK_LIMIT: &str = "wallclock-limit";
    pub const RUNCOUNT_LIMIT: &str = "runcount-limit";
    pub const INSTANCE_FILE: &str = "instance_file";
    pub const TEST_INSTANCE_FILE: &str = "test_instance_file";
    pub const FEATURE_FILE: &str = "feature_file";
    pub const OUTPUT_DIR: &str = "outdir";
}

/// Default working directory for target algorithm runs
pub const DEFAULT_EXEC_DIR: &str = ".";

/// Default aggregation of run costs
pub const DEFAULT_OVERALL_OBJECTIVE: &str = "par10";

/// Default per-run cutoff, large enough to mean "no cutoff"
pub const DEFAULT_CUTOFF_TIME: f64 = 999_999_999.0;

/// Value of every budget that is not set
pub const UNBOUNDED: f64 = f64::INFINITY;

/// What a single target algorithm run is scored on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunObjective {
    /// Wall time of the run
    #[default]
    Runtime,
    /// Solution quality reported by the run
    Quality,
}

impl RunObjective {
    /// Name as written in scenario files
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Runtime => "runtime",
            Self::Quality => "quality",
        }
    }
}

impl fmt::Display for RunObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunObjective {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "runtime" => Ok(Self::Runtime),
            "quality" => Ok(Self::Quality),
            other => Err(ScenarioError::invalid_field(keys::RUN_OBJ, other)),
        }
    }
}

/// Typed scenario fields, before any referenced file is touched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOptions {
    /// Target algorithm command, shell-split
    pub command: Vec<String>,
    /// Working directory for target algorithm runs
    pub exec_dir: PathBuf,
    /// Whether the target algorithm is deterministic
    pub deterministic: bool,
    /// PCS file describing the parameter space
    pub param_file: PathBuf,
    /// What each run is scored on
    pub run_objective: RunObjective,
    /// Cost aggregation, e.g. `par10` or `mean`
    pub overall_objective: String,
    /// Per-run cutoff in seconds
    pub cutoff_time: f64,
    /// Budget on summed target algorithm time
    pub algo_runs_time_limit: f64,
    /// Budget on wall-clock time of the whole optimization
    pub wallclock_limit: f64,
    /// Budget on the number of target algorithm runs
    pub run_count_limit: f64,
    /// Training instance file
    pub train_instance_file: Option<PathBuf>,
    /// Test instance file
    pub test_instance_file: Option<PathBuf>,
    /// Instance feature file
    pub feature_file: Option<PathBuf>,
    /// Directory for optimizer output; recorded, never written here
    pub output_dir: Option<PathBuf>,
}

impl ScenarioOptions {
    /// Extract and default every field from a raw mapping
    ///
    /// # Errors
    /// - `MissingRequiredField` if `algo` or `paramfile` is absent
    /// - `InvalidFieldValue` for an empty command, an unknown run objective,
    ///   or a budget that is not a non-negative number
    pub fn from_map(map: &ScenarioMap) -> ScenarioResult<Self> {
        let algo = required(map, keys::ALGO)?;
        let command = shlex::split(algo)
            .filter(|tokens| !tokens.is_empty())
            .ok_or_else(|| ScenarioError::invalid_field(keys::ALGO, algo))?;
        let param_file = PathBuf::from(required(map, keys::PARAM_FILE)?);

        let run_objective = match map.get(keys::RUN_OBJ) {
            Some(raw) => raw.parse()?,
            None => RunObjective::default(),
        };

        let options = Self {
            command,
            exec_dir: PathBuf::from(value_or(map, keys::EXEC_DIR, DEFAULT_EXEC_DIR)),
            deterministic: matches!(map.get(keys::DETERMINISTIC).map(String::as_str), Some("1" | "true")),
            param_file,
            run_objective,
            overall_objective: value_or(map, keys::OVERALL_OBJ, DEFAULT_OVERALL_OBJECTIVE).to_string(),
            cutoff_time: budget(map, keys::CUTOFF_TIME, DEFAULT_CUTOFF_TIME)?,
            algo_runs_time_limit: budget(map, keys::TUNER_TIMEOUT, UNBOUNDED)?,
            wallclock_limit: budget(map, keys::WALLCLOCK_LIMIT, UNBOUNDED)?,
            run_count_limit: budget(map, keys::RUNCOUNT_LIMIT, UNBOUNDED)?,
            train_instance_file: file_path(map, keys::INSTANCE_FILE),
            test_instance_file: file_path(map, keys::TEST_INSTANCE_FILE),
            feature_file: file_path(map, keys::FEATURE_FILE),
            output_dir: file_path(map, keys::OUTPUT_DIR),
        };

        tracing::debug!(
            "Scenario options: run_obj={}, overall_obj={}, cutoff={}",
            options.run_objective,
            options.overall_objective,
            options.cutoff_time
        );
        Ok(options)
    }
}

fn required<'a>(map: &'a ScenarioMap, key: &str) -> ScenarioResult<&'a str> {
    map.get(key)
        .map(String::as_str)
        .ok_or_else(|| ScenarioError::MissingRequiredField(key.to_string()))
}

fn value_or<'a>(map: &'a ScenarioMap, key: &'a str, default: &'a str) -> &'a str {
    map.get(key).map_or(default, String::as_str)
}

/// Optional file reference; an empty value means no file
fn file_path(map: &ScenarioMap, key: &str) -> Option<PathBuf> {
    map.get(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn budget(map: &ScenarioMap, key: &str, default: f64) -> ScenarioResult<f64> {
    let Some(raw) = map.get(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v >= 0.0 => Ok(v),
        _ => Err(ScenarioError::invalid_field(key, raw.as_str())),
    }
}
