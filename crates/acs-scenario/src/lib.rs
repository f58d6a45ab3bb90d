//! ACS Scenario
//!
//! Builds the immutable scenario descriptor an algorithm configurator runs
//! against: target algorithm command, objectives, budgets, instances,
//! instance features and the parameter space, plus the runner that
//! evaluates configurations.
//!
//! # Architecture
//!
//! - [`source`]: file-or-mapping input, resolved to raw key/value pairs
//! - [`io`]: readers for scenario, instance and feature files
//! - [`options`]: typed fields with named defaults
//! - [`objective`]: PAR factor from the overall objective
//! - [`instances`] / [`features`]: instance lists and train-aligned features
//! - [`tae`]: the execution strategy trait and the default wrapper runner
//! - [`scenario`]: the staged builder tying it all together
//!
//! # Example
//!
//! ```rust,no_run
//! use acs_scenario::{Scenario, ScenarioSource};
//!
//! let source = ScenarioSource::from_pairs([
//!     ("algo", "python wrapper.py"),
//!     ("paramfile", "params.pcs"),
//!     ("overall_obj", "par10"),
//! ]);
//! let scenario = Scenario::load(source)?;
//! assert_eq!(scenario.par_factor(), 10);
//! # Ok::<(), acs_scenario::ScenarioError>(())
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod features;
pub mod instances;
pub mod io;
pub mod objective;
pub mod options;
pub mod scenario;
pub mod source;
pub mod tae;

pub use error::{InstanceRole, ReadError, ScenarioError, ScenarioResult, TaeError};
pub use features::{FeatureMatrix, FeatureVectors};
pub use instances::InstanceSet;
pub use objective::par_factor;
pub use options::{RunObjective, ScenarioOptions};
pub use scenario::{Scenario, PARAMETER_SPACE_SEED};
pub use source::{ScenarioMap, ScenarioSource};
pub use tae::{
    runner_fn, CommandLineRunner, FnRunner, RunRequest, RunStatus, RunValue,
    TargetAlgorithmRunner,
};

pub use acs_configspace::{Configuration, ParameterSpace};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
