//! Scenario descriptor
//!
//! [`Scenario::new`] runs every construction stage in order:
//! 1. Resolve the source to a key/value mapping
//! 2. Extract and default typed options
//! 3. Derive the PAR factor from the overall objective
//! 4. Load training and test instances
//! 5. Load features aligned to the training instances
//! 6. Load and seed the parameter space
//! 7. Bind the execution strategy
//!
//! Any failure aborts construction; a `Scenario` value is always complete.
//! Once built it is never mutated and can be shared across threads.

use crate::error::{ScenarioError, ScenarioResult, TaeError};
use crate::features::FeatureVectors;
use crate::instances::InstanceSet;
use crate::objective::par_factor;
use crate::options::{RunObjective, ScenarioOptions};
use crate::source::ScenarioSource;
use crate::tae::{CommandLineRunner, RunRequest, RunValue, TargetAlgorithmRunner};
use acs_configspace::{pcs, Configuration, ParameterSpace};
use std::path::Path;
use std::sync::Arc;

/// Seed applied to every loaded parameter space
pub const PARAMETER_SPACE_SEED: u64 = 42;

/// Immutable description of one algorithm configuration experiment
#[derive(Debug, Clone)]
pub struct Scenario {
    options: ScenarioOptions,
    par_factor: u32,
    instances: InstanceSet,
    features: Option<FeatureVectors>,
    parameter_space: ParameterSpace,
    runner: Arc<dyn TargetAlgorithmRunner>,
}

impl Scenario {
    /// Build a scenario from a source and an optional runner
    ///
    /// Without a runner, a [`CommandLineRunner`] for the scenario's command,
    /// run objective and PAR factor is bound.
    ///
    /// # Errors
    /// Returns the `ScenarioError` of the first stage that fails.
    pub fn new(
        source: impl Into<ScenarioSource>,
        runner: Option<Arc<dyn TargetAlgorithmRunner>>,
    ) -> ScenarioResult<Self> {
        let source = source.into();
        let map = source.resolve()?;

        let options = ScenarioOptions::from_map(&map)?;
        let par_factor = par_factor(&options.overall_objective)?;

        let instances = InstanceSet::load(
            options.train_instance_file.as_deref(),
            options.test_instance_file.as_deref(),
        )?;

        let features = options
            .feature_file
            .as_deref()
            .map(|path| FeatureVectors::load(path, &instances.train))
            .transpose()?;

        let parameter_space = load_parameter_space(&options.param_file)?;

        let runner: Arc<dyn TargetAlgorithmRunner> = match runner {
            Some(runner) => runner,
            None => Arc::new(CommandLineRunner::new(
                options.command.clone(),
                options.run_objective,
                par_factor,
            )),
        };

        tracing::info!(
            "Scenario ready: {} parameters, {} training / {} test instances, runner '{}'",
            parameter_space.len(),
            instances.train.len(),
            instances.test.len(),
            runner.name()
        );

        Ok(Self {
            options,
            par_factor,
            instances,
            features,
            parameter_space,
            runner,
        })
    }

    /// Build a scenario with the default runner
    ///
    /// # Errors
    /// See [`Scenario::new`].
    pub fn load(source: impl Into<ScenarioSource>) -> ScenarioResult<Self> {
        Self::new(source, None)
    }

    /// Typed options the scenario was built from
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ScenarioOptions {
        &self.options
    }

    /// Target algorithm command tokens
    #[inline]
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.options.command
    }

    /// Working directory for runs
    #[inline]
    #[must_use]
    pub fn exec_dir(&self) -> &Path {
        &self.options.exec_dir
    }

    /// Whether the target algorithm is deterministic
    #[inline]
    #[must_use]
    pub fn deterministic(&self) -> bool {
        self.options.deterministic
    }

    /// PCS file the parameter space was read from
    #[inline]
    #[must_use]
    pub fn param_file(&self) -> &Path {
        &self.options.param_file
    }

    /// What each run is scored on
    #[inline]
    #[must_use]
    pub fn run_objective(&self) -> RunObjective {
        self.options.run_objective
    }

    /// Cost aggregation string
    #[inline]
    #[must_use]
    pub fn overall_objective(&self) -> &str {
        &self.options.overall_objective
    }

    /// Penalty factor derived from the overall objective, always at least 1
    #[inline]
    #[must_use]
    pub fn par_factor(&self) -> u32 {
        self.par_factor
    }

    /// Per-run cutoff in seconds
    #[inline]
    #[must_use]
    pub fn cutoff_time(&self) -> f64 {
        self.options.cutoff_time
    }

    /// Budget on summed target algorithm time
    #[inline]
    #[must_use]
    pub fn algo_runs_time_limit(&self) -> f64 {
        self.options.algo_runs_time_limit
    }

    /// Budget on wall-clock time
    #[inline]
    #[must_use]
    pub fn wallclock_limit(&self) -> f64 {
        self.options.wallclock_limit
    }

    /// Budget on the number of runs
    #[inline]
    #[must_use]
    pub fn run_count_limit(&self) -> f64 {
        self.options.run_count_limit
    }

    /// Output directory, if configured
    #[inline]
    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        self.options.output_dir.as_deref()
    }

    /// Training instance IDs
    #[inline]
    #[must_use]
    pub fn train_instances(&self) -> &[String] {
        &self.instances.train
    }

    /// Test instance IDs
    #[inline]
    #[must_use]
    pub fn test_instances(&self) -> &[String] {
        &self.instances.test
    }

    /// All instance data, including instance-specific arguments
    #[inline]
    #[must_use]
    pub fn instances(&self) -> &InstanceSet {
        &self.instances
    }

    /// Instance-specific argument string
    #[inline]
    #[must_use]
    pub fn instance_specific(&self, instance: &str) -> Option<&str> {
        self.instances.specific_args(instance)
    }

    /// Feature vectors, `None` when no feature file was given
    #[inline]
    #[must_use]
    pub fn features(&self) -> Option<&FeatureVectors> {
        self.features.as_ref()
    }

    /// Seeded parameter space
    #[inline]
    #[must_use]
    pub fn parameter_space(&self) -> &ParameterSpace {
        &self.parameter_space
    }

    /// Bound execution strategy
    #[inline]
    #[must_use]
    pub fn runner(&self) -> &Arc<dyn TargetAlgorithmRunner> {
        &self.runner
    }

    /// Assemble a run request with this scenario's cutoff, working directory
    /// and instance arguments
    #[must_use]
    pub fn run_request<'a>(
        &'a self,
        configuration: &'a Configuration,
        instance: Option<&'a str>,
        seed: u64,
    ) -> RunRequest<'a> {
        RunRequest {
            configuration,
            instance,
            instance_specific: instance.and_then(|id| self.instance_specific(id)),
            cutoff: self.options.cutoff_time,
            seed,
            exec_dir: Some(self.options.exec_dir.as_path()),
        }
    }

    /// Evaluate a configuration through the bound runner
    ///
    /// # Errors
    /// Propagates the runner's `TaeError`.
    pub fn evaluate(
        &self,
        configuration: &Configuration,
        instance: Option<&str>,
        seed: u64,
    ) -> Result<RunValue, TaeError> {
        self.runner.evaluate(&self.run_request(configuration, instance, seed))
    }
}

fn load_parameter_space(path: &Path) -> ScenarioResult<ParameterSpace> {
    if !path.is_file() {
        tracing::error!("Have not found parameter space file: {}", path.display());
        return Err(ScenarioError::MissingParameterSpaceFile {
            path: path.to_path_buf(),
        });
    }

    let text = crate::io::read_text(path)?;
    let mut space = pcs::parse(&text).map_err(|source| ScenarioError::InvalidParameterSpace {
        path: path.to_path_buf(),
        source,
    })?;
    space.seed(PARAMETER_SPACE_SEED);

    tracing::debug!("Loaded {} parameters from {}", space.len(), path.display());
    Ok(space)
}
