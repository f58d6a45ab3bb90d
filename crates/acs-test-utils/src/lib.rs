//! Testing utilities for ACS workspace
//!
//! Shared fixtures: a temporary scenario directory with a parameter file,
//! optional instance and feature files, and the matching key/value source.

#![allow(missing_docs)]

use acs_scenario::{ScenarioMap, ScenarioSource};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Small solver parameter space used by most fixtures
pub const SOLVER_PCS: &str = "\
# toy solver
heuristic {greedy, random, lookahead} [greedy]
depth [1, 16] [4]i
noise [0.001, 1.0] [0.1]l
depth | heuristic in {lookahead}
{heuristic=random, noise=1.0}
";

/// Scenario files in a temporary directory
///
/// The directory lives as long as the fixture; every path written into the
/// mapping is absolute.
#[derive(Debug)]
pub struct ScenarioFixture {
    dir: TempDir,
    map: ScenarioMap,
}

impl ScenarioFixture {
    /// Fixture with `algo` and a written `paramfile`
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new().context("creating fixture directory")?;
        let mut fixture = Self {
            dir,
            map: ScenarioMap::new(),
        };
        let pcs = fixture.write("params.pcs", SOLVER_PCS)?;
        fixture.map.insert("algo".into(), "python wrapper.py".into());
        fixture.map.insert("paramfile".into(), path_value(&pcs));
        Ok(fixture)
    }

    /// Set a raw key
    #[must_use]
    pub fn with_key(mut self, key: &str, value: &str) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Remove a key
    #[must_use]
    pub fn without_key(mut self, key: &str) -> Self {
        self.map.shift_remove(key);
        self
    }

    /// Write a training instance file and reference it
    pub fn with_instances(mut self, lines: &str) -> anyhow::Result<Self> {
        let path = self.write("train.txt", lines)?;
        self.map.insert("instance_file".into(), path_value(&path));
        Ok(self)
    }

    /// Write a test instance file and reference it
    pub fn with_test_instances(mut self, lines: &str) -> anyhow::Result<Self> {
        let path = self.write("test.txt", lines)?;
        self.map.insert("test_instance_file".into(), path_value(&path));
        Ok(self)
    }

    /// Write a feature file and reference it
    pub fn with_features(mut self, csv: &str) -> anyhow::Result<Self> {
        let path = self.write("features.csv", csv)?;
        self.map.insert("feature_file".into(), path_value(&path));
        Ok(self)
    }

    /// Write a file into the fixture directory
    pub fn write(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Fixture directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Current key/value mapping
    pub fn map(&self) -> &ScenarioMap {
        &self.map
    }

    /// Mapping source for the current keys
    pub fn source(&self) -> ScenarioSource {
        ScenarioSource::Mapping(self.map.clone())
    }

    /// Write the current keys as a `key = value` scenario file
    pub fn write_scenario_file(&self) -> anyhow::Result<PathBuf> {
        let body: String = self
            .map
            .iter()
            .map(|(k, v)| format!("{k} = {v}\n"))
            .collect();
        self.write("scenario.txt", &body)
    }
}

fn path_value(path: &Path) -> String {
    path.display().to_string()
}

/// Install a test-friendly tracing subscriber; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
