//! Instance ingestion
//!
//! Each instance line is `<id> [args...]`. The ID goes into the ordered
//! instance list; any remaining tokens, joined by single spaces, become that
//! instance's specific arguments. Duplicate IDs are kept as given.

use crate::error::{InstanceRole, ScenarioError, ScenarioResult};
use crate::io::read_instance_file;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Training and test instances plus per-instance arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceSet {
    /// Training instance IDs in file order
    pub train: Vec<String>,
    /// Test instance IDs in file order
    pub test: Vec<String>,
    /// Instance ID → argument string, for lines with extra tokens
    pub specific: IndexMap<String, String>,
}

impl InstanceSet {
    /// Load training and test instance files
    ///
    /// Either path may be absent, which leaves that list empty.
    ///
    /// # Errors
    /// - `MissingInstanceFile` if a given path is not a file
    /// - `Read` if an existing file cannot be read
    pub fn load(train: Option<&Path>, test: Option<&Path>) -> ScenarioResult<Self> {
        let mut set = Self::default();

        if let Some(path) = train {
            let lines = read_instances(InstanceRole::Train, path)?;
            set.train = set.ingest(lines);
        }
        if let Some(path) = test {
            let lines = read_instances(InstanceRole::Test, path)?;
            set.test = set.ingest(lines);
        }

        tracing::debug!(
            "Loaded {} training and {} test instances ({} with specific arguments)",
            set.train.len(),
            set.test.len(),
            set.specific.len()
        );
        Ok(set)
    }

    /// Split tokenized lines into IDs, recording instance-specific arguments
    pub fn ingest(&mut self, lines: Vec<Vec<String>>) -> Vec<String> {
        let mut ids = Vec::with_capacity(lines.len());

        for mut tokens in lines {
            if tokens.is_empty() {
                continue;
            }
            let rest = tokens.split_off(1);
            let id = tokens.swap_remove(0);

            if !rest.is_empty() {
                let args = rest.join(" ");
                if let Some(previous) = self.specific.get(&id).filter(|prev| **prev != args) {
                    tracing::warn!(
                        "Instance '{}' listed with conflicting arguments: '{}' replaced by '{}'",
                        id,
                        previous,
                        args
                    );
                }
                self.specific.insert(id.clone(), args);
            }
            ids.push(id);
        }

        ids
    }

    /// Arguments recorded for an instance
    #[inline]
    #[must_use]
    pub fn specific_args(&self, id: &str) -> Option<&str> {
        self.specific.get(id).map(String::as_str)
    }
}

fn read_instances(role: InstanceRole, path: &Path) -> ScenarioResult<Vec<Vec<String>>> {
    if !path.is_file() {
        tracing::error!("Have not found {} instance file: {}", role, path.display());
        return Err(ScenarioError::MissingInstanceFile {
            role,
            path: path.to_path_buf(),
        });
    }
    Ok(read_instance_file(path)?)
}
