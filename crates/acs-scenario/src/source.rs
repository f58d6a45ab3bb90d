//! Scenario sources
//!
//! A scenario comes either from a file on disk or from an in-memory
//! key/value mapping. [`ScenarioSource`] makes that choice explicit; callers
//! holding loosely-typed input (JSON) go through `TryFrom<serde_json::Value>`.

use crate::error::{ScenarioError, ScenarioResult};
use crate::io::read_scenario_file;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Raw scenario: string keys to string values, in source order
pub type ScenarioMap = IndexMap<String, String>;

/// Where a scenario is read from
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioSource {
    /// Path to a scenario file
    File(PathBuf),
    /// Already-parsed key/value pairs
    Mapping(ScenarioMap),
}

impl ScenarioSource {
    /// Resolve to a key/value mapping
    ///
    /// Files are read through the scenario file reader; mappings are
    /// borrowed as they are.
    ///
    /// # Errors
    /// Returns `InvalidSource` if the scenario file cannot be read or parsed.
    pub fn resolve(&self) -> ScenarioResult<Cow<'_, ScenarioMap>> {
        match self {
            Self::File(path) => {
                tracing::info!("Reading scenario file: {}", path.display());
                read_scenario_file(path)
                    .map(Cow::Owned)
                    .map_err(ScenarioError::InvalidSource)
            }
            Self::Mapping(map) => Ok(Cow::Borrowed(map)),
        }
    }

    /// Build a mapping source from key/value pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Mapping(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<PathBuf> for ScenarioSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for ScenarioSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<ScenarioMap> for ScenarioSource {
    fn from(map: ScenarioMap) -> Self {
        Self::Mapping(map)
    }
}

impl From<HashMap<String, String>> for ScenarioSource {
    fn from(map: HashMap<String, String>) -> Self {
        Self::Mapping(map.into_iter().collect())
    }
}

impl TryFrom<JsonValue> for ScenarioSource {
    type Error = ScenarioError;

    /// Strings are paths, objects are mappings; scalar object values are
    /// stringified (`true` → `"true"`, `10` → `"10"`).
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::String(path) => Ok(Self::File(PathBuf::from(path))),
            JsonValue::Object(obj) => obj
                .into_iter()
                .map(|(key, v)| match v {
                    JsonValue::String(s) => Ok((key, s)),
                    JsonValue::Number(n) => Ok((key, n.to_string())),
                    JsonValue::Bool(b) => Ok((key, b.to_string())),
                    other => Err(ScenarioError::invalid_field(key, other.to_string())),
                })
                .collect::<ScenarioResult<ScenarioMap>>()
                .map(Self::Mapping),
            other => Err(ScenarioError::UnsupportedSourceType(json_kind(&other).to_string())),
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
