//! Error types for scenario construction
//!
//! Provides error handling for:
//! - Raw source reading (scenario, instance and feature files)
//! - Scenario descriptor construction (every stage is fatal)
//! - Target algorithm evaluation

use acs_configspace::PcsError;
use std::fmt;
use std::path::PathBuf;

/// Errors while reading scenario, instance or feature files
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario line without a usable key
    #[error("malformed line {line} in {path}: '{content}'")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// Feature file without a header or without feature columns
    #[error("feature file {path} has no feature header")]
    MissingFeatureHeader { path: PathBuf },

    /// Feature value that does not parse as a number
    #[error("invalid feature value '{value}' for instance '{instance}' in {path}")]
    InvalidFeatureValue {
        path: PathBuf,
        instance: String,
        value: String,
    },

    /// Feature row width differs from the header
    #[error("instance '{instance}' in {path} has {found} features, header declares {expected}")]
    FeatureWidthMismatch {
        path: PathBuf,
        instance: String,
        expected: usize,
        found: usize,
    },

    /// Same instance listed twice in a feature file
    #[error("duplicate feature row for instance '{instance}' in {path}")]
    DuplicateFeatureRow { path: PathBuf, instance: String },
}

impl ReadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Which instance list a file feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceRole {
    /// Training instances, used during configuration
    Train,
    /// Test instances, held out for validation
    Test,
}

impl fmt::Display for InstanceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => f.write_str("training"),
            Self::Test => f.write_str("test"),
        }
    }
}

/// Scenario construction errors
///
/// Every variant is fatal to the construction call; no partial descriptor
/// is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Source is neither a path nor a key/value mapping
    #[error("unsupported scenario source: {0} (expected a path or a mapping)")]
    UnsupportedSourceType(String),

    /// Scenario file could not be read
    #[error("invalid scenario source: {0}")]
    InvalidSource(#[source] ReadError),

    /// Required key absent from the scenario
    #[error("missing required field: '{0}'")]
    MissingRequiredField(String),

    /// Key present but its value is unusable
    #[error("invalid value for '{key}': '{value}'")]
    InvalidFieldValue { key: String, value: String },

    /// Overall objective with a malformed numeric suffix
    #[error("invalid overall objective: '{0}'")]
    InvalidObjective(String),

    /// Instance file given but not present
    #[error("{role} instance file not found: {path}")]
    MissingInstanceFile { role: InstanceRole, path: PathBuf },

    /// Training instance without a feature row
    #[error("no features for instance: '{0}'")]
    MissingFeatureEntry(String),

    /// Feature vector whose length differs from the feature names
    #[error("instance '{instance}' has {found} features, expected {expected}")]
    FeatureWidthMismatch {
        instance: String,
        expected: usize,
        found: usize,
    },

    /// Parameter space file not present
    #[error("parameter space file not found: {path}")]
    MissingParameterSpaceFile { path: PathBuf },

    /// Parameter space file present but not valid PCS
    #[error("invalid parameter space in {path}: {source}")]
    InvalidParameterSpace {
        path: PathBuf,
        #[source]
        source: PcsError,
    },

    /// Instance, feature or parameter file read failure
    #[error("read error: {0}")]
    Read(#[from] ReadError),
}

impl ScenarioError {
    /// Create invalid field value error
    pub fn invalid_field(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check if error is caused by a referenced file that does not exist
    #[inline]
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            Self::MissingInstanceFile { .. } | Self::MissingParameterSpaceFile { .. }
        )
    }
}

/// Result type alias for scenario construction
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors while evaluating a configuration on the target algorithm
#[derive(Debug, thiserror::Error)]
pub enum TaeError {
    /// Target algorithm command has no tokens
    #[error("empty target algorithm command")]
    EmptyCommand,

    /// Process could not be started
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Output contains no result line
    #[error("no result line in target algorithm output")]
    MissingResult,

    /// Result line present but unparsable
    #[error("malformed result line: '{0}'")]
    MalformedResult(String),

    /// Failure reported by a custom runner
    #[error("evaluation failed: {0}")]
    Failed(String),
}
