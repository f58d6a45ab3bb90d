//! Configurations: assignments of values to the active parameters of a space

use crate::parameter::ParamValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Values for the active parameters of a [`ParameterSpace`](crate::ParameterSpace)
///
/// Inactive parameters are absent, not set to a placeholder. Iteration
/// follows the declaration order of the space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    values: IndexMap<String, ParamValue>,
}

impl Configuration {
    pub(crate) fn from_values(values: IndexMap<String, ParamValue>) -> Self {
        Self { values }
    }

    /// Value of a parameter, `None` if it is inactive or unknown
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Whether a parameter is set in this configuration
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of active parameters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no parameter is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Underlying value map
    #[inline]
    #[must_use]
    pub fn values(&self) -> &IndexMap<String, ParamValue> {
        &self.values
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
