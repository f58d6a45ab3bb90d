//! Conditions and forbidden clauses

use crate::parameter::ParamValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `child | parent in {values}`
///
/// The child is active only while the parent is active and takes one of
/// the listed values. A child with several conditions needs all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Conditioned parameter
    pub child: String,
    /// Parameter the child depends on
    pub parent: String,
    /// Parent values that activate the child
    pub values: Vec<ParamValue>,
}

impl Condition {
    /// Create a condition
    #[inline]
    #[must_use]
    pub fn new(child: impl Into<String>, parent: impl Into<String>, values: Vec<ParamValue>) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
            values,
        }
    }

    /// Check the parent's value against this condition
    #[inline]
    #[must_use]
    pub fn is_satisfied_by(&self, parent_value: Option<&ParamValue>) -> bool {
        parent_value.is_some_and(|v| self.values.contains(v))
    }
}

/// `{a=x, b=y}`: a combination no configuration may contain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForbiddenClause {
    /// Assignments that must all hold for the clause to fire
    pub assignments: Vec<(String, ParamValue)>,
}

impl ForbiddenClause {
    /// Create a forbidden clause
    #[inline]
    #[must_use]
    pub fn new(assignments: Vec<(String, ParamValue)>) -> Self {
        Self { assignments }
    }

    /// True if every assignment holds in `values`
    #[must_use]
    pub fn matches(&self, values: &IndexMap<String, ParamValue>) -> bool {
        self.assignments
            .iter()
            .all(|(name, value)| values.get(name) == Some(value))
    }
}
