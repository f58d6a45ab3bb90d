//! Parameter space
//!
//! Holds parameters in declaration order together with the conditions and
//! forbidden clauses that restrict them. Sampling is reproducible: once a
//! seed is set, [`ParameterSpace::rng`] always yields the same stream.

use crate::condition::{Condition, ForbiddenClause};
use crate::configuration::Configuration;
use crate::error::{PcsError, PcsResult};
use crate::parameter::{ParamValue, Parameter};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Upper bound on rejection-sampling rounds against forbidden clauses
pub const MAX_SAMPLING_ATTEMPTS: usize = 1000;

/// A declarative parameter search space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpace {
    parameters: IndexMap<String, Parameter>,
    conditions: Vec<Condition>,
    forbidden: Vec<ForbiddenClause>,
    seed: Option<u64>,
}

impl ParameterSpace {
    /// Create empty space
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    ///
    /// # Errors
    /// Returns `DuplicateParameter` if the name is already declared.
    pub fn add_parameter(&mut self, parameter: Parameter) -> PcsResult<()> {
        if self.parameters.contains_key(parameter.name()) {
            return Err(PcsError::DuplicateParameter(parameter.name().to_string()));
        }
        self.parameters.insert(parameter.name().to_string(), parameter);
        Ok(())
    }

    /// Add a condition
    ///
    /// # Errors
    /// - `UnknownParameter` if child or parent is undeclared
    /// - `InvalidValue` if a listed value is outside the parent's domain
    /// - `CyclicCondition` if the condition closes a dependency cycle
    pub fn add_condition(&mut self, condition: Condition) -> PcsResult<()> {
        if !self.parameters.contains_key(&condition.child) {
            return Err(PcsError::UnknownParameter(condition.child));
        }
        let parent = self
            .parameters
            .get(&condition.parent)
            .ok_or_else(|| PcsError::UnknownParameter(condition.parent.clone()))?;

        if let Some(bad) = condition.values.iter().find(|v| !parent.contains(v)) {
            return Err(PcsError::invalid_value(&condition.parent, bad.to_string()));
        }
        if condition.child == condition.parent || self.depends_on(&condition.parent, &condition.child) {
            return Err(PcsError::CyclicCondition(condition.child));
        }

        self.conditions.push(condition);
        Ok(())
    }

    /// Add a forbidden clause
    ///
    /// # Errors
    /// Returns `UnknownParameter` or `InvalidValue` for bad assignments.
    pub fn add_forbidden(&mut self, clause: ForbiddenClause) -> PcsResult<()> {
        for (name, value) in &clause.assignments {
            let param = self
                .parameters
                .get(name)
                .ok_or_else(|| PcsError::UnknownParameter(name.clone()))?;
            if !param.contains(value) {
                return Err(PcsError::invalid_value(name, value.to_string()));
            }
        }
        self.forbidden.push(clause);
        Ok(())
    }

    /// True if `name` (transitively) depends on `ancestor` through conditions
    fn depends_on(&self, name: &str, ancestor: &str) -> bool {
        let mut stack = vec![name];
        let mut seen = Vec::new();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            stack.extend(
                self.conditions
                    .iter()
                    .filter(|c| c.child == current)
                    .map(|c| c.parent.as_str()),
            );
        }
        false
    }

    /// Fix the sampling seed
    pub fn seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Seed set via [`ParameterSpace::seed`], if any
    #[inline]
    #[must_use]
    pub fn current_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Fresh RNG for sampling from this space
    ///
    /// Seeded spaces return the same stream on every call; unseeded spaces
    /// draw from OS entropy.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Look up a parameter by name
    #[inline]
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    /// Declared conditions
    #[inline]
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Declared forbidden clauses
    #[inline]
    #[must_use]
    pub fn forbidden_clauses(&self) -> &[ForbiddenClause] {
        &self.forbidden
    }

    /// Number of parameters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// True if the space has no parameters
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Whether `name` is active under the given full assignment
    #[must_use]
    pub fn is_active(&self, name: &str, values: &IndexMap<String, ParamValue>) -> bool {
        self.conditions
            .iter()
            .filter(|c| c.child == name)
            .all(|c| self.is_active(&c.parent, values) && c.is_satisfied_by(values.get(&c.parent)))
    }

    /// The configuration made of every parameter's default
    ///
    /// # Errors
    /// Returns `ForbiddenDefault` if the defaults hit a forbidden clause.
    pub fn default_configuration(&self) -> PcsResult<Configuration> {
        let full: IndexMap<String, ParamValue> = self
            .parameters
            .iter()
            .map(|(name, p)| (name.clone(), p.default_value()))
            .collect();
        let values = self.restrict_to_active(&full);

        if self.is_forbidden(&values) {
            return Err(PcsError::ForbiddenDefault);
        }
        Ok(Configuration::from_values(values))
    }

    /// Draw a random configuration
    ///
    /// Inactive parameters are dropped; draws that hit a forbidden clause
    /// are rejected and redrawn.
    ///
    /// # Errors
    /// Returns `SamplingExhausted` after [`MAX_SAMPLING_ATTEMPTS`] rejections.
    pub fn sample_configuration<R: Rng + ?Sized>(&self, rng: &mut R) -> PcsResult<Configuration> {
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let full: IndexMap<String, ParamValue> = self
                .parameters
                .iter()
                .map(|(name, p)| (name.clone(), p.sample(rng)))
                .collect();
            let values = self.restrict_to_active(&full);

            if !self.is_forbidden(&values) {
                return Ok(Configuration::from_values(values));
            }
        }
        Err(PcsError::SamplingExhausted {
            attempts: MAX_SAMPLING_ATTEMPTS,
        })
    }

    /// Build a configuration from explicit values
    ///
    /// Every active parameter must be given a value inside its domain;
    /// values for inactive parameters are dropped.
    ///
    /// # Errors
    /// `UnknownParameter`, `InvalidValue`, or `InvalidValue` with an empty
    /// value for a missing active parameter.
    pub fn configuration(&self, values: IndexMap<String, ParamValue>) -> PcsResult<Configuration> {
        for (name, value) in &values {
            let param = self
                .parameters
                .get(name)
                .ok_or_else(|| PcsError::UnknownParameter(name.clone()))?;
            if !param.contains(value) {
                return Err(PcsError::invalid_value(name, value.to_string()));
            }
        }

        let mut ordered = IndexMap::with_capacity(values.len());
        for name in self.parameters.keys() {
            if let Some(v) = values.get(name) {
                ordered.insert(name.clone(), v.clone());
            }
        }

        for name in self.parameters.keys() {
            if self.is_active(name, &ordered) && !ordered.contains_key(name) {
                return Err(PcsError::invalid_value(name, ""));
            }
        }

        let active = self.restrict_to_active(&ordered);
        if self.is_forbidden(&active) {
            return Err(PcsError::invalid_value(
                "configuration",
                Configuration::from_values(active).to_string(),
            ));
        }
        Ok(Configuration::from_values(active))
    }

    fn restrict_to_active(&self, full: &IndexMap<String, ParamValue>) -> IndexMap<String, ParamValue> {
        full.iter()
            .filter(|(name, _)| self.is_active(name, full))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn is_forbidden(&self, values: &IndexMap<String, ParamValue>) -> bool {
        self.forbidden.iter().any(|clause| clause.matches(values))
    }
}
