//! Parameter definitions
//!
//! A parameter is a name plus a [`Domain`]. Three domain kinds exist:
//! - Categorical: a finite list of string choices
//! - Float: a closed real interval, optionally log-scaled
//! - Integer: a closed integer interval, optionally log-scaled

use crate::error::{PcsError, PcsResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete value assigned to a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer value
    Integer(i64),
    /// Real value
    Float(f64),
    /// Categorical choice
    Categorical(String),
}

impl ParamValue {
    /// Numeric view of the value (`None` for categoricals)
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Categorical(_) => None,
        }
    }

    /// Choice name (`None` for numeric values)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Categorical(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Categorical(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Categorical(s.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Value domain of a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Domain {
    /// Finite set of choices
    Categorical {
        choices: Vec<String>,
        default: String,
    },
    /// Closed real interval
    Float {
        lower: f64,
        upper: f64,
        default: f64,
        log: bool,
    },
    /// Closed integer interval
    Integer {
        lower: i64,
        upper: i64,
        default: i64,
        log: bool,
    },
}

/// A named, typed parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    domain: Domain,
}

impl Parameter {
    /// Create a categorical parameter
    ///
    /// # Errors
    /// Returns `InvalidDomain` if there are no choices, a choice repeats,
    /// or the default is not one of the choices.
    pub fn categorical(
        name: impl Into<String>,
        choices: Vec<String>,
        default: impl Into<String>,
    ) -> PcsResult<Self> {
        let name = name.into();
        let default = default.into();

        if choices.is_empty() {
            return Err(PcsError::invalid_domain(name, "no choices"));
        }
        for (i, choice) in choices.iter().enumerate() {
            if choices[..i].contains(choice) {
                return Err(PcsError::invalid_domain(
                    name,
                    format!("repeated choice '{choice}'"),
                ));
            }
        }
        if !choices.contains(&default) {
            return Err(PcsError::invalid_domain(
                name,
                format!("default '{default}' is not a choice"),
            ));
        }

        Ok(Self {
            name,
            domain: Domain::Categorical { choices, default },
        })
    }

    /// Create a real-valued parameter
    ///
    /// # Errors
    /// Returns `InvalidDomain` for non-finite or inverted bounds, a default
    /// outside the bounds, or a log scale with a non-positive lower bound.
    pub fn float(
        name: impl Into<String>,
        lower: f64,
        upper: f64,
        default: f64,
        log: bool,
    ) -> PcsResult<Self> {
        let name = name.into();

        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(PcsError::invalid_domain(
                name,
                format!("bad bounds [{lower}, {upper}]"),
            ));
        }
        if log && lower <= 0.0 {
            return Err(PcsError::invalid_domain(
                name,
                "log scale needs a positive lower bound",
            ));
        }
        if !(lower..=upper).contains(&default) {
            return Err(PcsError::invalid_domain(
                name,
                format!("default {default} outside [{lower}, {upper}]"),
            ));
        }

        Ok(Self {
            name,
            domain: Domain::Float {
                lower,
                upper,
                default,
                log,
            },
        })
    }

    /// Create an integer parameter
    ///
    /// # Errors
    /// Same rules as [`Parameter::float`].
    pub fn integer(
        name: impl Into<String>,
        lower: i64,
        upper: i64,
        default: i64,
        log: bool,
    ) -> PcsResult<Self> {
        let name = name.into();

        if lower > upper {
            return Err(PcsError::invalid_domain(
                name,
                format!("bad bounds [{lower}, {upper}]"),
            ));
        }
        if log && lower <= 0 {
            return Err(PcsError::invalid_domain(
                name,
                "log scale needs a positive lower bound",
            ));
        }
        if !(lower..=upper).contains(&default) {
            return Err(PcsError::invalid_domain(
                name,
                format!("default {default} outside [{lower}, {upper}]"),
            ));
        }

        Ok(Self {
            name,
            domain: Domain::Integer {
                lower,
                upper,
                default,
                log,
            },
        })
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter domain
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Default value
    #[must_use]
    pub fn default_value(&self) -> ParamValue {
        match &self.domain {
            Domain::Categorical { default, .. } => ParamValue::Categorical(default.clone()),
            Domain::Float { default, .. } => ParamValue::Float(*default),
            Domain::Integer { default, .. } => ParamValue::Integer(*default),
        }
    }

    /// Check whether a value lies in this parameter's domain
    #[must_use]
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (&self.domain, value) {
            (Domain::Categorical { choices, .. }, ParamValue::Categorical(v)) => choices.contains(v),
            (Domain::Float { lower, upper, .. }, ParamValue::Float(v)) => (*lower..=*upper).contains(v),
            (Domain::Integer { lower, upper, .. }, ParamValue::Integer(v)) => (*lower..=*upper).contains(v),
            _ => false,
        }
    }

    /// Parse a textual value against this parameter's domain
    ///
    /// # Errors
    /// Returns `InvalidValue` if the text does not parse or is out of domain.
    pub fn parse_value(&self, raw: &str) -> PcsResult<ParamValue> {
        let raw = raw.trim();
        let value = match &self.domain {
            Domain::Categorical { .. } => Some(ParamValue::Categorical(raw.to_string())),
            Domain::Float { .. } => raw.parse::<f64>().ok().map(ParamValue::Float),
            Domain::Integer { .. } => raw.parse::<i64>().ok().map(ParamValue::Integer),
        };

        match value {
            Some(v) if self.contains(&v) => Ok(v),
            _ => Err(PcsError::invalid_value(&self.name, raw)),
        }
    }

    /// Draw a value uniformly (or log-uniformly) from the domain
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParamValue {
        match &self.domain {
            Domain::Categorical { choices, .. } => {
                let idx = rng.random_range(0..choices.len());
                ParamValue::Categorical(choices[idx].clone())
            }
            Domain::Float {
                lower, upper, log, ..
            } => ParamValue::Float(sample_real(rng, *lower, *upper, *log)),
            Domain::Integer {
                lower, upper, log, ..
            } => {
                if *log {
                    #[allow(clippy::cast_precision_loss)]
                    let x = sample_real(rng, *lower as f64, *upper as f64, true);
                    #[allow(clippy::cast_possible_truncation)]
                    let v = (x.round() as i64).clamp(*lower, *upper);
                    ParamValue::Integer(v)
                } else {
                    ParamValue::Integer(rng.random_range(*lower..=*upper))
                }
            }
        }
    }
}

fn sample_real<R: Rng + ?Sized>(rng: &mut R, lower: f64, upper: f64, log: bool) -> f64 {
    if log {
        let x = rng.random_range(lower.ln()..=upper.ln()).exp();
        x.clamp(lower, upper)
    } else {
        rng.random_range(lower..=upper)
    }
}
