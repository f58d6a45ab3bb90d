//! Error types for parameter spaces
//!
//! Covers both halves of the crate:
//! - PCS text parsing (syntax, unknown references, bad domains)
//! - Space operations (conditions, forbidden clauses, sampling)

/// Errors raised while building or sampling a parameter space
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PcsError {
    /// Line does not match any PCS declaration form
    #[error("syntax error on line {line}: '{content}'")]
    Syntax { line: usize, content: String },

    /// Parameter declared twice
    #[error("duplicate parameter: '{0}'")]
    DuplicateParameter(String),

    /// Condition or forbidden clause references an undeclared parameter
    #[error("unknown parameter: '{0}'")]
    UnknownParameter(String),

    /// Value is outside the parameter's domain or does not parse for it
    #[error("invalid value '{value}' for parameter '{parameter}'")]
    InvalidValue { parameter: String, value: String },

    /// Domain bounds or default are inconsistent
    #[error("invalid domain for parameter '{parameter}': {reason}")]
    InvalidDomain { parameter: String, reason: String },

    /// Conditions form a cycle through the named parameter
    #[error("cyclic condition involving '{0}'")]
    CyclicCondition(String),

    /// The all-defaults configuration hits a forbidden clause
    #[error("default configuration is forbidden")]
    ForbiddenDefault,

    /// Rejection sampling never produced an allowed configuration
    #[error("no allowed configuration after {attempts} sampling attempts")]
    SamplingExhausted { attempts: usize },
}

impl PcsError {
    /// Create syntax error for a 1-based line number
    pub fn syntax(line: usize, content: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            content: content.into(),
        }
    }

    /// Create invalid value error
    pub fn invalid_value(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create invalid domain error
    pub fn invalid_domain(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for parameter space operations
pub type PcsResult<T> = Result<T, PcsError>;
