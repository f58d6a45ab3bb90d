//! ACS Parameter Spaces
//!
//! Declarative descriptions of a target algorithm's configurable parameters,
//! read from PCS text.
//!
//! # Core Concepts
//!
//! - [`Parameter`]: a named categorical, real or integer domain
//! - [`Condition`]: activates a child parameter for certain parent values
//! - [`ForbiddenClause`]: a value combination that must never be produced
//! - [`ParameterSpace`]: all of the above plus a sampling seed
//! - [`Configuration`]: values for the active parameters of a space
//!
//! # Example
//!
//! ```rust
//! use acs_configspace::pcs;
//!
//! let mut space = pcs::parse("mode {fast, exact} [fast]\nlimit [1, 100] [10]i").unwrap();
//! space.seed(42);
//!
//! let default = space.default_configuration().unwrap();
//! assert_eq!(default.len(), 2);
//!
//! let mut rng = space.rng();
//! let sampled = space.sample_configuration(&mut rng).unwrap();
//! assert!(sampled.contains("limit"));
//! ```

#![warn(unreachable_pub)]

pub mod condition;
pub mod configuration;
pub mod error;
pub mod parameter;
pub mod pcs;
pub mod space;

pub use condition::{Condition, ForbiddenClause};
pub use configuration::Configuration;
pub use error::{PcsError, PcsResult};
pub use parameter::{Domain, ParamValue, Parameter};
pub use space::{ParameterSpace, MAX_SAMPLING_ATTEMPTS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
