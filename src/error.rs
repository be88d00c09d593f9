//! Crate-wide error type
//!
//! Geometry edge cases in the generator never reach this type, they are
//! absorbed where they happen. What does surface is bad configuration and
//! numerical blow-up during integration.

use std::fmt;

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of the body state went non-finite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Position,
    Velocity,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Position => write!(f, "position"),
            Quantity::Velocity => write!(f, "velocity"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected before the simulation starts.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A position or velocity component became NaN/inf.
    #[error("numerical instability at step {step}: body {body} has a non-finite {quantity}")]
    NumericalInstability {
        step: u64,
        body: usize,
        quantity: Quantity,
    },

    /// `update` called again after a blow-up.
    #[error("engine halted after numerical instability at step {step}")]
    Halted { step: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
