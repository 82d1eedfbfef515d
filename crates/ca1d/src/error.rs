//! Errors surfaced by construction and by the analysis operations.
//!
//! A candidate graph that no per-cell rule set can produce is not an error;
//! extraction reports it as `None`.

use std::fmt;

use crate::automaton::Rule;

/// Construction-time and operation-domain failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaError {
    /// `num_cells` is zero or above the configured maximum.
    UnsupportedSize { num_cells: usize, max: usize },
    /// Left radius above the configured maximum.
    UnsupportedLeftRadius { radius: usize, max: usize },
    /// Right radius above the configured maximum.
    UnsupportedRightRadius { radius: usize, max: usize },
    /// `num_cells < left + right + 1`.
    NeighborhoodTooLarge { num_cells: usize, neighborhood: usize },
    /// One rule per cell is required.
    RuleCountMismatch { expected: usize, found: usize },
    /// Rule number does not fit into `2^(2^neighborhood)` values.
    RuleOutOfRange { cell: usize, rule: Rule, max: Rule },
    /// Boundary symbol other than `n`/`p` (or `null`/`periodic`).
    InvalidBoundary(String),
    /// Configuration outside `[0, 2^num_cells)`.
    ConfigOutOfRange { config: usize, num_configs: usize },
    /// Externally supplied graph is not a total function on a power-of-two node set.
    MalformedGraph { reason: String },
    /// Operation requires radius 1/1.
    NotElementary { operation: &'static str },
    /// Operation requires every rule to be additive.
    NotAdditive { rule: Rule },
    /// Operation requires a reversible automaton.
    NotReversible { operation: &'static str },
    /// Reversal enumeration would need `2^cycles` candidates.
    TooManyCycles { cycles: usize, max: usize },
    /// Dedicated rayon pool could not be built.
    ThreadPool(String),
}

impl fmt::Display for CaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaError::UnsupportedSize { num_cells, max } => write!(
                f,
                "unsupported cellular automaton size {num_cells} (supported: 1..={max})"
            ),
            CaError::UnsupportedLeftRadius { radius, max } => {
                write!(f, "unsupported left radius {radius} (max {max})")
            }
            CaError::UnsupportedRightRadius { radius, max } => {
                write!(f, "unsupported right radius {radius} (max {max})")
            }
            CaError::NeighborhoodTooLarge {
                num_cells,
                neighborhood,
            } => write!(
                f,
                "neighborhood size {neighborhood} can't be greater than CA size {num_cells}"
            ),
            CaError::RuleCountMismatch { expected, found } => write!(
                f,
                "number of rules must equal number of cells (expected {expected}, got {found})"
            ),
            CaError::RuleOutOfRange { cell, rule, max } => {
                write!(f, "invalid rule {rule} for cell {cell} (max {max})")
            }
            CaError::InvalidBoundary(sym) => {
                write!(f, "invalid boundary condition {sym:?} (expected n or p)")
            }
            CaError::ConfigOutOfRange {
                config,
                num_configs,
            } => write!(
                f,
                "configuration {config} out of range (automaton has {num_configs} configurations)"
            ),
            CaError::MalformedGraph { reason } => write!(f, "malformed transition graph: {reason}"),
            CaError::NotElementary { operation } => {
                write!(f, "{operation} is only supported for ECAs")
            }
            CaError::NotAdditive { rule } => write!(
                f,
                "cannot represent non-additive rule {rule} in a characteristic matrix"
            ),
            CaError::NotReversible { operation } => {
                write!(f, "{operation} is only supported for reversible ECAs")
            }
            CaError::TooManyCycles { cycles, max } => write!(
                f,
                "{cycles} cycles exceed the reversal enumeration limit of {max}"
            ),
            CaError::ThreadPool(reason) => write!(f, "could not build thread pool: {reason}"),
        }
    }
}

impl std::error::Error for CaError {}
