//! Transition-graph analysis of binary one-dimensional cellular automata.
//!
//! Every cell may run its own lookup-table rule over a bounded neighborhood,
//! under null or periodic boundary conditions. An [`Automaton`] materializes
//! its full configuration space once, and the analyses below read that graph.
//!
//! Layout
//! - `automaton`: cells, neighborhoods, validated construction, stepping and
//!   the per-automaton reports (tweaks, RMT complements, state maps).
//! - `graph`: the functional transition graph, cycle decomposition, rendering
//!   and permutation helpers.
//! - `search`: rule extraction, isomorphism search, cycle-reversal explorer.
//! - `linear`: rule vectors and GF(2) characteristic polynomials.
//! - `rand_eca`: table-driven generator of reversible ECA candidates.
//!
//! API Policy
//! - The crate is consumed by the `cli` crate of this workspace. There is no
//!   stable public API; `api` collects the surface the CLI relies on.

pub mod api;
pub mod automaton;
pub mod cfg;
pub mod error;
pub mod graph;
pub mod linear;
pub mod rand_eca;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use automaton::{Automaton, Boundary, Cell, Config, Neighborhood, NeighborhoodResolver, Rule};
pub use cfg::SearchCfg;
pub use error::CaError;
pub use graph::{Cycle, TransitionGraph};
pub use linear::{Polynomial, RuleVector};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::automaton::{Automaton, Boundary, Config, Rule};
    pub use crate::cfg::SearchCfg;
    pub use crate::error::CaError;
    pub use crate::graph::{Cycle, TransitionGraph};
    pub use crate::linear::{Polynomial, RuleVector};
    pub use crate::search::{
        exists_isomorphism, explore_reversals, isomorphic_rule_vectors, RuleExtractor,
    };
}
