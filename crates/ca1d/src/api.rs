//! Curated surface used by the CLI (UNSTABLE).
//!
//! Important
//! - This is not a public API. Breaking changes are allowed and expected.
//! - Prefer these re-exports over deep module paths in front ends.

// Automata
pub use crate::automaton::{
    max_rule, AffectedConfigs, Automaton, Boundary, Cell, ComplementedVariant, Config,
    Neighborhood, NeighborhoodResolver, RmtComplement, Rule, RuleTweak, StateNeighborhoodMap,
    RMT_PAIRS,
};
pub use crate::cfg::{SearchCfg, MAX_LEFT_RADIUS, MAX_REVERSAL_CYCLES, MAX_RIGHT_RADIUS, MAX_SIZE};
pub use crate::error::CaError;
// Graphs
pub use crate::graph::{are_isomorphic_graphs, next_permutation, Cycle, TransitionGraph};
// GF(2)
pub use crate::linear::{
    additive_dependencies, characteristic_polynomial, complementable_rule_vectors, Polynomial,
    RuleVector, LINEAR_RULES,
};
// Searches
pub use crate::search::{
    exists_isomorphism, explore_reversals, for_each_isomorphism, isomorphic_rule_vectors,
    reversal_summary, Isomorphism, ReversalOutcome, ReversalReport, ReversalSummary,
    RuleExtractor,
};
// Generator
pub use crate::rand_eca::{
    draw_reversible, draw_seeded, find as find_reversible, EcaSample, GeneratorError,
    ReversibleEcaParams,
};
