//! Exhaustive searches over the configuration space.
//!
//! Purpose
//! - `RuleExtractor`: does a hypothetical graph correspond to any per-cell
//!   rule set on the given geometry? The oracle behind every search below.
//! - Isomorphism: existence check and enumeration over all permutations of
//!   the `2^n` configurations, fanned out over the image of configuration 0.
//! - Cycle reversal: which subsets of cycles can be reversed and still come
//!   from an automaton.
//!
//! Why this design
//! - The spaces are enumerated exactly; `cfg::MAX_SIZE` and
//!   `SearchCfg::max_reversal_cycles` bound them. Nothing is sampled.
//! - Workers own their permutation and graph buffers. Shared state is one
//!   `AtomicBool` (existence) or one `Mutex` around the output sink
//!   (enumeration).
//!
//! Note
//! - Permutation searches are `O((2^n - 1)!)` per head and only practical for
//!   three cells, or when the cycle-structure pre-filter rejects the pair.

mod extract;
mod iso;
mod reversal;

pub use extract::RuleExtractor;
pub use iso::{exists_isomorphism, for_each_isomorphism, isomorphic_rule_vectors, Isomorphism};
pub use reversal::{
    explore_reversals, reversal_summary, reversed_graph, ReversalOutcome, ReversalReport,
    ReversalSummary,
};
