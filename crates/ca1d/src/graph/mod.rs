//! Transition graphs: one successor per configuration.
//!
//! Purpose
//! - Out-degree is exactly one, so the graph is a plain array indexed by
//!   configuration (`next[c]` is the successor of `c`), built once per
//!   automaton and read-only afterwards.
//! - Provide the cycle decomposition every downstream analysis starts from,
//!   the textual rendering, and permutation helpers for the searches.
//!
//! Note on layout
//! - `cycles.rs` (decomposition), `render.rs` (text), `perm.rs` (permutation
//!   enumeration and relabeling).

mod cycles;
mod perm;
mod render;

pub use cycles::Cycle;
pub use perm::{are_isomorphic_graphs, next_permutation, rotated_identity};

use crate::automaton::Config;
use crate::error::CaError;

/// Total function `configs -> configs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionGraph {
    next: Vec<Config>,
}

impl TransitionGraph {
    /// Validate an externally supplied successor array.
    pub fn new(next: Vec<Config>) -> Result<Self, CaError> {
        if next.is_empty() || !next.len().is_power_of_two() {
            return Err(CaError::MalformedGraph {
                reason: format!("{} nodes is not a power of two", next.len()),
            });
        }
        let len = next.len();
        if let Some((node, &target)) = next.iter().enumerate().find(|&(_, &t)| t >= len) {
            return Err(CaError::MalformedGraph {
                reason: format!("node {node} points to {target}, outside 0..{len}"),
            });
        }
        Ok(Self { next })
    }

    /// Successor array produced by the crate itself (already total).
    pub(crate) fn from_raw(next: Vec<Config>) -> Self {
        debug_assert!(next.iter().all(|&t| t < next.len()));
        Self { next }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.next.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Successor of `config`.
    #[inline]
    pub fn next(&self, config: Config) -> Config {
        self.next[config]
    }

    #[inline]
    pub fn as_slice(&self) -> &[Config] {
        &self.next
    }

    /// `(config, successor)` pairs in configuration order.
    pub fn edges(&self) -> impl Iterator<Item = (Config, Config)> + '_ {
        self.next.iter().copied().enumerate()
    }

    /// Disjoint cycles in discovery order (walks start at ascending nodes).
    pub fn cycles(&self) -> Vec<Cycle> {
        cycles::decompose(&self.next)
    }

    /// True iff every node lies on a cycle (the map is a bijection).
    pub fn is_bijective(&self) -> bool {
        let mut hit = vec![false; self.next.len()];
        for &t in &self.next {
            if std::mem::replace(&mut hit[t], true) {
                return false;
            }
        }
        true
    }

    /// Image graph under the relabeling `perm`: writes `out[perm[c]] = perm[next[c]]`.
    #[inline]
    pub fn permute_into(&self, perm: &[Config], out: &mut [Config]) {
        for (c, &t) in self.next.iter().enumerate() {
            out[perm[c]] = perm[t];
        }
    }

    /// `perm(self[c]) == other[perm(c)]` for every `c`.
    pub fn equals_under(&self, perm: &[Config], other: &TransitionGraph) -> bool {
        self.len() == other.len()
            && self
                .next
                .iter()
                .enumerate()
                .all(|(c, &t)| perm[t] == other.next[perm[c]])
    }

    /// Configurations whose successor differs between the two graphs.
    pub fn differing_configs(&self, other: &TransitionGraph) -> Vec<Config> {
        self.next
            .iter()
            .zip(&other.next)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(c, _)| c)
            .collect()
    }

    /// Cycles as `a --> b --> a`, then every remaining tree walk.
    pub fn render(&self) -> String {
        render::render(self)
    }
}

#[cfg(test)]
mod tests;
