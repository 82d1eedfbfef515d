//! Rule synthesis from a candidate transition graph.

use crate::automaton::{Automaton, Config, NeighborhoodResolver, Rule};
use crate::graph::TransitionGraph;
use crate::linear::RuleVector;

/// Consistency oracle: which per-cell rules (if any) produce a given graph
/// on a fixed geometry.
///
/// The neighborhood of every cell in every configuration is computed once;
/// a call to `extract` is then a single pass over the candidate with two
/// bitmasks per cell (`seen` neighborhoods and those mapped to `1`).
#[derive(Clone, Debug)]
pub struct RuleExtractor {
    num_cells: usize,
    num_configs: usize,
    // neighborhoods[c * num_cells + i]: neighborhood value of cell i in c
    neighborhoods: Vec<u8>,
}

impl RuleExtractor {
    pub fn new(automaton: &Automaton) -> Self {
        Self::from_resolver(automaton.resolver())
    }

    pub fn from_resolver(resolver: &NeighborhoodResolver) -> Self {
        let num_cells = resolver.num_cells();
        let num_configs = resolver.num_configs();
        let mut neighborhoods = Vec::with_capacity(num_configs * num_cells);
        for config in 0..num_configs {
            for cell in 0..num_cells {
                neighborhoods.push(resolver.resolve(cell, config).value() as u8);
            }
        }
        Self {
            num_cells,
            num_configs,
            neighborhoods,
        }
    }

    pub fn num_configs(&self) -> usize {
        self.num_configs
    }

    /// Rules reproducing `candidate`, or `None` if some cell would need two
    /// outputs for one neighborhood. Neighborhoods the candidate never
    /// exercises get output `0`.
    pub fn extract(&self, candidate: &[Config]) -> Option<RuleVector> {
        let mut seen = vec![0 as Rule; self.num_cells];
        let mut ones = vec![0 as Rule; self.num_cells];
        self.extract_into(candidate, &mut seen, &mut ones)
            .then(|| RuleVector::new(ones))
    }

    pub fn extract_graph(&self, candidate: &TransitionGraph) -> Option<RuleVector> {
        self.extract(candidate.as_slice())
    }

    /// `extract` without allocating; `ones` holds the rules on success.
    /// Both buffers must have one slot per cell.
    pub fn extract_into(&self, candidate: &[Config], seen: &mut [Rule], ones: &mut [Rule]) -> bool {
        if candidate.len() != self.num_configs {
            return false;
        }
        seen.fill(0);
        ones.fill(0);
        let n = self.num_cells;
        for (config, &next) in candidate.iter().enumerate() {
            let row = &self.neighborhoods[config * n..(config + 1) * n];
            for (cell, &nb) in row.iter().enumerate() {
                let bit: Rule = 1 << nb;
                let out = (next >> (n - 1 - cell)) & 1 == 1;
                if seen[cell] & bit != 0 {
                    if (ones[cell] & bit != 0) != out {
                        return false;
                    }
                } else {
                    seen[cell] |= bit;
                    if out {
                        ones[cell] |= bit;
                    }
                }
            }
        }
        true
    }
}
