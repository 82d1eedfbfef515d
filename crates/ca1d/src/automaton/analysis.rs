//! Rule variants of one automaton compared against it, and the
//! state/next-neighborhood maps.

use std::collections::BTreeSet;

use super::{Automaton, Config, Neighborhood, Rule};
use crate::error::CaError;

/// Equivalent rule-min-term pairs of an ECA rule table.
pub const RMT_PAIRS: [[u8; 2]; 4] = [[0, 4], [1, 5], [2, 6], [3, 7]];

/// Configurations whose successor changed, and how many of this automaton's
/// cycles contain at least one of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffectedConfigs {
    pub configs: Vec<Config>,
    pub cycles_affected: usize,
}

/// One subset-complemented rule vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplementedVariant {
    /// Bit `i` set: cell `i` runs `max_rule - rule`.
    pub subset: usize,
    pub rules: Vec<Rule>,
    pub same_cycle_structure: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RmtComplement {
    pub cell: usize,
    /// The four complemented RMTs, one from each pair of `RMT_PAIRS`.
    pub rmts: [u8; 4],
    pub rules: Vec<Rule>,
    pub same_cycle_structure: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTweak {
    pub cell: usize,
    pub rmt: u8,
    pub rules: Vec<Rule>,
    pub same_cycle_structure: bool,
    pub configs_affected: usize,
    pub cycles_affected: usize,
}

/// Neighborhoods of `cell` in the next configuration, split by the state the
/// cell had in the current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateNeighborhoodMap {
    pub cell: usize,
    pub from_zero: BTreeSet<Neighborhood>,
    pub from_one: BTreeSet<Neighborhood>,
}

impl StateNeighborhoodMap {
    /// No next neighborhood is reachable from both states.
    pub fn is_one_to_one_or_one_to_many(&self) -> bool {
        self.from_zero.is_disjoint(&self.from_one)
    }
}

impl Automaton {
    pub fn affected_configs(&self, other: &Automaton) -> AffectedConfigs {
        let configs = self.graph.differing_configs(&other.graph);
        let cycles_affected = self
            .cycles()
            .iter()
            .filter(|cycle| configs.iter().any(|&c| cycle.contains(c)))
            .count();
        AffectedConfigs {
            configs,
            cycles_affected,
        }
    }

    /// All `2^num_cells` subset complements when the rule vector is
    /// complementable, otherwise nothing.
    pub fn complemented_variants(&self) -> Result<Vec<ComplementedVariant>, CaError> {
        if !self.is_complementable()? {
            return Ok(Vec::new());
        }
        let max = self.max_rule();
        let mut out = Vec::with_capacity(self.num_configs());
        for subset in 0..self.num_configs() {
            let rules: Vec<Rule> = self
                .rules
                .iter()
                .enumerate()
                .map(|(i, &r)| if (subset >> i) & 1 == 1 { max - r } else { r })
                .collect();
            let variant = self.with_rules(rules.clone())?;
            out.push(ComplementedVariant {
                subset,
                rules,
                same_cycle_structure: self.has_cycle_structure_as(&variant),
            });
        }
        Ok(out)
    }

    /// For every cell, the 16 ways of complementing one RMT from each pair.
    pub fn rmt_complements(&self) -> Result<Vec<RmtComplement>, CaError> {
        self.require_reversible_eca("RMT complemented rules")?;
        let choices = 1usize << RMT_PAIRS.len();
        let mut out = Vec::with_capacity(self.num_cells() * choices);
        for cell in 0..self.num_cells() {
            for choice in 0..choices {
                let mut rmts = [0u8; 4];
                for (j, pair) in RMT_PAIRS.iter().enumerate() {
                    rmts[j] = if (choice >> j) & 1 == 1 { pair[0] } else { pair[1] };
                }
                let flip: Rule = rmts.iter().fold(0, |acc, &t| acc | 1 << t);
                let mut rules = self.rules.to_vec();
                rules[cell] ^= flip;
                let variant = self.with_rules(rules.clone())?;
                out.push(RmtComplement {
                    cell,
                    rmts,
                    rules,
                    same_cycle_structure: self.has_cycle_structure_as(&variant),
                });
            }
        }
        Ok(out)
    }

    /// Every single-bit flip of every cell's rule, highest RMT first.
    pub fn tweaked_variants(&self) -> Result<Vec<RuleTweak>, CaError> {
        self.require_reversible_eca("Rule tweaking")?;
        let table_len = 1u8 << self.num_neighbors();
        let mut out = Vec::with_capacity(self.num_cells() * table_len as usize);
        for cell in 0..self.num_cells() {
            for rmt in (0..table_len).rev() {
                let mut rules = self.rules.to_vec();
                rules[cell] ^= 1 << rmt;
                let variant = self.with_rules(rules.clone())?;
                let affected = self.affected_configs(&variant);
                out.push(RuleTweak {
                    cell,
                    rmt,
                    rules,
                    same_cycle_structure: self.has_cycle_structure_as(&variant),
                    configs_affected: affected.configs.len(),
                    cycles_affected: affected.cycles_affected,
                });
            }
        }
        Ok(out)
    }

    pub fn sn_maps(&self) -> Vec<StateNeighborhoodMap> {
        let mut maps: Vec<StateNeighborhoodMap> = (0..self.num_cells())
            .map(|cell| StateNeighborhoodMap {
                cell,
                from_zero: BTreeSet::new(),
                from_one: BTreeSet::new(),
            })
            .collect();
        for (config, next) in self.graph.edges() {
            for map in &mut maps {
                let nb = self.resolver.resolve(map.cell, next);
                if self.resolver.state(map.cell, config) {
                    map.from_one.insert(nb);
                } else {
                    map.from_zero.insert(nb);
                }
            }
        }
        maps
    }

    pub fn has_one_to_one_or_one_to_many_maps(&self) -> bool {
        self.sn_maps()
            .iter()
            .all(StateNeighborhoodMap::is_one_to_one_or_one_to_many)
    }
}
