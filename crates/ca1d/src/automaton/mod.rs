//! Automata: validated construction, the eager transition graph, stepping.
//!
//! Purpose
//! - Own the cells, radii, boundary and rule vector of one automaton and the
//!   transition graph built from them.
//! - Expose the per-automaton analyses; the heavier searches live in
//!   `crate::search` and take automata by reference.
//!
//! Why this design
//! - Rules never change after construction, so the graph is computed once in
//!   `new` and shared read-only. Tweaked, complemented or reversed variants are
//!   always fresh automata (`with_rules`).
//! - Cell states are the only mutable part and only matter for stepping.
//!
//! Note on layout
//! - `types.rs` (value types), `neighborhood.rs` (boundary handling),
//!   `analysis.rs` (variant reports and state maps).

mod analysis;
mod neighborhood;
mod types;

pub use analysis::{
    AffectedConfigs, ComplementedVariant, RmtComplement, RuleTweak, StateNeighborhoodMap,
    RMT_PAIRS,
};
pub use neighborhood::NeighborhoodResolver;
pub use types::{max_rule, Boundary, Cell, Config, Neighborhood, Rule};

use nalgebra::DMatrix;
use rand::Rng;

use crate::cfg::{MAX_LEFT_RADIUS, MAX_RIGHT_RADIUS, MAX_SIZE};
use crate::error::CaError;
use crate::graph::{Cycle, TransitionGraph};
use crate::linear::{Polynomial, RuleVector};

/// Binary one-dimensional cellular automaton with one rule per cell.
#[derive(Clone, Debug)]
pub struct Automaton {
    resolver: NeighborhoodResolver,
    cells: Vec<Cell>,
    rules: RuleVector,
    graph: TransitionGraph,
}

impl Automaton {
    /// Validate the geometry and rules, then build the transition graph.
    pub fn new(
        num_cells: usize,
        left_radius: usize,
        right_radius: usize,
        boundary: Boundary,
        rules: Vec<Rule>,
    ) -> Result<Self, CaError> {
        if num_cells == 0 || num_cells > MAX_SIZE {
            return Err(CaError::UnsupportedSize {
                num_cells,
                max: MAX_SIZE,
            });
        }
        if left_radius > MAX_LEFT_RADIUS {
            return Err(CaError::UnsupportedLeftRadius {
                radius: left_radius,
                max: MAX_LEFT_RADIUS,
            });
        }
        if right_radius > MAX_RIGHT_RADIUS {
            return Err(CaError::UnsupportedRightRadius {
                radius: right_radius,
                max: MAX_RIGHT_RADIUS,
            });
        }
        let neighborhood = left_radius + right_radius + 1;
        if num_cells < neighborhood {
            return Err(CaError::NeighborhoodTooLarge {
                num_cells,
                neighborhood,
            });
        }
        if rules.len() != num_cells {
            return Err(CaError::RuleCountMismatch {
                expected: num_cells,
                found: rules.len(),
            });
        }
        let max = max_rule(neighborhood);
        if let Some((cell, &rule)) = rules.iter().enumerate().find(|&(_, &r)| r > max) {
            return Err(CaError::RuleOutOfRange { cell, rule, max });
        }

        let resolver = NeighborhoodResolver::new(num_cells, left_radius, right_radius, boundary);
        let cells: Vec<Cell> = rules
            .iter()
            .enumerate()
            .map(|(i, &r)| Cell::new(i, r))
            .collect();
        let graph = build_graph(&resolver, &cells);
        tracing::trace!(num_cells, %boundary, "built transition graph");
        Ok(Self {
            resolver,
            cells,
            rules: RuleVector::new(rules),
            graph,
        })
    }

    /// Radius 1/1 automaton (ECA).
    pub fn elementary(boundary: Boundary, rules: Vec<Rule>) -> Result<Self, CaError> {
        Self::new(rules.len(), 1, 1, boundary, rules)
    }

    /// Same geometry, different rules.
    pub fn with_rules(&self, rules: Vec<Rule>) -> Result<Self, CaError> {
        Self::new(
            self.num_cells(),
            self.left_radius(),
            self.right_radius(),
            self.boundary(),
            rules,
        )
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.resolver.num_cells()
    }

    #[inline]
    pub fn left_radius(&self) -> usize {
        self.resolver.left_radius()
    }

    #[inline]
    pub fn right_radius(&self) -> usize {
        self.resolver.right_radius()
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.resolver.boundary()
    }

    #[inline]
    pub fn num_neighbors(&self) -> usize {
        self.resolver.num_neighbors()
    }

    #[inline]
    pub fn num_configs(&self) -> usize {
        self.resolver.num_configs()
    }

    /// Largest valid rule number for this neighborhood size.
    pub fn max_rule(&self) -> Rule {
        max_rule(self.num_neighbors())
    }

    pub fn resolver(&self) -> &NeighborhoodResolver {
        &self.resolver
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rules(&self) -> &RuleVector {
        &self.rules
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    // --- stepping ---

    /// Cell states packed into a configuration (cell 0 is the high bit).
    pub fn current_config(&self) -> Config {
        self.cells
            .iter()
            .fold(0, |acc, c| (acc << 1) | c.state() as Config)
    }

    pub fn set_config(&mut self, config: Config) -> Result<(), CaError> {
        if config >= self.num_configs() {
            return Err(CaError::ConfigOutOfRange {
                config,
                num_configs: self.num_configs(),
            });
        }
        let resolver = self.resolver;
        for cell in &mut self.cells {
            cell.set_state(resolver.state(cell.index(), config));
        }
        Ok(())
    }

    /// Draw every cell state from `rng`; returns the new configuration.
    pub fn randomize_config<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Config {
        for cell in &mut self.cells {
            cell.set_state(rng.gen());
        }
        self.current_config()
    }

    /// Advance all cells synchronously by one generation.
    pub fn step(&mut self) -> Config {
        let current = self.current_config();
        let resolver = self.resolver;
        for cell in &mut self.cells {
            cell.update(resolver.resolve(cell.index(), current));
        }
        let next = self.current_config();
        debug_assert_eq!(next, self.graph.next(current));
        next
    }

    // --- graph analysis ---

    pub fn is_elementary(&self) -> bool {
        self.left_radius() == 1 && self.right_radius() == 1
    }

    pub fn cycles(&self) -> Vec<Cycle> {
        self.graph.cycles()
    }

    /// Every configuration lies on a cycle.
    pub fn is_reversible(&self) -> bool {
        self.cycles().iter().map(Cycle::len).sum::<usize>() == self.num_configs()
    }

    /// Same multiset of cycle lengths.
    pub fn has_cycle_structure_as(&self, other: &Automaton) -> bool {
        if self.num_configs() != other.num_configs() {
            return false;
        }
        cycle_lengths(&self.graph) == cycle_lengths(&other.graph)
    }

    /// Rules with every bit of a neighborhood that never occurs cleared.
    ///
    /// Under a null boundary the edge cells only ever see neighborhoods with
    /// `0` in the off-grid positions; the other table bits have no effect on
    /// the graph. Periodic automata return their rules unchanged.
    pub fn canonical_rules(&self) -> RuleVector {
        RuleVector::new(
            self.cells
                .iter()
                .map(|c| c.rule() & self.resolver.observable_rule_bits(c.index()))
                .collect(),
        )
    }

    // --- GF(2) ---

    pub fn characteristic_matrix(&self) -> Result<DMatrix<i64>, CaError> {
        self.require_elementary("characteristic matrix")?;
        self.rules.characteristic_matrix(self.boundary())
    }

    pub fn characteristic_polynomial(&self) -> Result<Polynomial, CaError> {
        self.require_elementary("characteristic polynomial")?;
        self.rules.characteristic_polynomial(self.boundary())
    }

    pub fn is_complementable(&self) -> Result<bool, CaError> {
        self.require_elementary("complementability")?;
        self.rules.is_complementable(self.boundary())
    }

    fn require_elementary(&self, operation: &'static str) -> Result<(), CaError> {
        if self.is_elementary() {
            Ok(())
        } else {
            Err(CaError::NotElementary { operation })
        }
    }

    fn require_reversible_eca(&self, operation: &'static str) -> Result<(), CaError> {
        self.require_elementary(operation)?;
        if self.is_reversible() {
            Ok(())
        } else {
            Err(CaError::NotReversible { operation })
        }
    }
}

fn build_graph(resolver: &NeighborhoodResolver, cells: &[Cell]) -> TransitionGraph {
    let next = (0..resolver.num_configs())
        .map(|config| {
            cells.iter().fold(0, |acc, cell| {
                let bit = cell.evaluate(resolver.resolve(cell.index(), config));
                (acc << 1) | bit as Config
            })
        })
        .collect();
    TransitionGraph::from_raw(next)
}

fn cycle_lengths(graph: &TransitionGraph) -> Vec<usize> {
    let mut lens: Vec<usize> = graph.cycles().iter().map(Cycle::len).collect();
    lens.sort_unstable();
    lens
}

#[cfg(test)]
mod tests;
