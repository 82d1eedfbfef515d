//! Neighborhood extraction under the boundary policy.

use super::types::{Boundary, Config, Neighborhood, Rule};

/// Geometry of an automaton: size, radii and boundary.
///
/// For offset `d` in `[-left, right]` the neighbor of cell `i` is `i + d`;
/// periodic boundaries wrap it modulo `num_cells`, null boundaries read a
/// fixed `0` outside `[0, num_cells)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborhoodResolver {
    num_cells: usize,
    left: usize,
    right: usize,
    boundary: Boundary,
}

impl NeighborhoodResolver {
    /// Callers validate the geometry (see `Automaton::new`).
    pub(crate) fn new(num_cells: usize, left: usize, right: usize, boundary: Boundary) -> Self {
        Self {
            num_cells,
            left,
            right,
            boundary,
        }
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    #[inline]
    pub fn left_radius(&self) -> usize {
        self.left
    }

    #[inline]
    pub fn right_radius(&self) -> usize {
        self.right
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    #[inline]
    pub fn num_neighbors(&self) -> usize {
        self.left + self.right + 1
    }

    #[inline]
    pub fn num_configs(&self) -> usize {
        1 << self.num_cells
    }

    /// State of `cell` in `config`.
    #[inline]
    pub fn state(&self, cell: usize, config: Config) -> bool {
        (config >> (self.num_cells - 1 - cell)) & 1 == 1
    }

    /// Neighborhood of `cell` in `config`, `left + right + 1` bits, left to right.
    pub fn resolve(&self, cell: usize, config: Config) -> Neighborhood {
        let n = self.num_cells as isize;
        let mut bits = 0u32;
        for d in -(self.left as isize)..=(self.right as isize) {
            let idx = cell as isize + d;
            let bit = if (0..n).contains(&idx) {
                self.state(idx as usize, config)
            } else {
                match self.boundary {
                    Boundary::Null => false,
                    Boundary::Periodic => self.state(idx.rem_euclid(n) as usize, config),
                }
            };
            bits = (bits << 1) | bit as u32;
        }
        Neighborhood::new(bits, self.num_neighbors())
    }

    /// Neighborhood bits of `cell` pinned to `0` by a null boundary.
    pub fn fixed_zero_bits(&self, cell: usize) -> u32 {
        if self.boundary == Boundary::Periodic {
            return 0;
        }
        let len = self.num_neighbors();
        let mut mask = 0u32;
        for (pos, d) in (-(self.left as isize)..=(self.right as isize)).enumerate() {
            let idx = cell as isize + d;
            if idx < 0 || idx >= self.num_cells as isize {
                mask |= 1 << (len - 1 - pos);
            }
        }
        mask
    }

    /// Rule-table bits of `cell` whose neighborhood can occur in some configuration.
    pub fn observable_rule_bits(&self, cell: usize) -> Rule {
        let fixed = self.fixed_zero_bits(cell);
        (0..1u32 << self.num_neighbors())
            .filter(|v| v & fixed == 0)
            .fold(0, |acc, v| acc | (1 << v))
    }
}
