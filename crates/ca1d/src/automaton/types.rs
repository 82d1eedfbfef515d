//! Value types shared by the automaton, graph and search modules.

use std::fmt;
use std::str::FromStr;

use crate::error::CaError;

/// A configuration: bit `num_cells - 1 - i` holds the state of cell `i`
/// (cell 0 is the leftmost, most significant bit).
pub type Config = usize;

/// A rule number: bit `v` is the next state for neighborhood value `v`.
pub type Rule = u64;

/// Largest rule number for a neighborhood of `num_neighbors` cells.
#[inline]
pub fn max_rule(num_neighbors: usize) -> Rule {
    let table_len = 1u32 << num_neighbors;
    if table_len >= Rule::BITS {
        Rule::MAX
    } else {
        (1 << table_len) - 1
    }
}

/// Boundary condition for neighbors beyond the first or last cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Out-of-range neighbors read as `0`.
    Null,
    /// Indices wrap modulo `num_cells`.
    Periodic,
}

impl Boundary {
    pub fn symbol(self) -> char {
        match self {
            Boundary::Null => 'n',
            Boundary::Periodic => 'p',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Boundary::Null => "Null",
            Boundary::Periodic => "Periodic",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Boundary {
    type Err = CaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "null" => Ok(Boundary::Null),
            "p" | "periodic" => Ok(Boundary::Periodic),
            _ => Err(CaError::InvalidBoundary(s.to_string())),
        }
    }
}

/// Neighborhood bit-string, read left to right (leftmost neighbor is the most
/// significant bit of `value`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Neighborhood {
    bits: u32,
    len: u8,
}

impl Neighborhood {
    #[inline]
    pub fn new(bits: u32, len: usize) -> Self {
        debug_assert!(len < 32 && bits < (1 << len));
        Self {
            bits,
            len: len as u8,
        }
    }

    /// Integer value of the bit-string; indexes the rule table.
    #[inline]
    pub fn value(self) -> usize {
        self.bits as usize
    }

    #[inline]
    pub fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Bit at `pos`, counted from the left.
    #[inline]
    pub fn bit(self, pos: usize) -> bool {
        (self.bits >> (self.len() - 1 - pos)) & 1 == 1
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.len())
    }
}

/// One cell: a lookup-table rule and its current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    index: usize,
    rule: Rule,
    state: bool,
}

impl Cell {
    pub fn new(index: usize, rule: Rule) -> Self {
        Self {
            index,
            rule,
            state: false,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn rule(&self) -> Rule {
        self.rule
    }

    #[inline]
    pub fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    #[inline]
    pub fn state(&self) -> bool {
        self.state
    }

    #[inline]
    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    /// Next state for `neighborhood`: bit `neighborhood.value()` of the rule
    /// (neighborhood `0` maps to the lowest-order bit, Wolfram's convention).
    #[inline]
    pub fn evaluate(&self, neighborhood: Neighborhood) -> bool {
        (self.rule >> neighborhood.value()) & 1 == 1
    }

    #[inline]
    pub fn update(&mut self, neighborhood: Neighborhood) {
        self.state = self.evaluate(neighborhood);
    }
}
