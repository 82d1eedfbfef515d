//! Rule vectors and GF(2) linear algebra for additive ECAs.
//!
//! Purpose
//! - An additive ECA rule is an XOR of a fixed subset of `{left, self, right}`
//!   (possibly complemented), so a vector of them is a linear (or affine) map
//!   over GF(2) with a 0/1 characteristic matrix.
//! - Complementability: the rule vector has complemented isomorphisms iff
//!   `(x + 1)` does not divide the characteristic polynomial, i.e. `P(1) = 1`
//!   over GF(2).
//!
//! Why this design
//! - The polynomial is computed with exact integer arithmetic and reduced to
//!   parities at the end. Reducing the intermediate matrices changes the
//!   result because the recurrence divides by `i`.
//!
//! References
//! - Maximal Length Cellular Automata,
//!   https://www.researchgate.net/publication/358303083_Maximal_Length_Cellular_Automata

mod matrix;
mod polynomial;
mod rule_vector;

pub use matrix::characteristic_polynomial;
pub use polynomial::Polynomial;
pub use rule_vector::RuleVector;

use rayon::prelude::*;

use crate::automaton::{Boundary, Rule};
use crate::cfg::MAX_SIZE;
use crate::error::CaError;

/// Linear (non-complemented) additive ECA rules.
pub const LINEAR_RULES: [Rule; 7] = [60, 90, 102, 150, 170, 204, 240];

/// Cells an additive ECA rule XORs together: `-1` left, `0` self, `1` right.
pub fn additive_dependencies(rule: Rule) -> Option<&'static [isize]> {
    let deps: &'static [isize] = match rule {
        60 | 195 => &[-1, 0],
        90 | 165 => &[-1, 1],
        102 | 153 => &[0, 1],
        150 | 105 => &[-1, 0, 1],
        170 | 85 => &[1],
        204 | 51 => &[0],
        240 | 15 => &[-1],
        _ => return None,
    };
    Some(deps)
}

/// Every vector over `LINEAR_RULES` of length `size` whose GF(2)
/// characteristic polynomial is complementable, with that polynomial.
///
/// Vectors are visited as base-7 numbers, first cell most significant; the
/// result keeps that order.
pub fn complementable_rule_vectors(
    size: usize,
    boundary: Boundary,
) -> Result<Vec<(RuleVector, Polynomial)>, CaError> {
    if size == 0 || size > MAX_SIZE {
        return Err(CaError::UnsupportedSize {
            num_cells: size,
            max: MAX_SIZE,
        });
    }
    let radix = LINEAR_RULES.len();
    let total = radix.pow(size as u32);
    tracing::debug!(size, %boundary, total, "scanning linear rule vectors");

    let found: Vec<(RuleVector, Polynomial)> = (0..total)
        .into_par_iter()
        .filter_map(|index| {
            let mut rules = vec![0; size];
            let mut rest = index;
            for slot in rules.iter_mut().rev() {
                *slot = LINEAR_RULES[rest % radix];
                rest /= radix;
            }
            let rv = RuleVector::new(rules);
            let poly = rv.characteristic_polynomial(boundary).ok()?;
            poly.value_at_one_mod2().then_some((rv, poly))
        })
        .collect();
    tracing::debug!(found = found.len(), "complementable rule vectors");
    Ok(found)
}

#[cfg(test)]
mod tests;
