use std::fmt;

use nalgebra::DMatrix;

use super::{additive_dependencies, characteristic_polynomial, Polynomial};
use crate::automaton::{Boundary, Rule};
use crate::error::CaError;

/// Per-cell rule numbers, cell 0 first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RuleVector(Vec<Rule>);

impl RuleVector {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self(rules)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Rule] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<Rule> {
        self.0.clone()
    }

    pub fn into_inner(self) -> Vec<Rule> {
        self.0
    }

    /// Every rule has an XOR dependency set (ECA rule numbers only).
    pub fn is_additive(&self) -> bool {
        self.0.iter().all(|&r| additive_dependencies(r).is_some())
    }

    /// 0/1 matrix with row `i` marking the cells rule `i` XORs together.
    ///
    /// Under a null boundary the wrap-around entries of the first and last
    /// rows are left out.
    pub fn characteristic_matrix(&self, boundary: Boundary) -> Result<DMatrix<i64>, CaError> {
        let n = self.0.len();
        let mut m = DMatrix::<i64>::zeros(n, n);
        for (i, &rule) in self.0.iter().enumerate() {
            let deps = additive_dependencies(rule).ok_or(CaError::NotAdditive { rule })?;
            for &d in deps {
                let wraps = (i == 0 && d < 0) || (i + 1 == n && d > 0);
                if wraps && boundary == Boundary::Null {
                    continue;
                }
                let col = (i as isize + d).rem_euclid(n as isize) as usize;
                m[(i, col)] = 1;
            }
        }
        Ok(m)
    }

    /// Characteristic polynomial over GF(2).
    pub fn characteristic_polynomial(&self, boundary: Boundary) -> Result<Polynomial, CaError> {
        let m = self.characteristic_matrix(boundary)?;
        Ok(characteristic_polynomial(&m).reduce_mod2())
    }

    /// `(x + 1)` does not divide the characteristic polynomial.
    pub fn is_complementable(&self, boundary: Boundary) -> Result<bool, CaError> {
        Ok(self.characteristic_polynomial(boundary)?.value_at_one_mod2())
    }
}

impl From<Vec<Rule>> for RuleVector {
    fn from(rules: Vec<Rule>) -> Self {
        Self(rules)
    }
}

impl<'a> IntoIterator for &'a RuleVector {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RuleVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for rule in &self.0 {
            write!(f, "{rule} ")?;
        }
        f.write_str("]")
    }
}
