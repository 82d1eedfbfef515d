use std::fmt;

/// Integer polynomial, coefficients low degree first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polynomial {
    coeffs: Vec<i64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<i64>) -> Self {
        Self { coeffs }
    }

    pub fn coefficients(&self) -> &[i64] {
        &self.coeffs
    }

    /// Coefficient of `x^k` (zero past the stored length).
    pub fn coefficient(&self, k: usize) -> i64 {
        self.coeffs.get(k).copied().unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Highest power with a nonzero coefficient; `0` for the zero polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs.iter().rposition(|&c| c != 0).unwrap_or(0)
    }

    /// Every coefficient replaced by its parity.
    pub fn reduce_mod2(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| c.rem_euclid(2)).collect(),
        }
    }

    /// `P(1)` over GF(2): parity of the coefficient sum.
    pub fn value_at_one_mod2(&self) -> bool {
        self.coeffs.iter().fold(0i64, |acc, c| acc + c.rem_euclid(2)) % 2 == 1
    }
}

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

fn superscript(power: usize) -> String {
    power
        .to_string()
        .bytes()
        .map(|b| SUPERSCRIPTS[(b - b'0') as usize])
        .collect()
}

impl fmt::Display for Polynomial {
    /// `x³ - 2x² + 1`; the exponent is omitted on `x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("Zero polynomial");
        }
        let degree = self.degree();
        for n in (0..=degree).rev() {
            let c = self.coeffs[n];
            if c == 0 {
                continue;
            }
            if n != degree {
                f.write_str(if c > 0 { " + " } else { " - " })?;
            } else if c < 0 {
                f.write_str("-")?;
            }
            if c.abs() != 1 || n == 0 {
                write!(f, "{}", c.abs())?;
            }
            match n {
                0 => {}
                1 => f.write_str("x")?,
                _ => write!(f, "x{}", superscript(n))?,
            }
        }
        Ok(())
    }
}
