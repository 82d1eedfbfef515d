//! Souriau (Faddeev-LeVerrier) recurrence over the integers.
//!
//! For `A` of size `n`, with `P[n] = 1`:
//! - `C_1 = A`, `P[n-1] = -tr(C_1)`;
//! - `C_i = A (C_{i-1} + P[n-i+1] I)`, `P[n-i] = -tr(C_i) / i`.
//!
//! The divisions by `i` are exact over the integers and only there; parity
//! is taken afterwards (`Polynomial::reduce_mod2`), never inside the loop.

use nalgebra::DMatrix;

use super::Polynomial;

/// Integer characteristic polynomial `det(xI - A)` of a square matrix.
pub fn characteristic_polynomial(a: &DMatrix<i64>) -> Polynomial {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols());
    let mut p = vec![0i64; n + 1];
    p[n] = 1;
    if n == 0 {
        return Polynomial::new(p);
    }
    let mut c = a.clone();
    p[n - 1] = -c.trace();
    for i in 2..=n {
        let mut shifted = c;
        let s = p[n - i + 1];
        for k in 0..n {
            shifted[(k, k)] += s;
        }
        c = a * shifted;
        p[n - i] = -c.trace() / i as i64;
    }
    Polynomial::new(p)
}
