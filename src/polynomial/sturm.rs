//! Monic Sturm sequences.
//!
//! Every member of the sequence is divided by the absolute value of its
//! leading coefficient, which keeps the signs of the classic Sturm sequence
//! while keeping coefficient magnitudes under control.
//!
//! Coefficients are floating point, so each remainder is cleaned of
//! coefficients that are negligible relative to the dividend before the
//! zero test. The root counts are therefore exact only for well separated
//! roots; kernels that need exact answers should use exact coefficients.

use super::{Polynomial, Sign};
use num_traits::Float;

/// Sturm sequence built from a pair `(p, q)`, usually `(p, p')`.
#[derive(Clone, Debug)]
pub struct MonicSturmSequence<T> {
    seq: Vec<Polynomial<T>>,
}

impl<T: Float> MonicSturmSequence<T> {
    /// Build the sequence `p, q, -rem(p, q), ...` in monic form.
    ///
    /// A zero `p` is skipped, leaving `q, -q` when `q` is non-zero; a zero
    /// `q` stops after `p`.
    pub fn new(p: &Polynomial<T>, q: &Polynomial<T>) -> Self {
        let mut seq = Vec::new();
        if !p.is_zero() {
            seq.push(p.abs_normalized());
        }
        if q.is_zero() {
            return Self { seq };
        }
        seq.push(q.abs_normalized());
        if p.degree() < q.degree() {
            let r = -seq[0].clone();
            seq.push(r);
        }

        let tolerance = T::epsilon().sqrt();
        loop {
            let n = seq.len();
            let dividend = &seq[n - 2];
            let divisor = &seq[n - 1];
            let Some(rem) = dividend.rem(divisor) else {
                break;
            };
            let threshold = tolerance * dividend.max_abs_coefficient().max(T::one());
            let r = -rem.chop(threshold);
            if r.is_zero() {
                break;
            }
            seq.push(r.abs_normalized());
        }
        Self { seq }
    }

    /// Standard sequence `(p, p')`, counting distinct real roots of `p`.
    pub fn standard(p: &Polynomial<T>) -> Self {
        Self::new(p, &p.derivative())
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn polynomials(&self) -> &[Polynomial<T>] {
        &self.seq
    }

    /// Number of sign changes of the sequence evaluated at `t` (zeros skipped).
    pub fn sign_variations(&self, t: T) -> usize {
        count_variations(self.seq.iter().map(|p| p.sign_at(t)))
    }

    /// Sign changes as `t -> +inf` (`positive`) or `t -> -inf`.
    pub fn sign_variations_at_infinity(&self, positive: bool) -> usize {
        count_variations(self.seq.iter().map(|p| p.sign_at_infinity(positive)))
    }

    /// Number of distinct roots in the half-open interval `(a, b]`.
    pub fn number_of_roots(&self, a: T, b: T) -> usize {
        self.sign_variations(a)
            .saturating_sub(self.sign_variations(b))
    }

    /// Number of distinct real roots.
    pub fn number_of_real_roots(&self) -> usize {
        self.sign_variations_at_infinity(false)
            .saturating_sub(self.sign_variations_at_infinity(true))
    }
}

fn count_variations(signs: impl Iterator<Item = Sign>) -> usize {
    let mut last = Sign::Zero;
    let mut count = 0;
    for s in signs.filter(|s| !s.is_zero()) {
        if !last.is_zero() && s != last {
            count += 1;
        }
        last = s;
    }
    count
}
