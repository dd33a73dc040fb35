//! Univariate polynomials over floating-point coefficients.
//!
//! Kinetic certificate functions are polynomials in time. This module provides
//! the small amount of polynomial arithmetic that kernels need to answer sign
//! and root-count questions: evaluation, derivative, remainder and monic Sturm
//! sequences. Root isolation itself is the business of the kernel's root stack.
//!
//! Coefficients are stored lowest degree first and trailing zeros are always
//! trimmed, so the zero polynomial has no coefficients and no degree.

pub mod sign;
pub mod sturm;

pub use sign::Sign;
pub use sturm::MonicSturmSequence;

use num_traits::Float;
use std::fmt;
use std::ops::Neg;

/// Dense univariate polynomial.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial<T> {
    coeffs: Vec<T>,
}

impl<T: Float> Polynomial<T> {
    /// Build a polynomial from coefficients, lowest degree first.
    pub fn new(coeffs: impl Into<Vec<T>>) -> Self {
        let mut coeffs = coeffs.into();
        trim_trailing_zeros(&mut coeffs);
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Monic polynomial `(t - r0)(t - r1)...` with the given roots.
    pub fn from_roots(roots: &[T]) -> Self {
        let mut coeffs = vec![T::one()];
        for &r in roots {
            let mut next = vec![T::zero(); coeffs.len() + 1];
            for (i, &c) in coeffs.iter().enumerate() {
                next[i + 1] = next[i + 1] + c;
                next[i] = next[i] - c * r;
            }
            coeffs = next;
        }
        Self::new(coeffs)
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Coefficient of `t^i` (zero past the degree).
    pub fn coefficient(&self, i: usize) -> T {
        self.coeffs.get(i).copied().unwrap_or_else(T::zero)
    }

    pub fn coefficients(&self) -> &[T] {
        &self.coeffs
    }

    /// Leading coefficient; zero for the zero polynomial.
    pub fn leading_coefficient(&self) -> T {
        self.coeffs.last().copied().unwrap_or_else(T::zero)
    }

    /// Evaluate with Horner's scheme.
    pub fn eval(&self, t: T) -> T {
        self.coeffs
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * t + c)
    }

    pub fn sign_at(&self, t: T) -> Sign {
        Sign::of(self.eval(t))
    }

    /// Sign of the polynomial as `t -> +inf` (`positive`) or `t -> -inf`.
    pub fn sign_at_infinity(&self, positive: bool) -> Sign {
        let lead = Sign::of(self.leading_coefficient());
        match self.degree() {
            Some(d) if !positive && d % 2 == 1 => -lead,
            _ => lead,
        }
    }

    pub fn derivative(&self) -> Self {
        let coeffs: Vec<T> = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| c * num_traits::cast::<usize, T>(i).unwrap_or_else(T::nan))
            .collect();
        Self::new(coeffs)
    }

    /// Remainder of the division by `divisor`, or `None` when dividing by zero.
    pub fn rem(&self, divisor: &Self) -> Option<Self> {
        let dd = divisor.degree()?;
        let lead = divisor.leading_coefficient();
        let mut r = self.coeffs.clone();
        while r.len() > dd {
            let top = r.len() - 1;
            let factor = r[top] / lead;
            let shift = top - dd;
            for (i, &c) in divisor.coeffs.iter().enumerate() {
                r[shift + i] = r[shift + i] - factor * c;
            }
            // the leading term cancels exactly in real arithmetic
            r.pop();
            trim_trailing_zeros(&mut r);
        }
        Some(Self::new(r))
    }

    /// Divide by the absolute value of the leading coefficient.
    pub fn abs_normalized(&self) -> Self {
        let lead = self.leading_coefficient().abs();
        if lead == T::zero() {
            return self.clone();
        }
        Self::new(self.coeffs.iter().map(|&c| c / lead).collect::<Vec<_>>())
    }

    /// Zero every coefficient whose magnitude is at most `threshold`.
    pub fn chop(&self, threshold: T) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .map(|&c| if c.abs() <= threshold { T::zero() } else { c })
                .collect::<Vec<_>>(),
        )
    }

    /// Largest coefficient magnitude.
    pub fn max_abs_coefficient(&self) -> T {
        self.coeffs
            .iter()
            .fold(T::zero(), |acc, &c| acc.max(c.abs()))
    }
}

fn trim_trailing_zeros<T: Float>(coeffs: &mut Vec<T>) {
    while coeffs.last().is_some_and(|c| *c == T::zero()) {
        coeffs.pop();
    }
}

impl<T: Float> Neg for Polynomial<T> {
    type Output = Polynomial<T>;

    fn neg(self) -> Self::Output {
        Polynomial {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}

impl<T: Float + fmt::Display> fmt::Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate().rev() {
            if c == T::zero() {
                continue;
            }
            let negative = c < T::zero();
            match (first, negative) {
                (true, true) => f.write_str("-")?,
                (true, false) => {}
                (false, true) => f.write_str(" - ")?,
                (false, false) => f.write_str(" + ")?,
            }
            first = false;
            let a = c.abs();
            match i {
                0 => write!(f, "{a}")?,
                1 => write!(f, "{a}*t")?,
                _ => write!(f, "{a}*t^{i}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn trailing_zeros_are_trimmed() {
        let p = Polynomial::new(vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(p.degree(), Some(1));
        assert!(Polynomial::<f64>::new(vec![0.0, 0.0]).is_zero());
        assert_eq!(Polynomial::<f64>::zero().degree(), None);
    }

    #[test]
    fn from_roots_and_eval() {
        let p = Polynomial::from_roots(&[1.0, 2.0, 3.0]);
        assert_eq!(p.coefficients(), &[-6.0, 11.0, -6.0, 1.0]);
        assert!(approx(p.eval(1.0), 0.0));
        assert!(approx(p.eval(4.0), 6.0));
        assert_eq!(p.sign_at(0.0), Sign::Negative);
        assert_eq!(p.sign_at(2.5), Sign::Negative);
        assert_eq!(p.sign_at(1.5), Sign::Positive);
    }

    #[test]
    fn derivative_of_cubic() {
        let p = Polynomial::new(vec![1.0, -2.0, 0.0, 4.0]);
        assert_eq!(p.derivative().coefficients(), &[-2.0, 0.0, 12.0]);
        assert!(Polynomial::new(vec![5.0]).derivative().is_zero());
    }

    #[test]
    fn remainder_by_linear_factor_is_value() {
        let p = Polynomial::new(vec![-6.0, 11.0, -6.0, 1.0]);
        let d = Polynomial::new(vec![-4.0, 1.0]);
        let r = p.rem(&d).unwrap();
        assert_eq!(r.degree(), Some(0));
        assert!(approx(r.coefficient(0), p.eval(4.0)));
        assert!(p.rem(&Polynomial::zero()).is_none());
    }

    #[test]
    fn exact_division_leaves_zero() {
        let p = Polynomial::from_roots(&[1.0, 2.0]);
        let d = Polynomial::from_roots(&[2.0]);
        assert!(p.rem(&d).unwrap().is_zero());
    }

    #[test]
    fn sign_at_infinity_uses_degree_parity() {
        let cubic = Polynomial::from_roots(&[0.0, 1.0, 2.0]);
        assert_eq!(cubic.sign_at_infinity(true), Sign::Positive);
        assert_eq!(cubic.sign_at_infinity(false), Sign::Negative);
        let quad = -Polynomial::from_roots(&[0.0, 1.0]);
        assert_eq!(quad.sign_at_infinity(false), Sign::Negative);
    }

    #[test]
    fn display_is_readable() {
        let p = Polynomial::new(vec![2.0, -3.0, 1.0]);
        assert_eq!(p.to_string(), "1*t^2 - 3*t + 2");
        assert_eq!(Polynomial::<f64>::zero().to_string(), "0");
        assert_eq!((-p).to_string(), "-1*t^2 + 3*t - 2");
    }
}
