//! Three-valued sign used by exact-sign oracles and polynomial evaluation.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, Neg};

/// Sign of a value: negative, zero or positive.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Sign of a floating-point value. `NaN` maps to [`Sign::Zero`].
    pub fn of<T: num_traits::Float>(value: T) -> Self {
        if value > T::zero() {
            Sign::Positive
        } else if value < T::zero() {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }
}

impl From<Ordering> for Sign {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        match (self, rhs) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sign::Negative => "NEGATIVE",
            Sign::Zero => "ZERO",
            Sign::Positive => "POSITIVE",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_of_floats() {
        assert_eq!(Sign::of(-2.0_f64), Sign::Negative);
        assert_eq!(Sign::of(0.0_f64), Sign::Zero);
        assert_eq!(Sign::of(3.5_f32), Sign::Positive);
        assert_eq!(Sign::of(f64::NAN), Sign::Zero);
    }

    #[test]
    fn negation_and_product() {
        assert_eq!(-Sign::Negative, Sign::Positive);
        assert_eq!(-Sign::Zero, Sign::Zero);
        assert_eq!(Sign::Negative * Sign::Negative, Sign::Positive);
        assert_eq!(Sign::Negative * Sign::Positive, Sign::Negative);
        assert_eq!(Sign::Zero * Sign::Positive, Sign::Zero);
    }

    #[test]
    fn from_ordering() {
        assert_eq!(Sign::from(1.cmp(&2)), Sign::Negative);
        assert_eq!(Sign::from(2.cmp(&2)), Sign::Zero);
    }
}
