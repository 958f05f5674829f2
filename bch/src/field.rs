//! Binary extension field GF(2^13), p(x) = x^13 + x^4 + x^3 + x + 1 (0x201b).
//!
//! Elements are stored in polynomial basis as the low 13 bits of a `u16`.
//! Multiplication and division go through exp/log tables which are generated
//! at compile time from the primitive polynomial.

use core::fmt::{self, Debug, Display, Formatter};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Extension degree `m`.
pub const FIELD_DEGREE: u32 = 13;

/// Primitive polynomial defining the field, including the x^13 term.
pub const PRIMITIVE_POLYNOMIAL: u32 = 0x201b;

/// Order of the multiplicative group, `2^m - 1`.
///
/// This is also the length of the full (unshortened) BCH code.
pub const GROUP_ORDER: usize = (1 << FIELD_DEGREE) - 1;

const FIELD_MASK: u16 = GROUP_ORDER as u16;

struct Tables {
    // exp is doubled so that log(a) + log(b) never needs a reduction
    exp: [u16; 2 * GROUP_ORDER],
    log: [u16; GROUP_ORDER + 1],
}

const fn build_tables() -> Tables {
    let mut exp = [0u16; 2 * GROUP_ORDER];
    let mut log = [0u16; GROUP_ORDER + 1];
    let mut x: u32 = 1;
    let mut i = 0;
    while i < GROUP_ORDER {
        exp[i] = x as u16;
        exp[i + GROUP_ORDER] = x as u16;
        log[x as usize] = i as u16;
        x <<= 1;
        if x & (1 << FIELD_DEGREE) != 0 {
            x ^= PRIMITIVE_POLYNOMIAL;
        }
        i += 1;
    }
    Tables { exp, log }
}

static TABLES: Tables = build_tables();

/// Element of GF(2^13).
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Gf8192(u16);

impl Gf8192 {
    pub const ZERO: Self = Gf8192(0);
    pub const ONE: Self = Gf8192(1);

    /// Builds an element from its polynomial-basis bits; bits above x^12 are dropped.
    #[inline]
    pub const fn new(bits: u16) -> Self {
        Gf8192(bits & FIELD_MASK)
    }

    /// Returns `alpha^exponent` for the primitive element `alpha = x`.
    #[inline]
    pub fn alpha_pow(exponent: usize) -> Self {
        Gf8192(TABLES.exp[exponent % GROUP_ORDER])
    }

    /// Discrete logarithm to base `alpha`, `None` for zero.
    #[inline]
    pub fn log(self) -> Option<usize> {
        if self.is_zero() {
            None
        } else {
            Some(TABLES.log[self.0 as usize] as usize)
        }
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn try_inverse(self) -> Option<Self> {
        self.log()
            .map(|l| Gf8192(TABLES.exp[(GROUP_ORDER - l) % GROUP_ORDER]))
    }

    /// Multiplicative inverse.
    ///
    /// # Panics
    ///
    /// Panics on zero, like integer division by zero.
    pub fn inverse(self) -> Self {
        self.try_inverse()
            .expect("attempted to invert zero in GF(2^13)")
    }

    pub fn pow(self, exponent: usize) -> Self {
        match self.log() {
            None if exponent == 0 => Self::ONE,
            None => Self::ZERO,
            Some(l) => Self::alpha_pow((l * (exponent % GROUP_ORDER)) % GROUP_ORDER),
        }
    }

    #[inline]
    pub fn square(self) -> Self {
        self * self
    }
}

impl Add for Gf8192 {
    type Output = Self;

    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self {
        Gf8192(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf8192 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

// characteristic 2: subtraction is addition
impl Sub for Gf8192 {
    type Output = Self;

    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl SubAssign for Gf8192 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Gf8192 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Mul for Gf8192 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        let l = TABLES.log[self.0 as usize] as usize + TABLES.log[rhs.0 as usize] as usize;
        Gf8192(TABLES.exp[l])
    }
}

impl MulAssign for Gf8192 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Gf8192 {
    type Output = Self;

    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl DivAssign for Gf8192 {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Sum for Gf8192 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Gf8192 {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl Display for Gf8192 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl Debug for Gf8192 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Gf8192({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_one() {
        assert_eq!(Gf8192::ZERO + Gf8192::ZERO, Gf8192::ZERO);
        assert_eq!(Gf8192::ONE * Gf8192::ONE, Gf8192::ONE);
        assert_eq!(Gf8192::ZERO * Gf8192::ONE, Gf8192::ZERO);
        assert_eq!(Gf8192::ONE + Gf8192::ONE, Gf8192::ZERO);
    }

    #[test]
    fn test_alpha_generates_group() {
        assert_eq!(Gf8192::alpha_pow(0), Gf8192::ONE);
        assert_eq!(Gf8192::alpha_pow(1), Gf8192::new(2));
        assert_eq!(Gf8192::alpha_pow(GROUP_ORDER), Gf8192::ONE);
        // x^13 reduces to x^4 + x^3 + x + 1
        assert_eq!(Gf8192::alpha_pow(13), Gf8192::new(0x1b));

        let mut seen = vec![false; GROUP_ORDER + 1];
        for i in 0..GROUP_ORDER {
            let bits = Gf8192::alpha_pow(i).to_bits() as usize;
            assert!(!seen[bits], "alpha^{i} repeats an earlier power");
            seen[bits] = true;
        }
        assert!(!seen[0]);
    }

    #[test]
    fn test_log_inverts_alpha_pow() {
        for i in [0, 1, 2, 12, 13, 1000, GROUP_ORDER - 1] {
            assert_eq!(Gf8192::alpha_pow(i).log(), Some(i));
        }
        assert_eq!(Gf8192::ZERO.log(), None);
    }

    #[test]
    fn test_multiplication_distributes() {
        let a = Gf8192::new(0x1234);
        let b = Gf8192::new(0x0abc);
        let c = Gf8192::new(0x1fff);
        assert_eq!(a * (b + c), a * b + a * c);
        assert_eq!(a * b, b * a);
    }

    #[test]
    fn test_inverse() {
        let a = Gf8192::new(5);
        assert_eq!(a * a.inverse(), Gf8192::ONE);
        assert_eq!((a / a), Gf8192::ONE);
        assert_eq!(Gf8192::ZERO.try_inverse(), None);
    }

    #[test]
    fn test_pow() {
        let a = Gf8192::new(0x0777);
        assert_eq!(a.pow(0), Gf8192::ONE);
        assert_eq!(a.pow(3), a * a * a);
        assert_eq!(a.pow(GROUP_ORDER), Gf8192::ONE);
        assert_eq!(Gf8192::ZERO.pow(0), Gf8192::ONE);
        assert_eq!(Gf8192::ZERO.pow(5), Gf8192::ZERO);
    }
}
