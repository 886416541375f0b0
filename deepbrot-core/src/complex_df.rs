use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::double_float::DoubleFloat;

/// A complex number with [`DoubleFloat`] components (~14 decimal digits per axis).
///
/// Mirrors [`Complex`] with extended precision. Holds the viewport center
/// and every absolute plane coordinate, where `f32` alone cannot tell
/// adjacent pixels apart at depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexDF {
    pub re: DoubleFloat,
    pub im: DoubleFloat,
}

impl ComplexDF {
    pub const ZERO: Self = Self {
        re: DoubleFloat::ZERO,
        im: DoubleFloat::ZERO,
    };

    #[inline]
    pub fn new(re: DoubleFloat, im: DoubleFloat) -> Self {
        Self { re, im }
    }

    /// Build from host-side `f64` coordinates, splitting each axis.
    #[inline]
    pub fn from_f64(re: f64, im: f64) -> Self {
        Self {
            re: DoubleFloat::from_f64(re),
            im: DoubleFloat::from_f64(im),
        }
    }

    /// Returns `re.hi² + im.hi²` in native precision.
    ///
    /// This is the bailout magnitude; the low components are ignored.
    #[inline]
    pub fn norm_sq_hi(self) -> f32 {
        self.re.hi * self.re.hi + self.im.hi * self.im.hi
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Component-wise absolute value, `(|re|, |im|)`.
    #[inline]
    pub fn abs_components(self) -> Self {
        Self {
            re: self.re.abs(),
            im: self.im.abs(),
        }
    }

    /// `z² + c`, written out so the doubled cross term is an add, not a multiply.
    #[inline]
    pub fn square_add(self, c: Self) -> Self {
        let xx = self.re * self.re;
        let yy = self.im * self.im;
        let xy = self.re * self.im;
        Self {
            re: (xx - yy) + c.re,
            im: (xy + xy) + c.im,
        }
    }

    /// Widen both axes to `f64` pairs for display and verification.
    #[inline]
    pub fn to_f64(self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }
}

impl From<Complex> for ComplexDF {
    #[inline]
    fn from(c: Complex) -> Self {
        Self {
            re: DoubleFloat::from(c.re),
            im: DoubleFloat::from(c.im),
        }
    }
}

// -- Arithmetic operators --

impl Add for ComplexDF {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for ComplexDF {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for ComplexDF {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Neg for ComplexDF {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl std::fmt::Display for ComplexDF {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {}·i", self.re, self.im)
    }
}
