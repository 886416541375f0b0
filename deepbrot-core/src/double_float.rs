use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A double-float number: two `f32` components, roughly 48 bits of mantissa.
///
/// Stores a value as `hi + lo` with the invariant `|lo| ≤ ulp(hi)/2` after
/// every normalizing operation. All arithmetic is composed from `f32`
/// operations only (Knuth TwoSum, Dekker/Veltkamp split and TwoProd), so the
/// same code maps one-to-one onto GPU kernels that lack native doubles.
///
/// Reference: Dekker, "A floating-point technique for extending the
/// available precision" (1971); Hida, Li, Bailey (2001).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DoubleFloat {
    pub hi: f32,
    pub lo: f32,
}

// ---------------------------------------------------------------------------
// Error-free building blocks
// ---------------------------------------------------------------------------

/// Veltkamp splitter for a 24-bit mantissa: `2^12 + 1`.
const SPLITTER: f32 = 4097.0;

/// Knuth's TwoSum: error-free addition of two `f32` values.
/// Returns `(s, e)` where `s + e = a + b` exactly.
#[inline]
pub fn two_sum(a: f32, b: f32) -> (f32, f32) {
    let s = a + b;
    let v = s - a;
    let e = (a - (s - v)) + (b - v);
    (s, e)
}

/// Fast path for TwoSum when `|a| >= |b|`.
#[inline]
pub fn quick_two_sum(a: f32, b: f32) -> (f32, f32) {
    let s = a + b;
    let e = b - (s - a);
    (s, e)
}

/// Split `a` into two non-overlapping halves of 12 mantissa bits each,
/// with `hi + lo == a` exactly.
#[inline]
pub fn split(a: f32) -> (f32, f32) {
    let t = a * SPLITTER;
    let hi = t - (t - a);
    let lo = a - hi;
    (hi, lo)
}

/// Dekker's TwoProd without FMA.
/// Returns `(p, e)` where `p + e = a * b` exactly (barring over/underflow).
#[inline]
pub fn two_prod(a: f32, b: f32) -> (f32, f32) {
    let p = a * b;
    let (a_hi, a_lo) = split(a);
    let (b_hi, b_lo) = split(b);
    let e = ((a_hi * b_hi - p) + a_hi * b_lo + a_lo * b_hi) + a_lo * b_lo;
    (p, e)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl DoubleFloat {
    pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };

    #[inline]
    pub fn new(hi: f32, lo: f32) -> Self {
        Self { hi, lo }
    }

    /// Split a host-side `f64` into `hi + lo`.
    ///
    /// This is the only place an `f64` enters; the kernel never sees one.
    #[inline]
    pub fn from_f64(val: f64) -> Self {
        let hi = val as f32;
        let lo = (val - hi as f64) as f32;
        Self { hi, lo }
    }

    /// The combined value widened to `f64`, for display and verification.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.hi as f64 + self.lo as f64
    }

    #[inline]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0)
    }
}

impl From<f32> for DoubleFloat {
    #[inline]
    fn from(val: f32) -> Self {
        Self { hi: val, lo: 0.0 }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic: DF + DF
// ---------------------------------------------------------------------------

impl Add for DoubleFloat {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (s, e) = two_sum(self.hi, rhs.hi);
        let e = e + self.lo + rhs.lo;
        let (hi, lo) = quick_two_sum(s, e);
        Self { hi, lo }
    }
}

impl AddAssign for DoubleFloat {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

// ---------------------------------------------------------------------------
// Arithmetic: DF - DF
// ---------------------------------------------------------------------------

impl Sub for DoubleFloat {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl SubAssign for DoubleFloat {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// ---------------------------------------------------------------------------
// Arithmetic: DF * DF
// ---------------------------------------------------------------------------

impl Mul for DoubleFloat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (p, e) = two_prod(self.hi, rhs.hi);
        let e = e + (self.hi * rhs.lo + self.lo * rhs.hi);
        let (hi, lo) = quick_two_sum(p, e);
        Self { hi, lo }
    }
}

impl MulAssign for DoubleFloat {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// ---------------------------------------------------------------------------
// Arithmetic: negation
// ---------------------------------------------------------------------------

impl Neg for DoubleFloat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

impl PartialEq for DoubleFloat {
    fn eq(&self, other: &Self) -> bool {
        self.hi == other.hi && self.lo == other.lo
    }
}

impl PartialOrd for DoubleFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi) {
            Some(Ordering::Equal) => self.lo.partial_cmp(&other.lo),
            ord => ord,
        }
    }
}

impl fmt::Display for DoubleFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+.8e} + {:+.8e})", self.hi, self.lo)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
