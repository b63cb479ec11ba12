use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Shl, Shr, Sub, SubAssign};

pub const FRACBITS: u32 = 16;
pub const FRACUNIT: i32 = 1 << FRACBITS;

/// A signed 16.16 fixed-point number, the coordinate type of the whole level.
///
/// Arithmetic reproduces the classic engine bit for bit: addition and
/// subtraction wrap, multiplication widens to 64 bits and shifts back down,
/// and division saturates to `MIN`/`MAX` when the quotient cannot fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint(i32);

impl FixedPoint {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(FRACUNIT);
    pub const MIN: Self = Self(i32::MIN);
    pub const MAX: Self = Self(i32::MAX);

    /// Wrap an already scaled value
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Convert a raw 16-bit map unit, `raw << 16`
    #[inline]
    pub const fn from_raw(raw: i16) -> Self {
        Self((raw as i32) << FRACBITS)
    }

    /// Convert a whole number. Values outside the 16-bit integer range wrap
    /// exactly as a left shift would.
    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value.wrapping_shl(FRACBITS))
    }

    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Integer part, rounded towards negative infinity
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> FRACBITS
    }

    #[inline]
    pub const fn to_f32(self) -> f32 {
        self.0 as f32 / FRACUNIT as f32
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn signum(self) -> i32 {
        self.0.signum()
    }

    /// `FixedMul`
    #[inline]
    pub const fn fixed_mul(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) >> FRACBITS) as i32)
    }

    /// `FixedDiv`, including the overflow guard
    #[inline]
    pub const fn fixed_div(self, rhs: Self) -> Self {
        if (self.0.wrapping_abs() >> 14) >= rhs.0.wrapping_abs() {
            return if (self.0 ^ rhs.0) < 0 {
                Self::MIN
            } else {
                Self::MAX
            };
        }
        Self((((self.0 as i64) << FRACBITS) / rhs.0 as i64) as i32)
    }

    /// Midpoint of two values, `(a + b) / 2` with the sum wrapping first
    #[inline]
    pub const fn midpoint(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0) / 2)
    }
}

impl Add for FixedPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for FixedPoint {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for FixedPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for FixedPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl Mul for FixedPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.fixed_mul(rhs)
    }
}

impl Div for FixedPoint {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.fixed_div(rhs)
    }
}

/// Arithmetic shift, as `fixed_t >> n` in C
impl Shr<u32> for FixedPoint {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: u32) -> Self {
        Self(self.0 >> rhs)
    }
}

impl Shl<u32> for FixedPoint {
    type Output = Self;

    #[inline]
    fn shl(self, rhs: u32) -> Self {
        Self(self.0.wrapping_shl(rhs))
    }
}

impl From<i16> for FixedPoint {
    fn from(value: i16) -> Self {
        Self::from_raw(value)
    }
}

impl From<FixedPoint> for f32 {
    fn from(value: FixedPoint) -> Self {
        value.to_f32()
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}
