use std::f32::consts::TAU;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

pub const ANG45: u32 = 0x2000_0000;
pub const ANG90: u32 = 0x4000_0000;
pub const ANG180: u32 = 0x8000_0000;
pub const ANG270: u32 = 0xC000_0000;

/// Binary Angle Measurement. The full circle is the full range of a `u32` so
/// all arithmetic wraps naturally.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Angle(u32);

impl Angle {
    pub const EAST: Self = Self(0);
    pub const NORTH: Self = Self(ANG90);
    pub const WEST: Self = Self(ANG180);
    pub const SOUTH: Self = Self(ANG270);

    #[inline]
    pub const fn from_bam(bam: u32) -> Self {
        Self(bam)
    }

    /// The 16-bit angle stored in map lumps is the top half of a BAM
    #[inline]
    pub const fn from_raw(raw: i16) -> Self {
        Self(((raw as i32) << 16) as u32)
    }

    #[inline]
    pub const fn bam(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn to_radians(&self) -> f32 {
        (self.0 as f64 / (u32::MAX as f64 + 1.0) * TAU as f64) as f32
    }

    #[inline]
    pub fn to_degrees(&self) -> f32 {
        (self.0 as f64 / (u32::MAX as f64 + 1.0) * 360.0) as f32
    }
}

impl Add for Angle {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Angle {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for Angle {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Angle {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for Angle {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use crate::angle::{ANG90, ANG180, Angle};

    #[test]
    fn raw_lump_angle() {
        // 0x4000 in a SEGS record is a quarter turn
        assert_eq!(Angle::from_raw(0x4000), Angle::NORTH);
        // Negative shorts are the upper half of the circle
        assert_eq!(Angle::from_raw(i16::MIN).bam(), ANG180);
        assert_eq!(Angle::from_raw(-0x4000), Angle::SOUTH);
    }

    #[test]
    fn wrapping() {
        let a = Angle::SOUTH + Angle::from_bam(ANG90 + ANG90);
        assert_eq!(a, Angle::NORTH);
        assert_eq!(Angle::EAST - Angle::NORTH, Angle::SOUTH);
        assert_eq!(-Angle::NORTH, Angle::SOUTH);
    }

    #[test]
    fn degrees() {
        assert!((Angle::WEST.to_degrees() - 180.0).abs() < 0.001);
        assert!((Angle::NORTH.to_radians() - std::f32::consts::FRAC_PI_2).abs() < 0.0001);
    }
}
