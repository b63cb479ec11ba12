//! Numeric types shared by the level loader and anything that walks the level:
//! the 16.16 `FixedPoint` used for every map coordinate, and the binary-angle
//! `Angle` used by segments.

mod angle;
mod fixed_point;

pub use angle::*;
pub use fixed_point::*;

use glam::Vec2;

/// Convert a Doom `fixed_t` fixed-point value to `f32`
pub const fn fixed_to_float(value: i32) -> f32 {
    value as f32 / FRACUNIT as f32
}

/// Convert an `f32` to a Doom `fixed_t`, truncating towards zero
pub const fn float_to_fixed(value: f32) -> i32 {
    (value * FRACUNIT as f32) as i32
}

/// Build a float vector from a fixed-point pair. Renderers that work in floats
/// use this at the boundary, the level itself never does.
#[inline]
pub fn fixed_vec2(x: FixedPoint, y: FixedPoint) -> Vec2 {
    Vec2::new(x.to_f32(), y.to_f32())
}

#[cfg(test)]
mod tests {
    use crate::{FixedPoint, fixed_to_float, fixed_vec2, float_to_fixed};
    use glam::Vec2;

    #[test]
    fn float_conversions() {
        assert_eq!(fixed_to_float(1 << 16), 1.0);
        assert_eq!(fixed_to_float(-(1 << 15)), -0.5);
        assert_eq!(float_to_fixed(2.25), 2 * 65536 + 16384);
    }

    #[test]
    fn vec2_from_fixed() {
        let v = fixed_vec2(FixedPoint::from_raw(64), FixedPoint::from_raw(-32));
        assert_eq!(v, Vec2::new(64.0, -32.0));
    }
}
