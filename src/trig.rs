//! Angle arithmetic over a configurable period.
//!
//! Projections work with integer angles that wrap over a period (360 for
//! degree-driven rotation, `size.x - 1` for the polar inverse search).
//! Float math goes through `libm`.

use core::f32::consts::TAU;

use crate::coord::Coord3D;

/// Trig evaluator whose angle argument wraps over `period` steps per turn.
#[derive(Debug, Clone, Copy)]
pub struct Trigo {
    period: i32,
}

impl Trigo {
    pub const fn new(period: i32) -> Self {
        Self {
            period: if period < 1 { 1 } else { period },
        }
    }

    /// Degree-based evaluator (period 360).
    pub const fn degrees() -> Self {
        Self::new(360)
    }

    #[allow(clippy::cast_precision_loss)]
    fn radians(self, angle: i32) -> f32 {
        let wrapped = angle.rem_euclid(self.period);
        wrapped as f32 * TAU / self.period as f32
    }

    /// `amplitude * sin(angle)`
    pub fn sin_scaled(self, amplitude: f32, angle: i32) -> f32 {
        amplitude * libm::sinf(self.radians(angle))
    }

    /// `amplitude * cos(angle)`
    pub fn cos_scaled(self, amplitude: f32, angle: i32) -> f32 {
        amplitude * libm::cosf(self.radians(angle))
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn rotate(self, a: i32, b: i32, angle: i32) -> (i32, i32) {
        let r = self.radians(angle);
        let (sin, cos) = (libm::sinf(r), libm::cosf(r));
        let a_new = cos * a as f32 - sin * b as f32;
        let b_new = sin * a as f32 + cos * b as f32;
        (libm::roundf(a_new) as i32, libm::roundf(b_new) as i32)
    }

    /// Rotate `pixel` about the X axis through `center`.
    pub fn tilt(self, pixel: Coord3D, center: Coord3D, angle: i32) -> Coord3D {
        let d = pixel - center;
        let (y, z) = self.rotate(d.y, d.z, angle);
        Coord3D::new(pixel.x, center.y + y, center.z + z)
    }

    /// Rotate `pixel` about the Y axis through `center`.
    pub fn pan(self, pixel: Coord3D, center: Coord3D, angle: i32) -> Coord3D {
        let d = pixel - center;
        let (z, x) = self.rotate(d.z, d.x, angle);
        Coord3D::new(center.x + x, pixel.y, center.z + z)
    }

    /// Rotate `pixel` about the Z axis through `center`.
    pub fn roll(self, pixel: Coord3D, center: Coord3D, angle: i32) -> Coord3D {
        let d = pixel - center;
        let (x, y) = self.rotate(d.x, d.y, angle);
        Coord3D::new(center.x + x, center.y + y, pixel.z)
    }
}
