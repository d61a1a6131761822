//! Continuous rotation projection
//!
//! Rotates every rendered pixel about the segment's center, driven by an
//! orientation snapshot when one is present, otherwise by per-axis speed
//! settings and the frame clock. Motion values live on the segment, not in
//! the parameter store, so changing them never forces a remap.

use super::{ConfigContext, MapContext, Projection};
use crate::controls::{Control, ControlKind, ControlRegistrar, ControlTarget};
use crate::coord::Coord3D;
use crate::params::CapacityError;
use crate::trig::Trigo;

/// Fastest allowed speed setting; 255 would stall the angle divisor.
const MAX_SPEED: u8 = 254;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiltPanRollProjection;

#[allow(clippy::cast_possible_truncation)]
fn speed_angle(now_ms: u64, speed: u8) -> i32 {
    let divisor = u64::from(255 - speed.min(MAX_SPEED));
    ((now_ms * 5 / divisor) % 360) as i32
}

impl Projection for TiltPanRollProjection {
    fn declare_controls(
        &self,
        _ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        registrar.register(Control {
            id: "tilt",
            label: Some("Tilt speed"),
            kind: ControlKind::Slider,
            min: 0,
            max: i32::from(MAX_SPEED),
            target: ControlTarget::TiltSpeed,
            triggers_mapping: false,
        });
        registrar.register(Control {
            id: "pan",
            label: Some("Pan speed"),
            kind: ControlKind::Slider,
            min: 0,
            max: i32::from(MAX_SPEED),
            target: ControlTarget::PanSpeed,
            triggers_mapping: false,
        });
        registrar.register(Control {
            id: "roll",
            label: Some("Roll speed"),
            kind: ControlKind::Slider,
            min: 0,
            max: i32::from(MAX_SPEED),
            target: ControlTarget::RollSpeed,
            triggers_mapping: false,
        });
        Ok(())
    }

    fn adjust_xyz(&self, ctx: &mut MapContext<'_>, pixel: &mut Coord3D) {
        let trigo = Trigo::degrees();
        let center = ctx.size / 2;

        if let Some(orientation) = ctx.motion.gyro {
            *pixel = trigo.tilt(*pixel, center, orientation.x);
            *pixel = trigo.pan(*pixel, center, orientation.y);
            *pixel = trigo.roll(*pixel, center, orientation.z);
            return;
        }

        let now_ms = ctx.now.as_millis();
        if ctx.motion.tilt_speed > 0 {
            *pixel = trigo.tilt(*pixel, center, speed_angle(now_ms, ctx.motion.tilt_speed));
        }
        if ctx.motion.pan_speed > 0 {
            *pixel = trigo.pan(*pixel, center, speed_angle(now_ms, ctx.motion.pan_speed));
        }
        if ctx.motion.roll_speed > 0 {
            *pixel = trigo.roll(*pixel, center, speed_angle(now_ms, ctx.motion.roll_speed));
        }
        if ctx.fix_size.z == 1 {
            // 3D effects are flattened on planar fixtures.
            pixel.z = 0;
        }
    }
}
