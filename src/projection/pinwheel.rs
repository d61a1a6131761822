//! Polar petal quantization
//!
//! Slices the plane around the fixture midpoint into angular petals and maps
//! every pixel to its petal index, with optional swirl (angle offset growing
//! with radius), z-twist (angle offset growing with depth) and reversed
//! petal ordering.

use super::{ConfigContext, MapContext, Projection};
use crate::controls::{Control, ControlKind, ControlRegistrar, ControlTarget};
use crate::coord::{Coord3D, Dimension};
use crate::params::CapacityError;

/// Grid mapping limit for the petal axis above 1D.
const MAX_GRID_PETALS: i32 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinwheelProjection;

impl Projection for PinwheelProjection {
    fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        ctx.params.reset();
        // Petals first; the size adjustment reads only this prefix.
        let petals = ctx.params.declare(60u16)?;
        let swirl = ctx.params.declare(30u8)?;
        let reverse = ctx.params.declare(false)?;
        let angle_range = ctx.params.declare(360u16)?;
        let z_twist = ctx.params.declare(42u8)?;

        registrar.register(Control {
            id: "swirl",
            label: None,
            kind: ControlKind::Slider,
            min: 0,
            max: 60,
            target: ControlTarget::Param(swirl.raw()),
            triggers_mapping: true,
        });
        registrar.register(Control {
            id: "reverse",
            label: None,
            kind: ControlKind::Checkbox,
            min: 0,
            max: 1,
            target: ControlTarget::Param(reverse.raw()),
            triggers_mapping: true,
        });
        if ctx.projection_dimension == Dimension::D3 {
            registrar.register(Control {
                id: "z_twist",
                label: None,
                kind: ControlKind::Slider,
                min: 0,
                max: 84,
                target: ControlTarget::Param(z_twist.raw()),
                triggers_mapping: true,
            });
        }
        registrar.register(Control {
            id: "angle_range",
            label: None,
            kind: ControlKind::Number,
            min: 1,
            max: 720,
            target: ControlTarget::Param(angle_range.raw()),
            triggers_mapping: true,
        });
        registrar.register(Control {
            id: "petals",
            label: None,
            kind: ControlKind::Number,
            min: 1,
            max: 360,
            target: ControlTarget::Param(petals.raw()),
            triggers_mapping: true,
        });
        Ok(())
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn adjust_size_and_pixel(
        &self,
        ctx: &mut MapContext<'_>,
        size: &mut Coord3D,
        _pixel: &mut Coord3D,
        mid: &mut Coord3D,
    ) {
        if ctx.size != Coord3D::ZERO {
            // The virtual size is already assigned; adjust only on the
            // first pixel of a mapping pass.
            return;
        }
        ctx.params.begin();
        let petals = i32::from(ctx.params.read::<u16>()).max(1);

        if ctx.projection_dimension > Dimension::D1 && ctx.effect_dimension > Dimension::D1 {
            // Secondary axis spans the largest corner-to-center radius.
            let radius_x = (size.x - mid.x).max(mid.x) as f32;
            let radius_y = (size.y - mid.y).max(mid.y) as f32;
            size.y = libm::sqrtf(radius_x * radius_x + radius_y * radius_y) as i32 + 1;
            size.x = petals.min(MAX_GRID_PETALS);
            size.z = 1;
        } else {
            *size = Coord3D::new(petals, 1, 1);
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn adjust_mapped(
        &self,
        ctx: &mut MapContext<'_>,
        mapped: &mut Coord3D,
        _size: Coord3D,
        pixel: Coord3D,
        mid: Coord3D,
    ) {
        ctx.params.begin();
        let mut petals = i32::from(ctx.params.read::<u16>());
        let swirl = i32::from(ctx.params.read::<u8>()) - 30;
        let reverse: bool = ctx.params.read();
        let angle_range = i32::from(ctx.params.read::<u16>()).max(1);
        let z_twist = i32::from(ctx.params.read::<u8>()) - 42;

        let planar = ctx.effect_dimension > Dimension::D1
            && ctx.projection_dimension > Dimension::D1;
        if planar {
            petals = petals.min(MAX_GRID_PETALS);
        }
        let petals = petals.max(1);

        let dx = pixel.x - mid.x;
        let dy = pixel.y - mid.y;
        let swirl_factor = if swirl == 0 {
            0
        } else {
            (libm::hypotf(dy as f32, dx as f32) * swirl.abs() as f32) as i32
        };
        let mut angle = libm::atan2f(dy as f32, dx as f32).to_degrees() as i32 + 180;
        if swirl < 0 {
            angle = 360 - angle;
        }

        let raw = angle + swirl_factor + z_twist * pixel.z;
        let petal_width = angle_range as f32 / petals as f32;
        // Euclidean wrap keeps the petal index in range even when twist
        // terms drive the sum negative.
        let mut petal = (raw as f32 / petal_width) as i32;
        petal = petal.rem_euclid(petals);
        if reverse {
            petal = petals - petal - 1;
        }

        mapped.x = petal;
        mapped.y = if planar {
            libm::sqrtf((dx * dx + dy * dy) as f32) as i32
        } else {
            0
        };
        mapped.z = 0;
    }
}
