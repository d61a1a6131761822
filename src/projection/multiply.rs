//! Tiled repetition projection
//!
//! Shrinks the virtual size by a per-axis factor and wraps every physical
//! pixel into the first tile, optionally alternating direction on every
//! other tile for seamless mirrored tiling.

use super::{ConfigContext, MapContext, Projection};
use crate::controls::{Control, ControlKind, ControlRegistrar, ControlTarget};
use crate::coord::Coord3D;
use crate::params::CapacityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyProjection;

impl Projection for MultiplyProjection {
    fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        ctx.params.reset();
        let factor = ctx.params.declare(Coord3D::new(2, 2, 1))?;
        let mirror = ctx.params.declare(false)?;

        registrar.register(Control {
            id: "multiply",
            label: None,
            kind: ControlKind::Coord,
            min: 0,
            max: 10,
            target: ControlTarget::Param(factor.raw()),
            triggers_mapping: true,
        });
        registrar.register(Control {
            id: "mirror",
            label: None,
            kind: ControlKind::Checkbox,
            min: 0,
            max: 1,
            target: ControlTarget::Param(mirror.raw()),
            triggers_mapping: true,
        });
        Ok(())
    }

    fn adjust_size_and_pixel(
        &self,
        ctx: &mut MapContext<'_>,
        size: &mut Coord3D,
        pixel: &mut Coord3D,
        mid: &mut Coord3D,
    ) {
        ctx.params.begin();
        let factor: Coord3D = ctx.params.read();
        let mirror: bool = ctx.params.read();

        let factor = factor.max_components(Coord3D::ONE);
        if factor == Coord3D::ONE {
            return;
        }

        *size = size.ceil_div(factor);
        *mid = *mid / factor;

        // Zero-size axes stay zero; clamp only the wrap divisor.
        let tile = size.max_components(Coord3D::ONE);
        if mirror {
            let tiles = *pixel / tile;
            *pixel = *pixel % tile;
            if tiles.x % 2 != 0 {
                pixel.x = size.x - 1 - pixel.x;
            }
            if tiles.y % 2 != 0 {
                pixel.y = size.y - 1 - pixel.y;
            }
            if tiles.z % 2 != 0 {
                pixel.z = size.z - 1 - pixel.z;
            }
        } else {
            *pixel = *pixel % tile;
        }
    }
}
