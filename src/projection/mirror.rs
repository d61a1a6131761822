//! Per-axis fold about the fixture midpoint
//!
//! Indices past the half-size reflect back to `size - 1 - index`, and the
//! reported size on a mirrored axis halves (rounded up). Secondary and
//! tertiary axes only participate at sufficient projection rank.

use super::{ConfigContext, MapContext, Projection};
use crate::controls::{Control, ControlKind, ControlRegistrar, ControlTarget};
use crate::coord::{Coord3D, Dimension};
use crate::params::CapacityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorProjection;

impl Projection for MirrorProjection {
    fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        ctx.params.reset();
        let mirror_x = ctx.params.declare(false)?;
        let mirror_y = ctx.params.declare(false)?;
        let mirror_z = ctx.params.declare(false)?;

        registrar.register(Control {
            id: "mirror_x",
            label: None,
            kind: ControlKind::Checkbox,
            min: 0,
            max: 1,
            target: ControlTarget::Param(mirror_x.raw()),
            triggers_mapping: true,
        });
        if ctx.projection_dimension >= Dimension::D2 {
            registrar.register(Control {
                id: "mirror_y",
                label: None,
                kind: ControlKind::Checkbox,
                min: 0,
                max: 1,
                target: ControlTarget::Param(mirror_y.raw()),
                triggers_mapping: true,
            });
        }
        if ctx.projection_dimension == Dimension::D3 {
            registrar.register(Control {
                id: "mirror_z",
                label: None,
                kind: ControlKind::Checkbox,
                min: 0,
                max: 1,
                target: ControlTarget::Param(mirror_z.raw()),
                triggers_mapping: true,
            });
        }
        Ok(())
    }

    fn adjust_size_and_pixel(
        &self,
        ctx: &mut MapContext<'_>,
        size: &mut Coord3D,
        pixel: &mut Coord3D,
        _mid: &mut Coord3D,
    ) {
        ctx.params.begin();
        let mirror_x: bool = ctx.params.read();
        let mirror_y: bool = ctx.params.read();
        let mirror_z: bool = ctx.params.read();

        if mirror_x {
            if pixel.x >= size.x / 2 {
                pixel.x = size.x - 1 - pixel.x;
            }
            size.x = (size.x + 1) / 2;
        }
        // Stray parameter bytes on a lower-rank segment must not fold an
        // axis the projection does not expose.
        if mirror_y && ctx.projection_dimension >= Dimension::D2 {
            if pixel.y >= size.y / 2 {
                pixel.y = size.y - 1 - pixel.y;
            }
            size.y = (size.y + 1) / 2;
        }
        if mirror_z && ctx.projection_dimension == Dimension::D3 {
            if pixel.z >= size.z / 2 {
                pixel.z = size.z - 1 - pixel.z;
            }
            size.z = (size.z + 1) / 2;
        }
    }
}
