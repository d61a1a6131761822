//! Per-axis index flip

use super::{ConfigContext, MapContext, Projection};
use crate::controls::{Control, ControlKind, ControlRegistrar, ControlTarget};
use crate::coord::{Coord3D, Dimension};
use crate::params::CapacityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseProjection;

impl Projection for ReverseProjection {
    fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        ctx.params.reset();
        let reverse_x = ctx.params.declare(false)?;
        let reverse_y = ctx.params.declare(false)?;
        let reverse_z = ctx.params.declare(false)?;

        registrar.register(Control {
            id: "reverse_x",
            label: None,
            kind: ControlKind::Checkbox,
            min: 0,
            max: 1,
            target: ControlTarget::Param(reverse_x.raw()),
            triggers_mapping: true,
        });
        if ctx.effect_dimension >= Dimension::D2 {
            registrar.register(Control {
                id: "reverse_y",
                label: None,
                kind: ControlKind::Checkbox,
                min: 0,
                max: 1,
                target: ControlTarget::Param(reverse_y.raw()),
                triggers_mapping: true,
            });
        }
        if ctx.effect_dimension == Dimension::D3 {
            registrar.register(Control {
                id: "reverse_z",
                label: None,
                kind: ControlKind::Checkbox,
                min: 0,
                max: 1,
                target: ControlTarget::Param(reverse_z.raw()),
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
        let reverse_x: bool = ctx.params.read();
        let reverse_y: bool = ctx.params.read();
        let reverse_z: bool = ctx.params.read();

        if reverse_x {
            pixel.x = size.x - pixel.x - 1;
        }
        if reverse_y && ctx.effect_dimension >= Dimension::D2 {
            pixel.y = size.y - pixel.y - 1;
        }
        if reverse_z && ctx.effect_dimension == Dimension::D3 {
            pixel.z = size.z - pixel.z - 1;
        }
    }
}
