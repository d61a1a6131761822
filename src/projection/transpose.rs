//! Axis pair swaps

use core::mem;

use super::{ConfigContext, MapContext, Projection};
use crate::controls::{Control, ControlKind, ControlRegistrar, ControlTarget};
use crate::coord::{Coord3D, Dimension};
use crate::params::CapacityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransposeProjection;

impl Projection for TransposeProjection {
    fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        ctx.params.reset();
        let transpose_xy = ctx.params.declare(false)?;
        let transpose_xz = ctx.params.declare(false)?;
        let transpose_yz = ctx.params.declare(false)?;

        registrar.register(Control {
            id: "transpose_xy",
            label: None,
            kind: ControlKind::Checkbox,
            min: 0,
            max: 1,
            target: ControlTarget::Param(transpose_xy.raw()),
            triggers_mapping: true,
        });
        if ctx.effect_dimension == Dimension::D3 {
            registrar.register(Control {
                id: "transpose_xz",
                label: None,
                kind: ControlKind::Checkbox,
                min: 0,
                max: 1,
                target: ControlTarget::Param(transpose_xz.raw()),
                triggers_mapping: true,
            });
            registrar.register(Control {
                id: "transpose_yz",
                label: None,
                kind: ControlKind::Checkbox,
                min: 0,
                max: 1,
                target: ControlTarget::Param(transpose_yz.raw()),
                triggers_mapping: true,
            });
        }
        Ok(())
    }

    fn adjust_size_and_pixel(
        &self,
        ctx: &mut MapContext<'_>,
        _size: &mut Coord3D,
        pixel: &mut Coord3D,
        _mid: &mut Coord3D,
    ) {
        ctx.params.begin();
        let transpose_xy: bool = ctx.params.read();
        let transpose_xz: bool = ctx.params.read();
        let transpose_yz: bool = ctx.params.read();

        if transpose_xy {
            mem::swap(&mut pixel.x, &mut pixel.y);
        }
        if transpose_xz && ctx.effect_dimension == Dimension::D3 {
            mem::swap(&mut pixel.x, &mut pixel.z);
        }
        if transpose_yz && ctx.effect_dimension == Dimension::D3 {
            mem::swap(&mut pixel.y, &mut pixel.z);
        }
    }
}
