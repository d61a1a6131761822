//! Pixel clustering projection
//!
//! Divides positions by a per-axis group size so several physical pixels
//! share one virtual index.

use super::{ConfigContext, MapContext, Projection};
use crate::controls::{Control, ControlKind, ControlRegistrar, ControlTarget};
use crate::coord::Coord3D;
use crate::params::CapacityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingProjection;

impl Projection for GroupingProjection {
    fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        ctx.params.reset();
        let group = ctx.params.declare(Coord3D::ONE)?;

        registrar.register(Control {
            id: "grouping",
            label: None,
            kind: ControlKind::Coord,
            min: 0,
            max: 100,
            target: ControlTarget::Param(group.raw()),
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
        let group: Coord3D = ctx.params.read();

        let group = group.max_components(Coord3D::ONE);
        if group == Coord3D::ONE {
            return;
        }

        *mid = *mid / group;
        *pixel = *pixel / group;
        *size = size.ceil_div(group);
    }
}
