//! Fixed composite projection
//!
//! Combines tiling, continuous rotation and the polar inverse search by
//! delegating each hook to a sibling variant value. The parameter layout is
//! whatever the delegated `declare_controls` chain leaves behind, so the
//! delegation order is part of the persistence contract.

use super::{
    ConfigContext, DistanceFromPointProjection, MapContext, MultiplyProjection, Projection,
    TiltPanRollProjection,
};
use crate::controls::ControlRegistrar;
use crate::coord::Coord3D;
use crate::params::CapacityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset1Projection;

impl Projection for Preset1Projection {
    fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        DistanceFromPointProjection.declare_controls(ctx, registrar)?;
        MultiplyProjection.declare_controls(ctx, registrar)?;
        TiltPanRollProjection.declare_controls(ctx, registrar)?;
        Ok(())
    }

    fn adjust_size_and_pixel(
        &self,
        ctx: &mut MapContext<'_>,
        size: &mut Coord3D,
        pixel: &mut Coord3D,
        mid: &mut Coord3D,
    ) {
        MultiplyProjection.adjust_size_and_pixel(ctx, size, pixel, mid);
    }

    fn adjust_xyz(&self, ctx: &mut MapContext<'_>, pixel: &mut Coord3D) {
        TiltPanRollProjection.adjust_xyz(ctx, pixel);
    }
}
