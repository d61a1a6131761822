//! Polar inverse-search projection
//!
//! Remaps each virtual index to the raster coordinate whose polar-projected
//! position lands closest to it, scanning the whole 2D domain. An exact
//! lattice hit stops the scan early; an index with no candidate inside the
//! search bound becomes [`INDEX_UNMAPPED`](super::INDEX_UNMAPPED). The scan
//! is O(width * height) per index and runs only during a remap, never per
//! frame.

use super::{ConfigContext, INDEX_UNMAPPED, MapContext, Projection};
use crate::controls::ControlRegistrar;
use crate::coord::{Coord3D, Dimension};
use crate::params::CapacityError;
use crate::trig::Trigo;

/// Candidates farther than this from the queried coordinate are rejected.
const SEARCH_BOUND: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceFromPointProjection;

impl Projection for DistanceFromPointProjection {
    fn declare_controls(
        &self,
        _ctx: &mut ConfigContext<'_>,
        _registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        // No tunables; the projection center is the fixture midpoint.
        Ok(())
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn post_processing(&self, ctx: &mut MapContext<'_>, index_v: &mut u16) {
        if ctx.projection_dimension != Dimension::D2 {
            return;
        }
        let size = ctx.size;
        if size.x < 2 || size.y < 2 {
            return;
        }

        let queried_x = (i32::from(*index_v) % size.x) as f32;
        let queried_y = (i32::from(*index_v) / size.x) as f32;

        let trigo = Trigo::new(size.x - 1);
        let mut min_distance = SEARCH_BOUND;
        let mut best = None;

        'scan: for x in 0..size.x {
            let x_new = trigo.sin_scaled(size.x as f32, x);
            let y_new = trigo.cos_scaled(size.y as f32, x);

            for y in 0..size.y {
                // Radius factor shrinks rows toward the center point.
                let y_factor = 1.0 - y as f32 / (size.y - 1) as f32;

                let x_projected = libm::roundf((y_factor * x_new + size.x as f32) / 2.0);
                let y_projected = libm::roundf((y_factor * y_new + size.y as f32) / 2.0);

                let distance =
                    libm::hypotf(x_projected - queried_x, y_projected - queried_y);
                if distance < min_distance {
                    min_distance = distance;
                    best = Some(Coord3D::new(x, y, 0));
                    if distance < 0.5 {
                        // Exact lattice hit, stop looking further.
                        break 'scan;
                    }
                }
            }
        }

        *index_v = match best {
            Some(source) => ctx.flat_index(source) as u16,
            None => INDEX_UNMAPPED,
        };
    }
}
