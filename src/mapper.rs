//! Mapping pass over a fixture's physical pixels.
//!
//! One pass walks every physical coordinate, drives the active projection's
//! hooks in the fixed pipeline order (size/pixel adjustment, mapped
//! coordinate, index post-processing) and writes the segment's
//! virtual-to-physical and physical-to-virtual index tables. The continuous
//! per-pixel hook is not part of the pass; it runs at render time.

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::FixtureLayout;
use crate::coord::{Coord3D, Dimension};
use crate::projection::{INDEX_UNMAPPED, MapContext};
use crate::segment::Segment;

/// Dense grid fixture in raster order, for tests and simple strips/panels.
#[derive(Debug, Clone, Copy)]
pub struct RasterLayout {
    pub size: Coord3D,
}

impl RasterLayout {
    pub const fn new(size: Coord3D) -> Self {
        Self { size }
    }
}

impl FixtureLayout for RasterLayout {
    fn size(&self) -> Coord3D {
        self.size
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn index(&self, pos: Coord3D) -> Option<u16> {
        let size = self.size;
        let inside = pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < size.x
            && pos.y < size.y
            && pos.z < size.z;
        if !inside {
            return None;
        }
        let flat =
            i64::from(pos.x) + i64::from(pos.y) * i64::from(size.x)
                + i64::from(pos.z) * i64::from(size.x) * i64::from(size.y);
        (flat < i64::from(INDEX_UNMAPPED)).then(|| flat as u16)
    }
}

/// Axes above the effect rank collapse to extent 1.
fn collapse(size: Coord3D, effect_dimension: Dimension) -> Coord3D {
    match effect_dimension {
        Dimension::D1 => Coord3D::new(size.x, 1, 1),
        Dimension::D2 => Coord3D::new(size.x, size.y, 1),
        Dimension::D3 => size,
    }
}

/// Wrap a mapped coordinate into the virtual box and flatten it.
///
/// A box with a non-positive extent has no valid indices.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn wrap_into(pos: Coord3D, size: Coord3D) -> Option<u16> {
    if size.x <= 0 || size.y <= 0 || size.z <= 0 {
        return None;
    }
    let wrapped = Coord3D::new(
        pos.x.rem_euclid(size.x),
        pos.y.rem_euclid(size.y),
        pos.z.rem_euclid(size.z),
    );
    let flat = i64::from(wrapped.x)
        + i64::from(wrapped.y) * i64::from(size.x)
        + i64::from(wrapped.z) * i64::from(size.x) * i64::from(size.y);
    (flat < i64::from(INDEX_UNMAPPED)).then(|| flat as u16)
}

/// Recompute a segment's index tables.
pub(crate) fn project_and_map<const MAX_LEDS: usize>(
    segment: &mut Segment<MAX_LEDS>,
    layout: &dyn FixtureLayout,
    now: Instant,
) {
    let fix_size = segment.fix_size;
    let projection = segment.projection;
    let projection_dimension = segment.projection_dimension;
    let effect_dimension = segment.effect_dimension;
    let motion = segment.motion;
    let mid = fix_size / 2;

    segment.to_virtual = [INDEX_UNMAPPED; MAX_LEDS];
    segment.from_virtual.clear();
    segment.virtual_size = Coord3D::ZERO;

    let mut virtual_size = Coord3D::ZERO;

    for z in 0..fix_size.z {
        for y in 0..fix_size.y {
            for x in 0..fix_size.x {
                let pos = Coord3D::new(x, y, z);
                let Some(index_p) = layout.index(pos) else {
                    continue;
                };
                if usize::from(index_p) >= MAX_LEDS {
                    continue;
                }

                let mut size_adjusted = fix_size;
                let mut pixel_adjusted = pos;
                let mut mid_adjusted = mid;

                let mut ctx = MapContext {
                    size: virtual_size,
                    fix_size,
                    projection_dimension,
                    effect_dimension,
                    params: &mut segment.params,
                    motion,
                    now,
                };
                projection.adjust_size_and_pixel(
                    &mut ctx,
                    &mut size_adjusted,
                    &mut pixel_adjusted,
                    &mut mid_adjusted,
                );

                if virtual_size == Coord3D::ZERO {
                    virtual_size = collapse(size_adjusted, effect_dimension);
                }
                ctx.size = virtual_size;

                let mut mapped = pixel_adjusted;
                projection.adjust_mapped(
                    &mut ctx,
                    &mut mapped,
                    size_adjusted,
                    pixel_adjusted,
                    mid_adjusted,
                );

                let mut index_v = wrap_into(mapped, virtual_size).unwrap_or(INDEX_UNMAPPED);
                if index_v != INDEX_UNMAPPED {
                    projection.post_processing(&mut ctx, &mut index_v);
                }
                if index_v == INDEX_UNMAPPED {
                    continue;
                }

                segment.to_virtual[usize::from(index_p)] = index_v;
                let _ = segment.from_virtual.push((index_v, index_p));
            }
        }
    }

    segment.virtual_size = virtual_size;

    #[cfg(feature = "esp32-log")]
    println!(
        "remap: {} leds -> {}x{}x{} virtual",
        segment.from_virtual.len(),
        virtual_size.x,
        virtual_size.y,
        virtual_size.z
    );
}
