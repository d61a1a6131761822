//! Per-group projection state and mapping lifecycle.
//!
//! A segment is an independently projectable subset of a fixture. It owns
//! the active projection, the parameter store backing that projection's
//! tunables, motion state for continuous rotation, and the index tables a
//! mapping pass produces. Remaps are debounced: control changes set a dirty
//! flag that is honored at most once per [`REMAP_INTERVAL`], never per
//! rendered frame.

use embassy_time::{Duration, Instant};

use crate::controls::ControlRegistrar;
use crate::coord::{Coord3D, Dimension};
use crate::mapper;
use crate::params::{CapacityError, SegmentParams, SlotRef};
use crate::projection::{ConfigContext, INDEX_UNMAPPED, MapContext, ProjectionId, ProjectionSlot};
use crate::{FixtureLayout, Rgb};

/// Minimum time between two remaps of one segment.
pub const REMAP_INTERVAL: Duration = Duration::from_secs(1);

/// Rotation inputs for the continuous projection hook.
///
/// An orientation snapshot (when a sensor is wired up) takes precedence over
/// the per-axis speed settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionState {
    /// Orientation angles in degrees, if a sensor is present.
    pub gyro: Option<Coord3D>,
    pub tilt_speed: u8,
    pub pan_speed: u8,
    pub roll_speed: u8,
}

/// Configuration for one segment.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Physical extents of the fixture part this segment covers.
    pub fix_size: Coord3D,
    pub projection: ProjectionId,
    pub projection_dimension: Dimension,
    pub effect_dimension: Dimension,
}

/// One LED group: projection, parameters and mapping tables.
pub struct Segment<const MAX_LEDS: usize> {
    pub(crate) fix_size: Coord3D,
    pub(crate) projection_dimension: Dimension,
    pub(crate) effect_dimension: Dimension,
    pub(crate) projection: ProjectionSlot,
    pub(crate) params: SegmentParams,
    pub(crate) motion: MotionState,
    dirty: bool,
    last_remap: Option<Instant>,

    // Mapping results, owned here and recomputed on demand.
    pub(crate) virtual_size: Coord3D,
    pub(crate) to_virtual: [u16; MAX_LEDS],
    pub(crate) from_virtual: heapless::Vec<(u16, u16), MAX_LEDS>,
}

impl<const MAX_LEDS: usize> Segment<MAX_LEDS> {
    /// Create a segment and configure its initial projection.
    pub fn new(
        config: &SegmentConfig,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<Self, CapacityError> {
        let mut segment = Self {
            fix_size: config.fix_size,
            projection_dimension: config.projection_dimension,
            effect_dimension: config.effect_dimension,
            projection: ProjectionSlot::Default,
            params: SegmentParams::new(),
            motion: MotionState::default(),
            dirty: false,
            last_remap: None,
            virtual_size: Coord3D::ZERO,
            to_virtual: [INDEX_UNMAPPED; MAX_LEDS],
            from_virtual: heapless::Vec::new(),
        };
        segment.select_projection(config.projection, registrar)?;
        Ok(segment)
    }

    /// Swap the active projection.
    ///
    /// Resets the parameter store, replays the new projection's declare
    /// sequence and schedules a remap. On a capacity error the segment
    /// falls back to the identity projection with an empty store.
    pub fn select_projection(
        &mut self,
        id: ProjectionId,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        self.projection = id.to_slot();
        self.params.reset();
        let mut ctx = ConfigContext {
            params: &mut self.params,
            projection_dimension: self.projection_dimension,
            effect_dimension: self.effect_dimension,
        };
        let declared = self.projection.declare_controls(&mut ctx, registrar);
        if declared.is_err() {
            self.projection = ProjectionSlot::Default;
            self.params.reset();
        }
        self.trigger_mapping();
        declared
    }

    /// Schedule a remap; honored by the next debounce-eligible `maintain`.
    pub fn trigger_mapping(&mut self) {
        self.dirty = true;
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Service the dirty flag; runs at most one remap per call and per
    /// [`REMAP_INTERVAL`]. Returns whether a remap ran.
    pub fn maintain(&mut self, now: Instant, layout: &dyn FixtureLayout) -> bool {
        if !self.dirty {
            return false;
        }
        if let Some(last) = self.last_remap {
            if now.duration_since(last) < REMAP_INTERVAL {
                return false;
            }
        }
        mapper::project_and_map(self, layout, now);
        self.dirty = false;
        self.last_remap = Some(now);
        true
    }

    /// Virtual index a rendered pixel lands on, after the continuous
    /// adjustment. [`INDEX_UNMAPPED`] when the pixel leaves the virtual box.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn virtual_index(&mut self, now: Instant, pixel: Coord3D) -> u16 {
        let projection = self.projection;
        let mut pixel = pixel;
        let mut ctx = MapContext {
            size: self.virtual_size,
            fix_size: self.fix_size,
            projection_dimension: self.projection_dimension,
            effect_dimension: self.effect_dimension,
            params: &mut self.params,
            motion: self.motion,
            now,
        };
        projection.adjust_xyz(&mut ctx, &mut pixel);

        let size = self.virtual_size;
        let inside = pixel.x >= 0
            && pixel.y >= 0
            && pixel.z >= 0
            && pixel.x < size.x
            && pixel.y < size.y
            && pixel.z < size.z;
        if !inside {
            return INDEX_UNMAPPED;
        }
        (pixel.x + pixel.y * size.x + pixel.z * size.x * size.y) as u16
    }

    /// Route a virtual frame onto the physical frame through the mapping
    /// tables. Unmapped physical pixels keep their previous color.
    pub fn scatter(&self, virtual_frame: &[Rgb], physical_frame: &mut [Rgb]) {
        for (physical, &index_v) in self.to_virtual.iter().enumerate() {
            if index_v == INDEX_UNMAPPED {
                continue;
            }
            let Some(&color) = virtual_frame.get(usize::from(index_v)) else {
                continue;
            };
            if let Some(led) = physical_frame.get_mut(physical) {
                *led = color;
            }
        }
    }

    /// Physical indices feeding one virtual index.
    pub fn physical_for(&self, index_v: u16) -> impl Iterator<Item = u16> + '_ {
        self.from_virtual
            .iter()
            .filter(move |(v, _)| *v == index_v)
            .map(|&(_, p)| p)
    }

    /// Virtual index of a physical LED, [`INDEX_UNMAPPED`] for holes.
    pub fn virtual_for(&self, index_p: u16) -> u16 {
        self.to_virtual
            .get(usize::from(index_p))
            .copied()
            .unwrap_or(INDEX_UNMAPPED)
    }

    /// Number of physical pixels the last remap mapped.
    pub fn mapped_count(&self) -> usize {
        self.from_virtual.len()
    }

    pub const fn virtual_size(&self) -> Coord3D {
        self.virtual_size
    }

    pub const fn fix_size(&self) -> Coord3D {
        self.fix_size
    }

    pub fn projection_id(&self) -> ProjectionId {
        self.projection.id()
    }

    pub const fn motion(&self) -> MotionState {
        self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionState {
        &mut self.motion
    }

    pub const fn params(&self) -> &SegmentParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SegmentParams {
        &mut self.params
    }

    /// Overwrite one declared parameter; returns whether the slot matched.
    pub fn write_param(&mut self, slot: SlotRef, payload: &[u8]) -> bool {
        self.params.write_raw(slot, payload)
    }

    /// Restore persisted parameter bytes and schedule a remap.
    pub fn restore_params(&mut self, bytes: &[u8]) -> usize {
        let copied = self.params.load_bytes(bytes);
        self.trigger_mapping();
        copied
    }
}
