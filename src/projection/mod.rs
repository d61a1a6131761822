//! Projection system with compile-time known variants
//!
//! A projection is stateless transform logic translating virtual pixel
//! coordinates to physical driver indices; all per-instance state lives in
//! the owning segment's parameter store and motion state. All variants are
//! stored in an enum to avoid heap allocations.

mod distance_from_point;
mod grouping;
mod mirror;
mod multiply;
mod pinwheel;
mod preset1;
mod reverse;
mod tilt_pan_roll;
mod transpose;

use embassy_time::Instant;

pub use distance_from_point::DistanceFromPointProjection;
pub use grouping::GroupingProjection;
pub use mirror::MirrorProjection;
pub use multiply::MultiplyProjection;
pub use pinwheel::PinwheelProjection;
pub use preset1::Preset1Projection;
pub use reverse::ReverseProjection;
pub use tilt_pan_roll::TiltPanRollProjection;
pub use transpose::TransposeProjection;

use crate::controls::ControlRegistrar;
use crate::coord::{Coord3D, Dimension};
use crate::params::{CapacityError, SegmentParams};
use crate::segment::MotionState;

/// Sentinel virtual index meaning "this pixel is unmapped".
pub const INDEX_UNMAPPED: u16 = u16::MAX;

const PROJECTION_NAME_NONE: &str = "none";
const PROJECTION_NAME_DEFAULT: &str = "default";
const PROJECTION_NAME_MULTIPLY: &str = "multiply";
const PROJECTION_NAME_TILT_PAN_ROLL: &str = "tilt_pan_roll";
const PROJECTION_NAME_DISTANCE_FROM_POINT: &str = "distance_from_point";
const PROJECTION_NAME_PRESET1: &str = "preset1";
const PROJECTION_NAME_RANDOM: &str = "random";
const PROJECTION_NAME_REVERSE: &str = "reverse";
const PROJECTION_NAME_MIRROR: &str = "mirror";
const PROJECTION_NAME_GROUPING: &str = "grouping";
const PROJECTION_NAME_SPACING: &str = "spacing";
const PROJECTION_NAME_TRANSPOSE: &str = "transpose";
const PROJECTION_NAME_KALEIDOSCOPE: &str = "kaleidoscope";
const PROJECTION_NAME_PINWHEEL: &str = "pinwheel";
const PROJECTION_NAME_TEST: &str = "test";

const PROJECTION_ID_NONE: u8 = 0;
const PROJECTION_ID_DEFAULT: u8 = 1;
const PROJECTION_ID_MULTIPLY: u8 = 2;
const PROJECTION_ID_TILT_PAN_ROLL: u8 = 3;
const PROJECTION_ID_DISTANCE_FROM_POINT: u8 = 4;
const PROJECTION_ID_PRESET1: u8 = 5;
const PROJECTION_ID_RANDOM: u8 = 6;
const PROJECTION_ID_REVERSE: u8 = 7;
const PROJECTION_ID_MIRROR: u8 = 8;
const PROJECTION_ID_GROUPING: u8 = 9;
const PROJECTION_ID_SPACING: u8 = 10;
const PROJECTION_ID_TRANSPOSE: u8 = 11;
const PROJECTION_ID_KALEIDOSCOPE: u8 = 12;
const PROJECTION_ID_PINWHEEL: u8 = 13;
const PROJECTION_ID_TEST: u8 = 14;

/// Context for control declaration at configuration time.
pub struct ConfigContext<'a> {
    pub params: &'a mut SegmentParams,
    pub projection_dimension: Dimension,
    pub effect_dimension: Dimension,
}

/// Context passed to the runtime hooks of a projection.
///
/// `size` is the segment's current virtual size; it is `Coord3D::ZERO` until
/// the first size adjustment of a mapping pass assigns it.
pub struct MapContext<'a> {
    pub size: Coord3D,
    pub fix_size: Coord3D,
    pub projection_dimension: Dimension,
    pub effect_dimension: Dimension,
    pub params: &'a mut SegmentParams,
    pub motion: MotionState,
    pub now: Instant,
}

impl MapContext<'_> {
    /// Flat virtual index of a lattice point in the current virtual size.
    ///
    /// Pure arithmetic; the point may lie outside the box, callers compare
    /// or bounds-check the result themselves.
    pub fn flat_index(&self, pos: Coord3D) -> i64 {
        let width = i64::from(self.size.x);
        let height = i64::from(self.size.y);
        i64::from(pos.x) + i64::from(pos.y) * width + i64::from(pos.z) * width * height
    }
}

/// Transform hooks a projection variant may implement.
///
/// Hooks reading parameters must call `begin()` on the store before the
/// first `read`, replaying the declare order of `declare_controls`.
pub trait Projection {
    /// Declare parameters (reset + fixed declare order) and register the
    /// matching controls.
    fn declare_controls(
        &self,
        _ctx: &mut ConfigContext<'_>,
        _registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        Ok(())
    }

    /// Mapping-time adjustment of iteration bounds, current pixel and
    /// center. Runs once per physical pixel per remap, never per frame.
    fn adjust_size_and_pixel(
        &self,
        _ctx: &mut MapContext<'_>,
        _size: &mut Coord3D,
        _pixel: &mut Coord3D,
        _mid: &mut Coord3D,
    ) {
    }

    /// Continuous per-pixel transform applied at render time before index
    /// computation. Must be allocation-free.
    fn adjust_xyz(&self, _ctx: &mut MapContext<'_>, _pixel: &mut Coord3D) {}

    /// Compute the final mapped coordinate from the adjusted pixel, size
    /// and center.
    fn adjust_mapped(
        &self,
        _ctx: &mut MapContext<'_>,
        _mapped: &mut Coord3D,
        _size: Coord3D,
        _pixel: Coord3D,
        _mid: Coord3D,
    ) {
    }

    /// Final correction of the computed virtual index; may invalidate it
    /// with [`INDEX_UNMAPPED`].
    fn post_processing(&self, _ctx: &mut MapContext<'_>, _index_v: &mut u16) {}
}

/// Projection slot - enum containing all possible projections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionSlot {
    /// Identity, no controls
    None,
    /// Identity passthrough used when no transform is selected
    #[default]
    Default,
    /// Tiled repetition with optional mirroring
    Multiply(MultiplyProjection),
    /// Continuous rotation from motion state
    TiltPanRoll(TiltPanRollProjection),
    /// Polar inverse search remapping
    DistanceFromPoint(DistanceFromPointProjection),
    /// Fixed composite of Multiply + TiltPanRoll + DistanceFromPoint
    Preset1(Preset1Projection),
    /// Identity; randomization belongs to the effect layer
    Random,
    /// Per-axis index flip
    Reverse(ReverseProjection),
    /// Per-axis fold about the midpoint
    Mirror(MirrorProjection),
    /// Clusters physical pixels onto one virtual index
    Grouping(GroupingProjection),
    /// Stub
    Spacing,
    /// Axis pair swaps
    Transpose(TransposeProjection),
    /// Stub
    Kaleidoscope,
    /// Polar petal quantization
    Pinwheel(PinwheelProjection),
    /// Stub
    Test,
}

/// Known projection ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ProjectionId {
    None = PROJECTION_ID_NONE,
    Default = PROJECTION_ID_DEFAULT,
    Multiply = PROJECTION_ID_MULTIPLY,
    TiltPanRoll = PROJECTION_ID_TILT_PAN_ROLL,
    DistanceFromPoint = PROJECTION_ID_DISTANCE_FROM_POINT,
    Preset1 = PROJECTION_ID_PRESET1,
    Random = PROJECTION_ID_RANDOM,
    Reverse = PROJECTION_ID_REVERSE,
    Mirror = PROJECTION_ID_MIRROR,
    Grouping = PROJECTION_ID_GROUPING,
    Spacing = PROJECTION_ID_SPACING,
    Transpose = PROJECTION_ID_TRANSPOSE,
    Kaleidoscope = PROJECTION_ID_KALEIDOSCOPE,
    Pinwheel = PROJECTION_ID_PINWHEEL,
    Test = PROJECTION_ID_TEST,
}

impl ProjectionId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PROJECTION_ID_NONE => Self::None,
            PROJECTION_ID_DEFAULT => Self::Default,
            PROJECTION_ID_MULTIPLY => Self::Multiply,
            PROJECTION_ID_TILT_PAN_ROLL => Self::TiltPanRoll,
            PROJECTION_ID_DISTANCE_FROM_POINT => Self::DistanceFromPoint,
            PROJECTION_ID_PRESET1 => Self::Preset1,
            PROJECTION_ID_RANDOM => Self::Random,
            PROJECTION_ID_REVERSE => Self::Reverse,
            PROJECTION_ID_MIRROR => Self::Mirror,
            PROJECTION_ID_GROUPING => Self::Grouping,
            PROJECTION_ID_SPACING => Self::Spacing,
            PROJECTION_ID_TRANSPOSE => Self::Transpose,
            PROJECTION_ID_KALEIDOSCOPE => Self::Kaleidoscope,
            PROJECTION_ID_PINWHEEL => Self::Pinwheel,
            PROJECTION_ID_TEST => Self::Test,
            _ => return None,
        })
    }

    pub fn to_slot(self) -> ProjectionSlot {
        match self {
            Self::None => ProjectionSlot::None,
            Self::Default => ProjectionSlot::Default,
            Self::Multiply => ProjectionSlot::Multiply(MultiplyProjection),
            Self::TiltPanRoll => ProjectionSlot::TiltPanRoll(TiltPanRollProjection),
            Self::DistanceFromPoint => {
                ProjectionSlot::DistanceFromPoint(DistanceFromPointProjection)
            }
            Self::Preset1 => ProjectionSlot::Preset1(Preset1Projection),
            Self::Random => ProjectionSlot::Random,
            Self::Reverse => ProjectionSlot::Reverse(ReverseProjection),
            Self::Mirror => ProjectionSlot::Mirror(MirrorProjection),
            Self::Grouping => ProjectionSlot::Grouping(GroupingProjection),
            Self::Spacing => ProjectionSlot::Spacing,
            Self::Transpose => ProjectionSlot::Transpose(TransposeProjection),
            Self::Kaleidoscope => ProjectionSlot::Kaleidoscope,
            Self::Pinwheel => ProjectionSlot::Pinwheel(PinwheelProjection),
            Self::Test => ProjectionSlot::Test,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => PROJECTION_NAME_NONE,
            Self::Default => PROJECTION_NAME_DEFAULT,
            Self::Multiply => PROJECTION_NAME_MULTIPLY,
            Self::TiltPanRoll => PROJECTION_NAME_TILT_PAN_ROLL,
            Self::DistanceFromPoint => PROJECTION_NAME_DISTANCE_FROM_POINT,
            Self::Preset1 => PROJECTION_NAME_PRESET1,
            Self::Random => PROJECTION_NAME_RANDOM,
            Self::Reverse => PROJECTION_NAME_REVERSE,
            Self::Mirror => PROJECTION_NAME_MIRROR,
            Self::Grouping => PROJECTION_NAME_GROUPING,
            Self::Spacing => PROJECTION_NAME_SPACING,
            Self::Transpose => PROJECTION_NAME_TRANSPOSE,
            Self::Kaleidoscope => PROJECTION_NAME_KALEIDOSCOPE,
            Self::Pinwheel => PROJECTION_NAME_PINWHEEL,
            Self::Test => PROJECTION_NAME_TEST,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PROJECTION_NAME_NONE => Some(Self::None),
            PROJECTION_NAME_DEFAULT => Some(Self::Default),
            PROJECTION_NAME_MULTIPLY => Some(Self::Multiply),
            PROJECTION_NAME_TILT_PAN_ROLL => Some(Self::TiltPanRoll),
            PROJECTION_NAME_DISTANCE_FROM_POINT => Some(Self::DistanceFromPoint),
            PROJECTION_NAME_PRESET1 => Some(Self::Preset1),
            PROJECTION_NAME_RANDOM => Some(Self::Random),
            PROJECTION_NAME_REVERSE => Some(Self::Reverse),
            PROJECTION_NAME_MIRROR => Some(Self::Mirror),
            PROJECTION_NAME_GROUPING => Some(Self::Grouping),
            PROJECTION_NAME_SPACING => Some(Self::Spacing),
            PROJECTION_NAME_TRANSPOSE => Some(Self::Transpose),
            PROJECTION_NAME_KALEIDOSCOPE => Some(Self::Kaleidoscope),
            PROJECTION_NAME_PINWHEEL => Some(Self::Pinwheel),
            PROJECTION_NAME_TEST => Some(Self::Test),
            _ => None,
        }
    }
}

impl ProjectionSlot {
    /// Get the projection ID for external observation
    pub fn id(&self) -> ProjectionId {
        match self {
            Self::None => ProjectionId::None,
            Self::Default => ProjectionId::Default,
            Self::Multiply(_) => ProjectionId::Multiply,
            Self::TiltPanRoll(_) => ProjectionId::TiltPanRoll,
            Self::DistanceFromPoint(_) => ProjectionId::DistanceFromPoint,
            Self::Preset1(_) => ProjectionId::Preset1,
            Self::Random => ProjectionId::Random,
            Self::Reverse(_) => ProjectionId::Reverse,
            Self::Mirror(_) => ProjectionId::Mirror,
            Self::Grouping(_) => ProjectionId::Grouping,
            Self::Spacing => ProjectionId::Spacing,
            Self::Transpose(_) => ProjectionId::Transpose,
            Self::Kaleidoscope => ProjectionId::Kaleidoscope,
            Self::Pinwheel(_) => ProjectionId::Pinwheel,
            Self::Test => ProjectionId::Test,
        }
    }

    /// Declare parameters and controls for the active variant.
    pub fn declare_controls(
        &self,
        ctx: &mut ConfigContext<'_>,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<(), CapacityError> {
        match self {
            Self::Multiply(projection) => projection.declare_controls(ctx, registrar),
            Self::TiltPanRoll(projection) => projection.declare_controls(ctx, registrar),
            Self::DistanceFromPoint(projection) => projection.declare_controls(ctx, registrar),
            Self::Preset1(projection) => projection.declare_controls(ctx, registrar),
            Self::Reverse(projection) => projection.declare_controls(ctx, registrar),
            Self::Mirror(projection) => projection.declare_controls(ctx, registrar),
            Self::Grouping(projection) => projection.declare_controls(ctx, registrar),
            Self::Transpose(projection) => projection.declare_controls(ctx, registrar),
            Self::Pinwheel(projection) => projection.declare_controls(ctx, registrar),
            Self::None | Self::Default | Self::Random | Self::Spacing | Self::Kaleidoscope
            | Self::Test => Ok(()),
        }
    }

    /// Mapping-time size/pixel/center adjustment of the active variant.
    pub fn adjust_size_and_pixel(
        &self,
        ctx: &mut MapContext<'_>,
        size: &mut Coord3D,
        pixel: &mut Coord3D,
        mid: &mut Coord3D,
    ) {
        match self {
            Self::Multiply(projection) => projection.adjust_size_and_pixel(ctx, size, pixel, mid),
            Self::Preset1(projection) => projection.adjust_size_and_pixel(ctx, size, pixel, mid),
            Self::Reverse(projection) => projection.adjust_size_and_pixel(ctx, size, pixel, mid),
            Self::Mirror(projection) => projection.adjust_size_and_pixel(ctx, size, pixel, mid),
            Self::Grouping(projection) => projection.adjust_size_and_pixel(ctx, size, pixel, mid),
            Self::Transpose(projection) => projection.adjust_size_and_pixel(ctx, size, pixel, mid),
            Self::Pinwheel(projection) => projection.adjust_size_and_pixel(ctx, size, pixel, mid),
            _ => {}
        }
    }

    /// Continuous per-pixel adjustment of the active variant.
    pub fn adjust_xyz(&self, ctx: &mut MapContext<'_>, pixel: &mut Coord3D) {
        match self {
            Self::TiltPanRoll(projection) => projection.adjust_xyz(ctx, pixel),
            Self::Preset1(projection) => projection.adjust_xyz(ctx, pixel),
            _ => {}
        }
    }

    /// Mapped-coordinate computation of the active variant.
    pub fn adjust_mapped(
        &self,
        ctx: &mut MapContext<'_>,
        mapped: &mut Coord3D,
        size: Coord3D,
        pixel: Coord3D,
        mid: Coord3D,
    ) {
        match self {
            Self::Pinwheel(projection) => projection.adjust_mapped(ctx, mapped, size, pixel, mid),
            _ => {}
        }
    }

    /// Index post-processing of the active variant.
    pub fn post_processing(&self, ctx: &mut MapContext<'_>, index_v: &mut u16) {
        match self {
            Self::DistanceFromPoint(projection) => projection.post_processing(ctx, index_v),
            _ => {}
        }
    }
}
