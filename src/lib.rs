#![no_std]

pub mod channel;
pub mod controls;
pub mod coord;
pub mod engine;
pub mod intent;
pub mod mapper;
pub mod params;
pub mod projection;
pub mod segment;
pub mod trig;

pub use channel::{IntentChannel, IntentOverflow, IntentReceiver, IntentSender};
pub use controls::{
    Control, ControlEvent, ControlKind, ControlRegistrar, ControlSet, ControlTarget,
};
pub use coord::{Coord3D, Dimension};
pub use engine::ProjectionEngine;
pub use intent::{ParamBytes, ProjectionIntent};
pub use mapper::RasterLayout;
pub use params::{
    CapacityError, PARAM_STORE_CAPACITY, ParamSlot, ParamValue, ParameterStore, SegmentParams,
    SlotRef,
};
pub use projection::{
    ConfigContext, INDEX_UNMAPPED, MapContext, Projection, ProjectionId, ProjectionSlot,
};
pub use segment::{MotionState, REMAP_INTERVAL, Segment, SegmentConfig};

pub use embassy_time::{Duration, Instant};

/// Color type routed through the mapping tables.
pub type Rgb = smart_leds::RGB8;

/// Physical fixture description
///
/// Implement this trait to describe how a fixture's coordinates map to LED
/// driver indices. The engine only reads it during a remap.
pub trait FixtureLayout {
    /// Physical extents of the fixture.
    fn size(&self) -> Coord3D;

    /// Driver index at a physical coordinate, `None` for holes in the
    /// fixture.
    fn index(&self, pos: Coord3D) -> Option<u16>;
}
