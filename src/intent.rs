//! Intent processing module
//!
//! Control changes from the UI collaborator arrive as intents over the
//! bounded channel. The processor drains them into segment mutations,
//! bounds-checking the row index first: controls can fire for rows that do
//! not exist yet, and such intents must be dropped, not faulted on.

use crate::channel::IntentReceiver;
use crate::controls::ControlRegistrar;
use crate::coord::Coord3D;
use crate::params::{ParamValue, SlotRef};
use crate::projection::ProjectionId;
use crate::segment::Segment;

/// Largest parameter payload (one `Coord3D`).
const MAX_PARAM_BYTES: usize = 12;

/// Encoded parameter value carried by a [`ProjectionIntent::SetParam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamBytes {
    bytes: [u8; MAX_PARAM_BYTES],
    len: u8,
}

impl ParamBytes {
    /// Encode a parameter value for transport.
    #[allow(clippy::cast_possible_truncation)]
    pub fn of<T: ParamValue>(value: T) -> Self {
        let mut bytes = [0; MAX_PARAM_BYTES];
        value.store(&mut bytes[..T::SIZE]);
        Self {
            bytes,
            len: T::SIZE as u8,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

/// Requested change to one segment's projection state.
///
/// `row` selects the segment instance; out-of-range rows are ignored.
#[derive(Debug, Clone, Copy)]
pub enum ProjectionIntent {
    /// Activate a different projection (resets its parameter store).
    SelectProjection { row: u8, id: ProjectionId },
    /// Write one declared parameter and schedule a remap.
    SetParam {
        row: u8,
        slot: SlotRef,
        value: ParamBytes,
    },
    /// Set the tilt rotation speed (no remap; the rotation is continuous).
    SetTiltSpeed { row: u8, value: u8 },
    /// Set the pan rotation speed.
    SetPanSpeed { row: u8, value: u8 },
    /// Set the roll rotation speed.
    SetRollSpeed { row: u8, value: u8 },
    /// Install or clear an orientation sensor snapshot.
    SetOrientation {
        row: u8,
        orientation: Option<Coord3D>,
    },
    /// Schedule a remap without changing anything else.
    TriggerMapping { row: u8 },
}

impl ProjectionIntent {
    const fn row(self) -> u8 {
        match self {
            Self::SelectProjection { row, .. }
            | Self::SetParam { row, .. }
            | Self::SetTiltSpeed { row, .. }
            | Self::SetPanSpeed { row, .. }
            | Self::SetRollSpeed { row, .. }
            | Self::SetOrientation { row, .. }
            | Self::TriggerMapping { row } => row,
        }
    }
}

/// Drains pending intents into the segment arena.
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Apply all pending intents (non-blocking).
    ///
    /// Returns the number of intents applied; intents naming a row outside
    /// the arena are dropped.
    pub fn process_pending<const MAX_LEDS: usize, const MAX_SEGMENTS: usize>(
        &mut self,
        segments: &mut heapless::Vec<Segment<MAX_LEDS>, MAX_SEGMENTS>,
        registrar: &mut dyn ControlRegistrar,
    ) -> usize {
        let mut applied = 0;
        while let Some(intent) = self.intents.take() {
            let Some(segment) = segments.get_mut(usize::from(intent.row())) else {
                continue;
            };
            match intent {
                ProjectionIntent::SelectProjection { id, .. } => {
                    // A capacity error falls back to the identity
                    // projection inside select_projection.
                    let _ = segment.select_projection(id, registrar);
                }
                ProjectionIntent::SetParam { slot, value, .. } => {
                    if segment.write_param(slot, value.as_slice()) {
                        segment.trigger_mapping();
                    }
                }
                ProjectionIntent::SetTiltSpeed { value, .. } => {
                    segment.motion_mut().tilt_speed = value;
                }
                ProjectionIntent::SetPanSpeed { value, .. } => {
                    segment.motion_mut().pan_speed = value;
                }
                ProjectionIntent::SetRollSpeed { value, .. } => {
                    segment.motion_mut().roll_speed = value;
                }
                ProjectionIntent::SetOrientation { orientation, .. } => {
                    segment.motion_mut().gyro = orientation;
                }
                ProjectionIntent::TriggerMapping { .. } => {
                    segment.trigger_mapping();
                }
            }
            applied += 1;
        }
        applied
    }
}
