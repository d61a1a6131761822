//! Projection engine - the segment arena and intent drain
//!
//! Owns every segment of a fixture behind stable row indices and services
//! the intent channel plus the debounced remaps in one `maintain` call per
//! main-loop iteration.

use embassy_time::Instant;

use crate::FixtureLayout;
use crate::channel::IntentReceiver;
use crate::controls::ControlRegistrar;
use crate::intent::IntentProcessor;
use crate::params::CapacityError;
use crate::segment::{Segment, SegmentConfig};

/// Segment arena plus intent processing.
///
/// Rows are stable: a segment keeps its row index for the lifetime of the
/// engine, so control bindings and intents can address it safely.
pub struct ProjectionEngine<
    'a,
    const MAX_LEDS: usize,
    const MAX_SEGMENTS: usize,
    const INTENT_CHANNEL_SIZE: usize,
> {
    intent_processor: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
    segments: heapless::Vec<Segment<MAX_LEDS>, MAX_SEGMENTS>,
}

impl<'a, const MAX_LEDS: usize, const MAX_SEGMENTS: usize, const INTENT_CHANNEL_SIZE: usize>
    ProjectionEngine<'a, MAX_LEDS, MAX_SEGMENTS, INTENT_CHANNEL_SIZE>
{
    pub fn new(intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>) -> Self {
        Self {
            intent_processor: IntentProcessor::new(intents),
            segments: heapless::Vec::new(),
        }
    }

    /// Add a segment; returns its row index.
    pub fn add_segment(
        &mut self,
        config: &SegmentConfig,
        registrar: &mut dyn ControlRegistrar,
    ) -> Result<usize, CapacityError> {
        if self.segments.is_full() {
            return Err(CapacityError {
                requested: self.segments.len() + 1,
                capacity: MAX_SEGMENTS,
            });
        }
        let segment = Segment::new(config, registrar)?;
        let row = self.segments.len();
        let _ = self.segments.push(segment);
        Ok(row)
    }

    /// Drain pending intents, then service debounced remaps.
    ///
    /// Call once per main-loop iteration; returns the number of segments
    /// that remapped.
    pub fn maintain(
        &mut self,
        now: Instant,
        layout: &dyn FixtureLayout,
        registrar: &mut dyn ControlRegistrar,
    ) -> usize {
        self.intent_processor
            .process_pending(&mut self.segments, registrar);

        let mut remapped = 0;
        for segment in &mut self.segments {
            if segment.maintain(now, layout) {
                remapped += 1;
            }
        }
        remapped
    }

    pub fn segment(&self, row: usize) -> Option<&Segment<MAX_LEDS>> {
        self.segments.get(row)
    }

    pub fn segment_mut(&mut self, row: usize) -> Option<&mut Segment<MAX_LEDS>> {
        self.segments.get_mut(row)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
