//! Bounded intent channel for `no_std` environments.
//!
//! Carries [`ProjectionIntent`] values from the UI/control side into the
//! engine. Built on `critical-section` and `heapless::Deque`, so posting is
//! safe from interrupt context on a bare-metal target.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::intent::ProjectionIntent;

/// Error returned when posting to a full channel; carries the rejected
/// intent back to the caller.
#[derive(Debug, Clone, Copy)]
pub struct IntentOverflow(pub ProjectionIntent);

/// Bounded, interrupt-safe queue of projection intents.
pub struct IntentChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<ProjectionIntent, SIZE>>>,
}

impl<const SIZE: usize> IntentChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle; multiple senders may share the channel.
    pub const fn sender(&self) -> IntentSender<'_, SIZE> {
        IntentSender { channel: self }
    }

    /// Get a receiver handle; the engine owns the single draining receiver.
    pub const fn receiver(&self) -> IntentReceiver<'_, SIZE> {
        IntentReceiver { channel: self }
    }

    fn post(&self, intent: ProjectionIntent) -> Result<(), IntentOverflow> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(intent).map_err(IntentOverflow)
        })
    }

    fn take(&self) -> Option<ProjectionIntent> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front()
        })
    }
}

impl<const SIZE: usize> Default for IntentChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting handle for an [`IntentChannel`].
#[derive(Clone, Copy)]
pub struct IntentSender<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentSender<'_, SIZE> {
    /// Post an intent; returns it in [`IntentOverflow`] when the queue is
    /// full.
    pub fn post(&self, intent: ProjectionIntent) -> Result<(), IntentOverflow> {
        self.channel.post(intent)
    }
}

/// Draining handle for an [`IntentChannel`].
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentReceiver<'_, SIZE> {
    /// Take the oldest pending intent, if any.
    pub fn take(&self) -> Option<ProjectionIntent> {
        self.channel.take()
    }
}
