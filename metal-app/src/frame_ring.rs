//! Rotates per-frame GPU resources so the CPU can fill one slot while the GPU still reads others.
//!
//! A counting gate starts at the number of slots. `begin_frame` takes one unit and hands back a
//! [`FrameTicket`] that gives it back, normally from the command buffer's completion handler. A
//! slot is therefore only rewritten after the frame that last used it has finished on the GPU.
use crate::AppError;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

pub const MAX_FRAMES_IN_FLIGHT: usize = 3;

pub trait FrameGate: Clone + Send + Sync + 'static {
    fn with_capacity(capacity: u32) -> Self;

    /// Takes a frame if one is free, without blocking.
    fn try_acquire(&self) -> bool;

    fn acquire_blocking(&self);

    fn release(&self);

    /// Blocks until a frame may be encoded.
    fn acquire(&self) {
        if !self.try_acquire() {
            log::trace!("All frames in flight, waiting for the GPU");
            self.acquire_blocking();
        }
    }
}

/// Portable counting semaphore.
#[derive(Clone)]
pub struct CountingGate {
    state: Arc<(Mutex<u32>, Condvar)>,
}

impl CountingGate {
    pub fn available(&self) -> u32 {
        *self.state.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameGate for CountingGate {
    fn with_capacity(capacity: u32) -> Self {
        Self {
            state: Arc::new((Mutex::new(capacity), Condvar::new())),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut available = self.state.0.lock().unwrap_or_else(PoisonError::into_inner);
        let free = *available > 0;
        if free {
            *available -= 1;
        }
        free
    }

    fn acquire_blocking(&self) {
        let (lock, cvar) = &*self.state;
        let mut available = lock.lock().unwrap_or_else(PoisonError::into_inner);
        while *available == 0 {
            available = cvar.wait(available).unwrap_or_else(PoisonError::into_inner);
        }
        *available -= 1;
    }

    fn release(&self) {
        let (lock, cvar) = &*self.state;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        cvar.notify_one();
    }
}

/// Gate backed by a libdispatch semaphore, signalled from Metal's completion handlers.
#[cfg(target_os = "macos")]
pub type DispatchGate = dispatch::Semaphore;

#[cfg(target_os = "macos")]
impl FrameGate for DispatchGate {
    fn with_capacity(capacity: u32) -> Self {
        dispatch::Semaphore::new(capacity as _)
    }

    #[inline]
    fn try_acquire(&self) -> bool {
        self.wait_timeout(std::time::Duration::ZERO).is_ok()
    }

    #[inline]
    fn acquire_blocking(&self) {
        self.wait();
    }

    #[inline]
    fn release(&self) {
        self.signal();
    }
}

/// Releases its frame exactly once: explicitly, or on drop.
pub struct FrameTicket<G: FrameGate> {
    gate: Option<G>,
}

impl<G: FrameGate> FrameTicket<G> {
    #[inline]
    pub fn release(&mut self) {
        if let Some(gate) = self.gate.take() {
            gate.release();
        }
    }

    /// Wraps the ticket for a completion callback that may be invoked through a shared reference.
    pub fn into_completion_handler(self) -> impl Fn() + Send + Sync + 'static {
        let ticket = Mutex::new(self);
        move || ticket.lock().unwrap_or_else(PoisonError::into_inner).release()
    }
}

impl<G: FrameGate> Drop for FrameTicket<G> {
    fn drop(&mut self) {
        self.release();
    }
}

pub struct InFlightFrame<'a, T, G: FrameGate> {
    pub index: usize,
    pub slot: &'a mut T,
    pub ticket: FrameTicket<G>,
}

pub struct FrameRing<T, G: FrameGate = CountingGate> {
    slots: Vec<T>,
    current: usize,
    gate: G,
}

impl<T, G: FrameGate> FrameRing<T, G> {
    pub fn new(slots: Vec<T>) -> Result<Self, AppError> {
        if slots.is_empty() || slots.len() > MAX_FRAMES_IN_FLIGHT {
            return Err(AppError::InvalidFrameRing {
                max: MAX_FRAMES_IN_FLIGHT,
                actual: slots.len(),
            });
        }
        Ok(Self {
            gate: G::with_capacity(slots.len() as _),
            slots,
            current: 0,
        })
    }

    pub fn try_from_fn(
        len: usize,
        create_slot: impl FnMut(usize) -> Result<T, AppError>,
    ) -> Result<Self, AppError> {
        Self::new((0..len).map(create_slot).collect::<Result<Vec<_>, _>>()?)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// Moves to the next slot and blocks until the GPU has released a frame.
    pub fn begin_frame(&mut self) -> InFlightFrame<'_, T, G> {
        self.current = (self.current + 1) % self.slots.len();
        self.gate.acquire();
        InFlightFrame {
            index: self.current,
            slot: &mut self.slots[self.current],
            ticket: FrameTicket {
                gate: Some(self.gate.clone()),
            },
        }
    }
}
