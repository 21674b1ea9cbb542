//! Fan-out waker for tee streams.
//!
//! An upstream stream only remembers the waker of whoever polled it last,
//! but several tee consumers may be parked on the same pending pull. The
//! upstream is therefore polled with a waker that wakes every parked
//! consumer, and a consumer that pulls a value wakes the others so they can
//! pick it up from the retained window.

use std::sync::{Arc, Mutex, MutexGuard};
use std::task::Waker;

use futures::task::ArcWake;

pub(crate) struct WakerSet {
    slots: Mutex<Vec<Option<Waker>>>,
}

impl WakerSet {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            slots: Mutex::new(vec![None; n]),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Option<Waker>>> {
        // a panicking waker cannot leave the slots inconsistent
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Park consumer `k` until the frontier moves.
    pub(crate) fn register(&self, k: usize, waker: &Waker) {
        let mut slots = self.lock();
        let slot = &mut slots[k];
        if !slot.as_ref().is_some_and(|w| w.will_wake(waker)) {
            *slot = Some(waker.clone());
        }
    }

    pub(crate) fn unregister(&self, k: usize) {
        self.lock()[k] = None;
    }

    pub(crate) fn wake_all(&self) {
        let parked: Vec<Waker> = self.lock().iter_mut().filter_map(Option::take).collect();
        for waker in parked {
            waker.wake();
        }
    }

    #[cfg(test)]
    pub(crate) fn parked(&self) -> usize {
        self.lock().iter().flatten().count()
    }
}

impl ArcWake for WakerSet {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.wake_all();
    }
}
