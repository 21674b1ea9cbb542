//! Tee: one upstream, `n` independent consumers.
//!
//! The group owns the upstream exclusively. Elements pulled from it are kept
//! in a shared ring buffer until the slowest live consumer has seen them:
//!
//! - `init` counts elements already evicted from the front, so the buffer
//!   holds logical positions `[init, init + buffer.len())`;
//! - each consumer has a cursor (elements already yielded to it), and
//!   `min(live cursors) >= init` always holds;
//! - the upstream is only pulled by a consumer standing at the frontier
//!   (`cursor == init + buffer.len()`), and `finished` is sticky once it ends.
//!
//! A consumer that is kept alive but never driven pins `init` at its position,
//! so the retained window grows with the lead of the other consumers. Dropping
//! a consumer detaches it and releases what only it was holding back.

#[cfg(feature = "async")]
pub(crate) mod waker;

use std::cell::RefCell;
use std::rc::Rc;

use lazyseq_core::config::BufferConfig;
use lazyseq_core::step::{Pull, Step};
use lazyseq_mem::{PeakTracker, RingBuffer};

use crate::traits::fatal;

/// Group state shared by every consumer of one tee.
pub(crate) struct TeeShared<S, T> {
    pub(crate) source: S,
    buffer: RingBuffer<T>,
    init: usize,
    finished: bool,
    /// `None` once the consumer has been dropped.
    cursors: Vec<Option<usize>>,
    peak: PeakTracker,
}

impl<S, T> TeeShared<S, T> {
    pub(crate) fn new(source: S, n: usize, cfg: BufferConfig) -> Self {
        Self {
            source,
            buffer: RingBuffer::with_config(cfg),
            init: 0,
            finished: false,
            cursors: vec![Some(0); n],
            peak: PeakTracker::new(),
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    fn frontier(&self) -> usize {
        self.init + self.buffer.len()
    }

    /// Drop everything no live consumer can reach any more.
    fn evict(&mut self) {
        let Some(min) = self.cursors.iter().flatten().copied().min() else {
            // nobody left to read
            self.init = self.frontier();
            self.buffer.clear();
            self.peak.record(0);
            return;
        };
        let mut evicted = 0usize;
        while !self.buffer.is_empty() && min > self.init {
            if let Err(e) = self.buffer.pop_start() {
                fatal("tee", e);
            }
            self.init += 1;
            evicted += 1;
        }
        if evicted > 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(evicted, init = self.init, "tee evicted");
            self.peak.record(self.buffer.len());
        }
    }

    pub(crate) fn detach(&mut self, k: usize) {
        if self.cursors[k].take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(consumer = k, "tee consumer detached");
            self.evict();
        }
    }

    pub(crate) fn position(&self, k: usize) -> usize {
        self.cursors[k].unwrap_or(self.init)
    }

    pub(crate) fn retained(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) fn peak_retained(&self) -> usize {
        self.peak.peak()
    }

    pub(crate) fn live_consumers(&self) -> usize {
        self.cursors.iter().flatten().count()
    }
}

impl<S, T: Clone> TeeShared<S, T> {
    /// Serve consumer `k` from the retained window, if its next element is
    /// already buffered.
    pub(crate) fn take_retained(&mut self, k: usize) -> Option<T> {
        let pos = self.cursors[k]?;
        if pos >= self.frontier() {
            return None;
        }
        let value = match self.buffer.get(pos - self.init) {
            Ok(v) => v.clone(),
            Err(e) => fatal("tee", e),
        };
        self.cursors[k] = Some(pos + 1);
        self.evict();
        Some(value)
    }

    /// Record the result of a frontier pull made on behalf of consumer `k`.
    pub(crate) fn accept(&mut self, k: usize, step: Step<T>) -> Option<T> {
        let value = match step {
            Step::Value(v) => v,
            Step::End => {
                #[cfg(feature = "tracing")]
                tracing::debug!(pulled = self.frontier(), "tee source exhausted");
                self.finished = true;
                return None;
            }
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(consumer = k, position = self.frontier(), "tee frontier pull");
        self.buffer.push_end(value.clone());
        self.cursors[k] = Some(self.frontier());
        self.peak.record(self.buffer.len());
        self.evict();
        Some(value)
    }
}

/// Split `source` into `n` consumers with the default buffer configuration.
pub fn tee<S>(source: S, n: usize) -> Vec<TeeConsumer<S>>
where
    S: Pull,
    S::Item: Clone,
{
    tee_with_config(source, n, BufferConfig::default())
}

/// Split `source` into `n` consumers. `n == 0` returns an empty `Vec` and
/// drops the source without allocating.
pub fn tee_with_config<S>(source: S, n: usize, cfg: BufferConfig) -> Vec<TeeConsumer<S>>
where
    S: Pull,
    S::Item: Clone,
{
    if n == 0 {
        return Vec::new();
    }
    let shared = Rc::new(RefCell::new(TeeShared::new(source, n, cfg)));
    (0..n)
        .map(|index| TeeConsumer {
            shared: Rc::clone(&shared),
            index,
        })
        .collect()
}

/// One consumer of a tee group. Driving it never blocks on its siblings; it
/// may pull the shared upstream when it is the furthest ahead.
pub struct TeeConsumer<S: Pull> {
    shared: Rc<RefCell<TeeShared<S, S::Item>>>,
    index: usize,
}

impl<S: Pull> TeeConsumer<S> {
    /// Elements already yielded to this consumer.
    pub fn position(&self) -> usize {
        self.shared.borrow().position(self.index)
    }

    /// Elements currently held for the slowest live consumer.
    pub fn retained(&self) -> usize {
        self.shared.borrow().retained()
    }

    /// Largest retained window the group has needed so far.
    pub fn peak_retained(&self) -> usize {
        self.shared.borrow().peak_retained()
    }

    pub fn live_consumers(&self) -> usize {
        self.shared.borrow().live_consumers()
    }
}

impl<S> Iterator for TeeConsumer<S>
where
    S: Pull,
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let mut shared = self.shared.borrow_mut();
        if let Some(v) = shared.take_retained(self.index) {
            return Some(v);
        }
        if shared.is_finished() {
            return None;
        }
        let step = shared.source.pull();
        shared.accept(self.index, step)
    }
}

impl<S: Pull> Drop for TeeConsumer<S> {
    fn drop(&mut self) {
        // Dropped from inside an upstream pull of this very group: leave the
        // cursor pinned rather than panic in drop.
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.detach(self.index);
        }
    }
}
