//! Drop the last `n` elements of an upstream in one pass.
//!
//! The ring buffer is a FIFO delay line of length `n`: every element is
//! emitted only once `n` newer elements have been seen, so whatever is still
//! buffered when the upstream ends is exactly the tail being dropped. Memory
//! is O(n) regardless of upstream length.

use lazyseq_core::config::BufferConfig;
use lazyseq_core::step::{Pull, Step};
use lazyseq_mem::RingBuffer;

use crate::traits::fatal;

/// Delay-line state shared by the iterator and stream variants.
pub(crate) struct TailCore<T> {
    /// `None` when `n == 0`: plain passthrough, nothing allocated.
    buffer: Option<RingBuffer<T>>,
    n: usize,
    done: bool,
}

impl<T> TailCore<T> {
    pub(crate) fn new(n: usize, cfg: BufferConfig) -> Self {
        Self {
            buffer: (n > 0).then(|| RingBuffer::with_config(cfg)),
            n,
            done: false,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one upstream step; returns the element leaving the delay line.
    pub(crate) fn offer(&mut self, step: Step<T>) -> Option<T> {
        let value = match step {
            Step::Value(v) => v,
            Step::End => {
                self.done = true;
                // the buffered tail is never emitted
                self.buffer = None;
                return None;
            }
        };
        let Some(buffer) = self.buffer.as_mut() else {
            return Some(value);
        };
        if buffer.len() < self.n {
            buffer.push_end(value);
            return None;
        }
        let oldest = match buffer.pop_start() {
            Ok(v) => v,
            Err(e) => fatal("drop_end", e),
        };
        buffer.push_end(value);
        Some(oldest)
    }
}

/// Iterator over the upstream minus its last `n` elements.
pub struct TailDropper<S: Pull> {
    source: S,
    core: TailCore<S::Item>,
}

impl<S: Pull> TailDropper<S> {
    pub fn new(source: S, n: usize) -> Self {
        Self::with_config(source, n, BufferConfig::default())
    }

    pub fn with_config(source: S, n: usize, cfg: BufferConfig) -> Self {
        Self {
            source,
            core: TailCore::new(n, cfg),
        }
    }
}

impl<S: Pull> Iterator for TailDropper<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        while !self.core.is_done() {
            if let Some(v) = self.core.offer(self.source.pull()) {
                return Some(v);
            }
        }
        None
    }
}
