//! Fixed-size sliding windows over an upstream.
//!
//! The ring buffer is used as a rolling cache of the last `size` elements.
//! A window is emitted once the cache is primed and then after every
//! `interval` further elements; an upstream that ends mid-advance produces
//! no partial window.

use lazyseq_core::config::BufferConfig;
use lazyseq_core::step::{Pull, Step};
use lazyseq_mem::RingBuffer;

use crate::traits::{fatal, OpError};

/// Window state shared by the iterator and stream variants.
pub(crate) struct WindowCore<T> {
    buffer: RingBuffer<T>,
    size: usize,
    interval: usize,
    /// Elements still to take before the next window is due.
    pending: usize,
    done: bool,
}

impl<T: Clone> WindowCore<T> {
    pub(crate) fn new(size: usize, interval: usize, cfg: BufferConfig) -> Result<Self, OpError> {
        if size == 0 {
            return Err(OpError::InvalidArgument("window size must be >= 1".into()));
        }
        if interval == 0 {
            return Err(OpError::InvalidArgument(
                "window interval must be >= 1".into(),
            ));
        }
        cfg.validate()?;
        Ok(Self {
            buffer: RingBuffer::with_config(cfg),
            size,
            interval,
            pending: size,
            done: false,
        })
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one upstream step; returns a window when one is due.
    pub(crate) fn offer(&mut self, step: Step<T>) -> Option<Vec<T>> {
        let value = match step {
            Step::Value(v) => v,
            Step::End => {
                self.done = true;
                self.buffer.clear();
                return None;
            }
        };
        if self.buffer.len() == self.size {
            if let Err(e) = self.buffer.pop_start() {
                fatal("windows", e);
            }
        }
        self.buffer.push_end(value);
        self.pending -= 1;
        if self.pending == 0 {
            self.pending = self.interval;
            Some(self.buffer.to_vec())
        } else {
            None
        }
    }
}

/// Iterator of `Vec` snapshots, each `size` long.
pub struct WindowEmitter<S: Pull> {
    source: S,
    core: WindowCore<S::Item>,
}

impl<S> WindowEmitter<S>
where
    S: Pull,
    S::Item: Clone,
{
    pub fn new(source: S, size: usize, interval: usize) -> Result<Self, OpError> {
        Self::with_config(source, size, interval, BufferConfig::default())
    }

    pub fn with_config(
        source: S,
        size: usize,
        interval: usize,
        cfg: BufferConfig,
    ) -> Result<Self, OpError> {
        Ok(Self {
            source,
            core: WindowCore::new(size, interval, cfg)?,
        })
    }
}

impl<S> Iterator for WindowEmitter<S>
where
    S: Pull,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.core.is_done() {
            if let Some(window) = self.core.offer(self.source.pull()) {
                return Some(window);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::BufferedExt;

    #[test]
    fn unit_interval() {
        let out: Vec<_> = vec![1, 2, 3, 4, 5].into_iter().windows(3, 1).unwrap().collect();
        assert_eq!(out, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
    }

    #[test]
    fn interval_two() {
        let out: Vec<_> = (1..=7).windows(3, 2).unwrap().collect();
        assert_eq!(out, vec![vec![1, 2, 3], vec![3, 4, 5], vec![5, 6, 7]]);
    }

    #[test]
    fn no_partial_window_at_end() {
        let out: Vec<_> = (1..=6).windows(3, 2).unwrap().collect();
        assert_eq!(out, vec![vec![1, 2, 3], vec![3, 4, 5]]);
    }

    #[test]
    fn short_source_emits_nothing() {
        assert_eq!((1..=2).windows(3, 1).unwrap().count(), 0);
        assert_eq!(std::iter::empty::<u8>().windows(1, 1).unwrap().count(), 0);
    }

    #[test]
    fn interval_larger_than_size_skips_elements() {
        let out: Vec<_> = (1..=10).windows(2, 4).unwrap().collect();
        assert_eq!(out, vec![vec![1, 2], vec![5, 6], vec![9, 10]]);
    }

    #[test]
    fn zero_arguments_are_rejected() {
        assert!(matches!(
            (1..3).windows(0, 1),
            Err(OpError::InvalidArgument(_))
        ));
        assert!(matches!(
            (1..3).windows(1, 0),
            Err(OpError::InvalidArgument(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = BufferConfig {
            min_capacity: 0,
            ..BufferConfig::default()
        };
        assert!(matches!(
            WindowEmitter::with_config(1..3, 1, 1, cfg),
            Err(OpError::Core(_))
        ));
    }

    #[test]
    fn stays_lazy_on_infinite_source() {
        let mut pulled = 0;
        let src = std::iter::from_fn(|| {
            pulled += 1;
            Some(pulled)
        });
        let first: Vec<_> = src.windows(4, 1).unwrap().take(2).collect();
        assert_eq!(first, vec![vec![1, 2, 3, 4], vec![2, 3, 4, 5]]);
    }

    #[test]
    fn large_windows_cross_resizes() {
        let out: Vec<_> = (0..200).windows(100, 50).unwrap().collect();
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], (100..200).collect::<Vec<_>>());
    }
}
