//! Growable, shrinkable double-ended ring buffer.
//!
//! Layout: `storage` is treated as circular. The logical window starts at
//! `start` and holds `len` elements; `end` is the slot one past the last
//! element (all indices mod capacity). `len` is tracked explicitly because
//! `start == end` is ambiguous between empty and full.
//!
//! Resize policy:
//! - before any push, if `len >= cap - 1`, reallocate to `cap * 2`;
//! - after a pop (when `shrink_on_pop` is set), if `len * 4 <= cap`, reallocate
//!   to `cap / 2`, never below the configured minimum.
//!
//! Both copy the logical contents to the front of a fresh allocation
//! (`start = 0`, `end = len`), which is O(n) but amortizes to O(1) per
//! push/pop because capacity changes geometrically.

use std::fmt;
use std::iter::FusedIterator;

use lazyseq_core::config::{BufferConfig, MIN_USABLE_CAPACITY};

use crate::error::{Error, Result};

pub struct RingBuffer<T> {
    storage: Vec<Option<T>>,
    start: usize,
    end: usize,
    len: usize,
    cfg: BufferConfig,
}

fn alloc<T>(cap: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(cap).collect()
}

impl<T> RingBuffer<T> {
    /// Empty buffer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Empty buffer. A `min_capacity` below 2 is clamped to 2.
    pub fn with_config(cfg: BufferConfig) -> Self {
        let cap = cfg.capacity_for(0);
        Self {
            storage: alloc(cap),
            start: 0,
            end: 0,
            len: 0,
            cfg,
        }
    }

    /// Buffer pre-seeded from a finite input, front to back.
    pub fn from_iter_with_config<I>(iter: I, cfg: BufferConfig) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = iter.into_iter().collect();
        let len = items.len();
        let cap = cfg.capacity_for(len);
        let storage = items
            .into_iter()
            .map(Some)
            .chain(std::iter::repeat_with(|| None))
            .take(cap)
            .collect();
        Self {
            storage,
            start: 0,
            end: len,
            len,
            cfg,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current backing capacity (number of slots, one always kept free).
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn config(&self) -> &BufferConfig {
        &self.cfg
    }

    #[inline]
    fn slot(&self, index: usize) -> usize {
        (self.start + index) % self.storage.len()
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        let slot = self.slot(index);
        self.storage[slot]
            .as_ref()
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        let err = self.out_of_range(index);
        let slot = self.slot(index);
        self.storage[slot].as_mut().ok_or(err)
    }

    /// Overwrite the element at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        let err = self.out_of_range(index);
        let slot = self.slot(index);
        self.storage[slot].replace(value).ok_or(err)
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i).ok())
    }

    pub fn push_end(&mut self, value: T) {
        self.grow_if_needed();
        let end = self.end;
        self.storage[end] = Some(value);
        self.end = (end + 1) % self.storage.len();
        self.len += 1;
    }

    pub fn push_start(&mut self, value: T) {
        self.grow_if_needed();
        let cap = self.storage.len();
        self.start = (self.start + cap - 1) % cap;
        let start = self.start;
        self.storage[start] = Some(value);
        self.len += 1;
    }

    pub fn pop_start(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyCollection);
        }
        let value = self.storage[self.start].take();
        self.start = (self.start + 1) % self.storage.len();
        self.len -= 1;
        self.shrink_if_needed();
        value.ok_or(Error::EmptyCollection)
    }

    pub fn pop_end(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyCollection);
        }
        let cap = self.storage.len();
        self.end = (self.end + cap - 1) % cap;
        let value = self.storage[self.end].take();
        self.len -= 1;
        self.shrink_if_needed();
        value.ok_or(Error::EmptyCollection)
    }

    /// Drop every element and return to the minimum capacity.
    pub fn clear(&mut self) {
        self.storage = alloc(self.cfg.capacity_for(0));
        self.start = 0;
        self.end = 0;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            storage: &self.storage,
            start: self.start,
            front: 0,
            back: self.len,
        }
    }

    /// The logical contents as at most two contiguous runs of slots.
    fn as_slices(&self) -> (&[Option<T>], &[Option<T>]) {
        let cap = self.storage.len();
        if self.len == 0 {
            (&[], &[])
        } else if self.start + self.len <= cap {
            (&self.storage[self.start..self.start + self.len], &[])
        } else {
            (&self.storage[self.start..], &self.storage[..self.end])
        }
    }

    /// Consume the buffer, returning its contents front to back.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        let cap = self.storage.len();
        for i in 0..self.len {
            if let Some(v) = self.storage[(self.start + i) % cap].take() {
                out.push(v);
            }
        }
        out
    }

    fn grow_if_needed(&mut self) {
        let cap = self.storage.len();
        if self.len >= cap - 1 {
            self.resize(cap * 2);
        }
    }

    fn shrink_if_needed(&mut self) {
        if !self.cfg.shrink_on_pop {
            return;
        }
        let cap = self.storage.len();
        let floor = self.cfg.min_capacity.max(MIN_USABLE_CAPACITY);
        if self.len * 4 <= cap && cap / 2 >= floor {
            self.resize(cap / 2);
        }
    }

    fn resize(&mut self, new_cap: usize) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            from = self.storage.len(),
            to = new_cap,
            len = self.len,
            "ring buffer resize"
        );
        let cap = self.storage.len();
        let mut next = alloc(new_cap);
        for (i, slot) in next.iter_mut().take(self.len).enumerate() {
            *slot = self.storage[(self.start + i) % cap].take();
        }
        self.storage = next;
        self.start = 0;
        self.end = self.len;
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Contiguous snapshot of the contents, front to back.
    pub fn to_vec(&self) -> Vec<T> {
        let (head, tail) = self.as_slices();
        let mut out = Vec::with_capacity(self.len);
        out.extend(head.iter().flatten().cloned());
        out.extend(tail.iter().flatten().cloned());
        out
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            start: self.start,
            end: self.end,
            len: self.len,
            cfg: self.cfg.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with_config(iter, BufferConfig::default())
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_end(v);
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back borrow of a `RingBuffer`. The buffer cannot be mutated
/// while this is alive.
pub struct Iter<'a, T> {
    storage: &'a [Option<T>],
    start: usize,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let idx = (self.start + self.front) % self.storage.len();
        self.front += 1;
        self.storage[idx].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let idx = (self.start + self.back) % self.storage.len();
        self.storage[idx].as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
