#![forbid(unsafe_code)]
//! lazyseq-mem: the buffering primitive shared by every buffered operator.
//!
//! `RingBuffer` is an amortized O(1) double-ended circular buffer whose
//! backing storage doubles when it fills and halves when it drains, so
//! long-lived windows and tee groups give memory back. `PeakTracker` records
//! how large a retained window ever got.
//!
//! Nothing here is thread-safe; callers pull cooperatively from one thread.

pub mod error;
pub mod ring;
pub mod tracking;

pub use error::{Error, Result};
pub use ring::{Iter, RingBuffer};
pub use tracking::PeakTracker;
