#![forbid(unsafe_code)]
//! lazyseq: the buffering machinery behind lazy sequence combinators.
//!
//! - [`RingBuffer`]: amortized O(1) double-ended buffer that grows and shrinks.
//! - [`BufferedExt::windows`]: fixed-size sliding windows.
//! - [`BufferedExt::drop_end`]: everything but the last `n` elements, in O(n) memory.
//! - [`BufferedExt::tee`]: one upstream, many independent consumers.
//!
//! With the `async` feature (default) the same operators exist for
//! `futures::Stream` through [`BufferedStreamExt`].
//!
//! ```
//! use lazyseq::BufferedExt;
//!
//! let windows: Vec<_> = (1..=5).windows(3, 1).unwrap().collect();
//! assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
//!
//! let mut group = vec!["a", "b"].into_iter().tee(2);
//! let second = group.pop().unwrap();
//! let first = group.pop().unwrap();
//! assert_eq!(first.collect::<Vec<_>>(), second.collect::<Vec<_>>());
//! ```

pub use lazyseq_core::{BufferConfig, Error, Pull, Result, Step};
pub use lazyseq_mem::{PeakTracker, RingBuffer};
pub use lazyseq_operators::{
    tee, tee_with_config, BufferedExt, OpError, TailDropper, TeeConsumer, WindowEmitter,
};

#[cfg(feature = "async")]
pub use lazyseq_operators::{
    tee_stream, tee_stream_with_config, BufferedStreamExt, TailDropStream, TeeStream,
    WindowStream,
};

pub mod mem {
    //! Ring buffer errors.
    pub use lazyseq_mem::{Error, Iter, Result};
}
