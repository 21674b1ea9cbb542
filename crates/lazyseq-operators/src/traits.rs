//! Operator errors and the iterator extension trait.
//!
//! Construction-time argument errors are returned as `OpError`. Errors that
//! surface from the ring buffer *during* a pull mean an operator's own
//! bookkeeping is wrong; those go through `fatal` and abort the pull.

use lazyseq_core::config::BufferConfig;
use thiserror::Error;

use crate::drop_end::TailDropper;
use crate::tee::{tee_with_config, TeeConsumer};
use crate::window::WindowEmitter;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("buffer error: {0}")]
    Buffer(#[from] lazyseq_mem::Error),

    #[error(transparent)]
    Core(#[from] lazyseq_core::Error),
}

/// Report an internal invariant violation and abort.
#[cold]
pub(crate) fn fatal(op: &'static str, cause: impl std::fmt::Display) -> ! {
    let err = OpError::from(lazyseq_core::Error::Invariant(format!("{op}: {cause}")));
    #[cfg(feature = "tracing")]
    tracing::error!(op, error = %err, "internal invariant violated");
    panic!("{err}");
}

/// Buffered operators on any iterator.
pub trait BufferedExt: Iterator + Sized {
    /// Fixed-size sliding windows advancing by `interval` elements.
    ///
    /// Fails if `size` or `interval` is zero.
    fn windows(self, size: usize, interval: usize) -> Result<WindowEmitter<Self>, OpError>
    where
        Self::Item: Clone,
    {
        WindowEmitter::new(self, size, interval)
    }

    /// Everything except the last `n` elements. `n == 0` passes through.
    fn drop_end(self, n: usize) -> TailDropper<Self> {
        TailDropper::new(self, n)
    }

    /// Split into `n` independent consumers. The original iterator is moved
    /// into the group and can no longer be driven directly.
    fn tee(self, n: usize) -> Vec<TeeConsumer<Self>>
    where
        Self::Item: Clone,
    {
        tee_with_config(self, n, BufferConfig::default())
    }
}

impl<I: Iterator> BufferedExt for I {}
