#![forbid(unsafe_code)]
//! lazyseq-operators: the operators that need to remember elements.
//!
//! Design intent:
//! - Each operator keeps its state in a small "core" that never pulls by
//!   itself. The iterator wrappers here and the `Stream` wrappers in
//!   `stream` (feature `async`) only decide *how* to obtain the next
//!   upstream element, then hand it to the core.
//! - All buffering goes through `lazyseq_mem::RingBuffer`.
//! - Single-threaded, cooperative pulling. Tee consumers share state through
//!   `Rc<RefCell<_>>` and are neither `Send` nor `Sync`.

pub mod drop_end;
pub mod tee;
pub mod traits;
pub mod window;

#[cfg(feature = "async")]
pub mod stream;

pub use drop_end::TailDropper;
pub use tee::{tee, tee_with_config, TeeConsumer};
pub use traits::{BufferedExt, OpError};
pub use window::WindowEmitter;

#[cfg(feature = "async")]
pub use stream::{
    tee_stream, tee_stream_with_config, BufferedStreamExt, TailDropStream, TeeStream,
    WindowStream,
};
