#![forbid(unsafe_code)]
//! lazyseq-core: shared vocabulary for the buffered sequence operators.
//!
//! This crate holds the pull protocol (`Step`, `Pull`), the buffer
//! configuration that every ring buffer is built from, and the core error
//! type. It carries no data structures of its own; `lazyseq-mem` and
//! `lazyseq-operators` build on top of it.

pub mod config;
pub mod error;
pub mod prelude;
pub mod step;

pub use config::BufferConfig;
pub use error::{Error, Result};
pub use step::{Pull, Step};
