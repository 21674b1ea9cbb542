//! Convenient re-exports for downstream crates.

pub use crate::config::BufferConfig;
pub use crate::error::{Error, Result};
pub use crate::step::{Pull, Step};
