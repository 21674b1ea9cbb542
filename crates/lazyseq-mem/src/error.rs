use thiserror::Error;

/// Result type local to lazyseq-mem.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} out of range for ring buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("pop from an empty ring buffer")]
    EmptyCollection,
}
