//! Buffer configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest capacity the growth rule (`len >= cap - 1`) can work with.
pub const MIN_USABLE_CAPACITY: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Backing capacity a buffer starts at; shrinking never goes below it.
    pub min_capacity: usize,

    /// Halve the backing storage on pop once `len * 4 <= capacity`.
    pub shrink_on_pop: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            min_capacity: 32,
            shrink_on_pop: true,
        }
    }
}

impl BufferConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYSEQ_MIN_CAPACITY`: initial/minimum ring capacity
    /// - `LAZYSEQ_SHRINK_ON_POP`: `true`/`false`, `1`/`0`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYSEQ_MIN_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.min_capacity = v;
            }
        }

        if let Ok(s) = std::env::var("LAZYSEQ_SHRINK_ON_POP") {
            match s.trim() {
                "1" | "true" | "TRUE" | "yes" => cfg.shrink_on_pop = true,
                "0" | "false" | "FALSE" | "no" => cfg.shrink_on_pop = false,
                _ => {}
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            min_capacity = cfg.min_capacity,
            shrink_on_pop = cfg.shrink_on_pop,
            "buffer config loaded from env"
        );

        cfg
    }

    /// Parse and validate a JSON config document. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_capacity < MIN_USABLE_CAPACITY {
            return Err(Error::Config(format!(
                "min_capacity must be at least {MIN_USABLE_CAPACITY}, got {}",
                self.min_capacity
            )));
        }
        Ok(())
    }

    /// Capacity to allocate for `len` initial elements: the smallest power of
    /// two that keeps `len < cap - 1`, never below `min_capacity`.
    pub fn capacity_for(&self, len: usize) -> usize {
        let mut cap = self.min_capacity.max(MIN_USABLE_CAPACITY);
        while len >= cap - 1 {
            cap *= 2;
        }
        cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = BufferConfig::default();
        assert_eq!(cfg.min_capacity, 32);
        assert!(cfg.shrink_on_pop);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields() {
        let cfg = BufferConfig::from_json_str(r#"{"shrink_on_pop": false}"#).unwrap();
        assert_eq!(cfg.min_capacity, 32);
        assert!(!cfg.shrink_on_pop);
    }

    #[test]
    fn json_rejects_tiny_capacity() {
        let err = BufferConfig::from_json_str(r#"{"min_capacity": 1}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn json_reports_parse_errors() {
        let err = BufferConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn capacity_for_keeps_a_free_slot() {
        let cfg = BufferConfig::default();
        assert_eq!(cfg.capacity_for(0), 32);
        assert_eq!(cfg.capacity_for(30), 32);
        assert_eq!(cfg.capacity_for(31), 64);
        assert_eq!(cfg.capacity_for(100), 128);
    }
}
