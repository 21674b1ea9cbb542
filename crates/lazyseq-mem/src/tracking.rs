//! Lightweight high-water-mark tracking for retained buffers.
//!
//! Operators own their tracker exclusively, so there is no atomic traffic.

#[derive(Debug, Default, Clone)]
pub struct PeakTracker {
    current: usize,
    peak: usize,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new retained length; updates the peak if higher.
    pub fn record(&mut self, len: usize) {
        self.current = len;
        if len > self.peak {
            self.peak = len;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(len, peak = self.peak, "retained window");
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn peak(&self) -> usize {
        self.peak
    }
}
