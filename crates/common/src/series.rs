//! Bounded price history buffer.

use tracing::debug;

use crate::error::Error;
use crate::types::PriceSample;
use crate::Result;

/// Ordered price history for one commodity. Insertion order is
/// chronological order; the oldest sample is evicted once the buffer
/// reaches capacity. The buffer is caller-owned — the engine only reads
/// it for the duration of a single call.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    samples: Vec<PriceSample>,
    capacity: usize,
}

impl PriceSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a sample. Timestamps must be strictly increasing.
    pub fn push(&mut self, sample: PriceSample) -> Result<()> {
        if let Some(last) = self.samples.last() {
            if sample.timestamp <= last.timestamp {
                return Err(Error::InvalidInput(format!(
                    "non-monotonic timestamp: {} <= {}",
                    sample.timestamp, last.timestamp
                )));
            }
        }
        if !(sample.price > 0.0) {
            return Err(Error::InvalidInput(format!(
                "non-positive price: {}",
                sample.price
            )));
        }
        if self.samples.len() == self.capacity {
            let evicted = self.samples.remove(0);
            debug!("series full, evicting sample at t={}", evicted.timestamp);
        }
        self.samples.push(sample);
        Ok(())
    }

    pub fn as_slice(&self) -> &[PriceSample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Price column, oldest first.
    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.price).collect()
    }

    /// Volume column, oldest first.
    pub fn volumes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.volume).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    fn make_sample(timestamp: u64, price: f64) -> PriceSample {
        PriceSample {
            timestamp,
            price,
            volume: 100.0,
            trend: Trend::Stable,
            liquidity: None,
        }
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut series = PriceSeries::with_capacity(3);
        for t in 0..5 {
            series.push(make_sample(t, 100.0 + t as f64)).unwrap();
        }
        assert_eq!(series.len(), 3);
        assert_eq!(series.as_slice()[0].timestamp, 2, "oldest evicted first");
        assert_eq!(series.latest().unwrap().timestamp, 4);
    }

    #[test]
    fn test_rejects_non_monotonic_timestamp() {
        let mut series = PriceSeries::with_capacity(8);
        series.push(make_sample(5, 100.0)).unwrap();
        let err = series.push(make_sample(5, 101.0)).unwrap_err();
        assert!(err.to_string().contains("non-monotonic"));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let mut series = PriceSeries::with_capacity(8);
        let err = series.push(make_sample(0, 0.0)).unwrap_err();
        assert!(err.to_string().contains("non-positive price"));
    }
}
