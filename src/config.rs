//! The validated shape of one benchmark run

use crate::error::{BenchError, Result};

/// Batch size, transform length and thread count of one run.
///
/// All three are strictly positive; the only way to obtain a value is through
/// [`BenchmarkConfig::new`], which rejects zeros before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkConfig {
    batch: usize,
    length: usize,
    threads: usize,
}

impl BenchmarkConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Configuration`] if any field is zero.
    pub fn new(batch: usize, length: usize, threads: usize) -> Result<Self> {
        for (name, value) in [("batch", batch), ("length", length), ("threads", threads)] {
            if value == 0 {
                return Err(BenchError::Configuration(format!(
                    "{name} must be a positive integer, got {value}"
                )));
            }
        }

        Ok(Self {
            batch,
            length,
            threads,
        })
    }

    /// Number of signals in the batch
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Samples per signal
    pub fn length(&self) -> usize {
        self.length
    }

    /// Requested thread count
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Total number of complex samples in the batch buffer, if it fits in `usize`
    pub fn total_samples(&self) -> Option<usize> {
        self.batch.checked_mul(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_fields() {
        let config = BenchmarkConfig::new(16, 1024, 4).unwrap();
        assert_eq!(
            (config.batch(), config.length(), config.threads()),
            (16, 1024, 4)
        );
        assert_eq!(config.total_samples(), Some(16 * 1024));
    }

    #[test]
    fn rejects_zero_fields() {
        for (b, l, t) in [(0, 1024, 4), (16, 0, 4), (16, 1024, 0)] {
            let err = BenchmarkConfig::new(b, l, t).unwrap_err();
            assert!(matches!(err, BenchError::Configuration(_)), "{err}");
        }
    }

    #[test]
    fn oversized_batches_have_no_total() {
        let config = BenchmarkConfig::new(usize::MAX, 2, 1).unwrap();
        assert_eq!(config.total_samples(), None);
    }
}
