//! Turning a measured interval into time and GFLOPS figures

use std::time::Duration;

use crate::config::BenchmarkConfig;

/// Wall-clock time of the timed region and nothing else
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingResult {
    pub elapsed: Duration,
}

impl TimingResult {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Estimated floating point operations of a batch of complex FFTs.
///
/// For a complex FFT of length N: ~5*N*log2(N) FLOPs.
/// For a batch of B FFTs: B * 5 * N * log2(N).
/// This is the usual radix-2 operation count, not a measured figure.
pub fn estimated_flops(batch: usize, length: usize) -> f64 {
    let n = length as f64;
    let b = batch as f64;
    b * 5.0 * n * n.log2()
}

/// Final figures of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub time_ms: f64,
    pub gflops: f64,
}

impl Metrics {
    /// Derives the reported figures from the timed interval.
    ///
    /// A length-1 transform does no arithmetic and reports 0 GFLOPS; a nonzero
    /// operation count measured in zero time reports infinity.
    pub fn new(config: &BenchmarkConfig, timing: TimingResult) -> Self {
        let seconds = timing.elapsed_seconds();
        let flops = estimated_flops(config.batch(), config.length());

        let gflops = if flops == 0.0 {
            0.0
        } else {
            flops / seconds / 1e9
        };

        Self {
            time_ms: seconds * 1000.0,
            gflops,
        }
    }
}

#[cfg(test)]
mod tests {
    use utilities::assert_float_closeness;

    use super::*;

    #[test]
    fn gflops_formula() {
        let config = BenchmarkConfig::new(16, 1024, 4).unwrap();
        let timing = TimingResult {
            elapsed: Duration::from_secs_f64(0.002),
        };
        let metrics = Metrics::new(&config, timing);

        assert_float_closeness(estimated_flops(16, 1024), 16.0 * 5.0 * 1024.0 * 10.0, 1e-6);
        assert_float_closeness(metrics.gflops, 16.0 * 5.0 * 1024.0 * 10.0 / 0.002 / 1e9, 1e-9);
        assert_float_closeness(metrics.gflops, 0.4096, 1e-9);
        assert_float_closeness(metrics.time_ms, 2.0, 1e-9);
    }

    #[test]
    fn single_sample_transforms_report_zero() {
        let config = BenchmarkConfig::new(8, 1, 1).unwrap();
        let zero = Metrics::new(&config, TimingResult { elapsed: Duration::ZERO });
        assert_eq!(zero.gflops, 0.0);
        assert_eq!(zero.time_ms, 0.0);
    }

    #[test]
    fn zero_elapsed_is_infinite_not_nan() {
        let config = BenchmarkConfig::new(2, 64, 1).unwrap();
        let metrics = Metrics::new(&config, TimingResult { elapsed: Duration::ZERO });
        assert!(metrics.gflops.is_infinite() && metrics.gflops > 0.0);
    }
}
