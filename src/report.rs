//! CSV result emission

use std::fmt;

use crate::config::BenchmarkConfig;
use crate::metrics::Metrics;

/// Header line printed ahead of every result row
pub const CSV_HEADER: &str = "batch,fft_length,threads,time_ms,gflops";

/// One result row: the run's configuration followed by its metrics.
///
/// `time_ms` is printed with three decimals and `gflops` rounded to a whole
/// number.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    pub config: BenchmarkConfig,
    pub metrics: Metrics,
}

impl Report {
    pub fn new(config: BenchmarkConfig, metrics: Metrics) -> Self {
        Self { config, metrics }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{:.3},{:.0}",
            self.config.batch(),
            self.config.length(),
            self.config.threads(),
            self.metrics.time_ms,
            self.metrics.gflops
        )
    }
}
