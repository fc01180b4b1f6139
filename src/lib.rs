//! Throughput benchmark for batched 1-D complex FFTs.
//!
//! A batch of `batch` deterministic cosine signals, each `length` samples long,
//! is transformed forward in place exactly once. Only the transform call is
//! timed; the result is reported as elapsed milliseconds and estimated GFLOPS.
//!
//! Three [strategies] hand the same batch to the transform library in different
//! ways, so their throughput can be compared under identical conditions:
//!
//! ```no_run
//! use batchfft::{run, BenchmarkConfig, RunOptions, StrategyKind};
//!
//! let config = BenchmarkConfig::new(16, 1024, 4)?;
//! let metrics = run(&config, &RunOptions::new(StrategyKind::NativeBatch))?;
//! println!("{:.3} ms, {:.0} GFLOPS", metrics.time_ms, metrics.gflops);
//! # Ok::<(), batchfft::BenchError>(())
//! ```

use tracing::{info, warn};

mod bencher;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod metrics;
pub mod options;
pub mod planner;
pub mod report;
pub mod signal;
pub mod strategies;
mod threads;

pub use config::BenchmarkConfig;
pub use error::{BenchError, Result};
pub use metrics::{Metrics, TimingResult};
pub use options::{PlanningMode, Precision, RunOptions, StrategyKind};
pub use report::{Report, CSV_HEADER};
pub use signal::{Real, SignalBatch};
pub use strategies::{BatchDescriptor, BatchStrategy, ManualParallel, NativeBatch};
pub use threads::BackendThreads;

/// Runs one benchmark with the strategy and precision `options` select.
///
/// # Errors
///
/// Fails with [`BenchError::Allocation`] if the signal buffer cannot be
/// allocated and with [`BenchError::Backend`] if planning or execution fails.
pub fn run(config: &BenchmarkConfig, options: &RunOptions) -> Result<Metrics> {
    let precision = options.precision();
    let planning = options.planning();

    if options.planning.is_some() && !options.strategy.supports_planning() {
        warn!(
            strategy = options.strategy.name(),
            ?planning,
            "strategy has no planning option, ignoring it"
        );
    }

    let metrics = match options.strategy {
        StrategyKind::NativeBatch => run_at(&NativeBatch { planning }, precision, config),
        StrategyKind::ManualParallel => run_at(&ManualParallel { planning }, precision, config),
        StrategyKind::BatchDescriptor => run_at(&BatchDescriptor, precision, config),
    }?;

    info!(
        strategy = options.strategy.name(),
        ?precision,
        batch = config.batch(),
        length = config.length(),
        threads = config.threads(),
        time_ms = metrics.time_ms,
        gflops = metrics.gflops,
        "benchmark finished"
    );
    Ok(metrics)
}

fn run_at<S: BatchStrategy>(
    strategy: &S,
    precision: Precision,
    config: &BenchmarkConfig,
) -> Result<Metrics> {
    match precision {
        Precision::Single => strategy.run::<f32>(config),
        Precision::Double => strategy.run::<f64>(config),
    }
}
