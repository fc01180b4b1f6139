//! Batch Execution Strategies
//!
//! Every strategy takes the same input, applies the same timing discipline and
//! reports the same metrics. They differ only in how the batch reaches the
//! transform library.
//!
//! ## Available Strategies
//!
//! - **Native batch**: one plan describing all transforms and their stride,
//!   executed by a single call.
//! - **Manual parallel**: one single-transform plan shared by worker threads
//!   that each own a disjoint range of signals.
//! - **Batch descriptor**: a descriptor configured parameter by parameter, then
//!   committed and executed by a single call.
//!
//! ## Timed region
//!
//! Only [`TransformPlan::execute`] is timed. Signal generation, backend thread
//! configuration, plan construction and plan release all happen outside it.

use std::time::Instant;

use num_complex::Complex;
use tracing::{debug, info_span};

use crate::config::BenchmarkConfig;
use crate::error::{BenchError, Result};
use crate::metrics::{Metrics, TimingResult};
use crate::signal::{Real, SignalBatch};
use crate::threads::BackendThreads;

pub mod batch_descriptor;
pub mod manual_parallel;
pub mod native_batch;

pub use batch_descriptor::BatchDescriptor;
pub use manual_parallel::ManualParallel;
pub use native_batch::NativeBatch;

/// A compiled, read-only plan ready to transform a whole batch buffer.
///
/// Dropping the plan releases it.
pub trait TransformPlan<T>: Send + Sync {
    /// Transforms every signal of `buffer` in place.
    fn execute(&self, buffer: &mut [Complex<T>]) -> Result<()>;
}

/// One way of expressing batched execution to the transform library
pub trait BatchStrategy {
    type Plan<T: Real>: TransformPlan<T>;

    fn name(&self) -> &'static str;

    /// Backend thread count to apply for the run
    fn backend_threads(&self, config: &BenchmarkConfig) -> usize {
        config.threads()
    }

    /// Builds the plan for `config`. Never timed.
    fn build_plan<T: Real>(&self, config: &BenchmarkConfig) -> Result<Self::Plan<T>>;

    /// Generates the input, runs the batch once and reports the metrics.
    fn run<T: Real>(&self, config: &BenchmarkConfig) -> Result<Metrics>
    where
        Self: Sized,
    {
        run::<T, Self>(self, config)
    }
}

/// Generates the input for `config`, runs `strategy` on it and computes the metrics.
pub fn run<T: Real, S: BatchStrategy>(strategy: &S, config: &BenchmarkConfig) -> Result<Metrics> {
    let mut signal = SignalBatch::<T>::generate(config)?;
    let timing = execute_timed(strategy, config, &mut signal)?;
    Ok(Metrics::new(config, timing))
}

/// Plans `strategy` for `config` and times its execution over `signal`.
///
/// The backend thread configuration is held from before planning until the
/// plan has been released.
pub fn execute_timed<T: Real, S: BatchStrategy>(
    strategy: &S,
    config: &BenchmarkConfig,
    signal: &mut SignalBatch<T>,
) -> Result<TimingResult> {
    if (signal.batch(), signal.length()) != (config.batch(), config.length()) {
        return Err(BenchError::Configuration(format!(
            "signal is {} x {}, configuration is {} x {}",
            signal.batch(),
            signal.length(),
            config.batch(),
            config.length()
        )));
    }

    let threads = BackendThreads::configure(strategy.backend_threads(config))?;
    let span = info_span!(
        "run",
        strategy = strategy.name(),
        batch = config.batch(),
        length = config.length(),
        threads = config.threads(),
        backend_threads = threads.threads(),
    );
    let _enter = span.enter();

    let plan = strategy.build_plan::<T>(config)?;

    let start = Instant::now();
    plan.execute(signal.as_mut_slice())?;
    let elapsed = start.elapsed();

    debug!(?elapsed, "batch executed");
    drop(plan);

    Ok(TimingResult { elapsed })
}
