//! One single-signal plan shared by explicitly spawned worker threads

use std::ops::Range;
use std::thread;

use num_complex::Complex;
use tracing::{debug, trace};

use super::{BatchStrategy, TransformPlan};
use crate::config::BenchmarkConfig;
use crate::error::{check, BenchError, Result};
use crate::options::PlanningMode;
use crate::planner::FftPlan;
use crate::signal::Real;

/// Manual fan-out of the batch over exactly `threads` workers
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualParallel {
    pub planning: PlanningMode,
}

impl BatchStrategy for ManualParallel {
    type Plan<T: Real> = SharedPlan<T>;

    fn name(&self) -> &'static str {
        "manual-parallel"
    }

    /// Parallelism comes from the workers, so each library call runs on one thread.
    fn backend_threads(&self, _config: &BenchmarkConfig) -> usize {
        1
    }

    fn build_plan<T: Real>(&self, config: &BenchmarkConfig) -> Result<SharedPlan<T>> {
        Ok(SharedPlan {
            plan: FftPlan::new(config.length(), self.planning),
            workers: config.threads(),
        })
    }
}

/// Splits `0..batch` into `workers` contiguous ranges.
///
/// Range sizes differ by at most one, the first `batch % workers` ranges being
/// the longer ones. Every index appears in exactly one range; when there are
/// more workers than indices the trailing ranges are empty.
pub fn partition(batch: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let (base, extra) = (batch / workers, batch % workers);

    let mut start = 0;
    (0..workers)
        .map(|w| {
            let len = base + usize::from(w < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// The part of the batch handed to one worker: the index of its first signal
/// and the signals themselves
struct WorkerShare<'a, T> {
    first: usize,
    segments: &'a mut [Complex<T>],
}

fn split_shares<'a, T>(
    mut buffer: &'a mut [Complex<T>],
    length: usize,
    ranges: &[Range<usize>],
) -> Vec<WorkerShare<'a, T>> {
    ranges
        .iter()
        .map(|range| {
            let (segments, rest) = std::mem::take(&mut buffer).split_at_mut(range.len() * length);
            buffer = rest;
            WorkerShare {
                first: range.start,
                segments,
            }
        })
        .collect()
}

/// A single-transform plan that runs a batch by fanning it out over worker threads
pub struct SharedPlan<T> {
    plan: FftPlan<T>,
    workers: usize,
}

impl<T: Real> SharedPlan<T> {
    /// Transforms every signal of `buffer` using exactly `workers` threads.
    ///
    /// The workers are spawned and joined inside this call. Each one applies the
    /// shared plan in place to the signals of its own range, with its own scratch.
    ///
    /// # Errors
    ///
    /// Fails if `buffer` is not a whole number of signals, if a worker cannot
    /// be spawned, or if any worker fails or panics.
    pub fn execute_parallel(&self, buffer: &mut [Complex<T>], workers: usize) -> Result<()> {
        let length = self.plan.len();
        if buffer.is_empty() || buffer.len() % length != 0 {
            return Err(BenchError::backend(
                "execute",
                format!(
                    "buffer of {} samples is not a batch of {length}-sample signals",
                    buffer.len()
                ),
            ));
        }

        let ranges = partition(buffer.len() / length, workers);
        debug!(workers = ranges.len(), ?ranges, "fanning out batch");
        let shares = split_shares(buffer, length, &ranges);

        thread::scope(|scope| -> Result<()> {
            let mut handles = Vec::with_capacity(shares.len());
            for (worker, share) in shares.into_iter().enumerate() {
                let handle = thread::Builder::new()
                    .name(format!("batchfft-worker-{worker}"))
                    .spawn_scoped(scope, move || self.run_share(share));
                handles.push(check("spawn worker", handle)?);
            }

            for handle in handles {
                handle
                    .join()
                    .map_err(|_| BenchError::backend("execute", "worker thread panicked"))??;
            }
            Ok(())
        })
    }

    fn run_share(&self, share: WorkerShare<'_, T>) -> Result<()> {
        let mut scratch = self.plan.make_scratch();
        let mut count = 0;
        for segment in share.segments.chunks_exact_mut(self.plan.len()) {
            self.plan.process(segment, &mut scratch)?;
            count += 1;
        }
        trace!(first = share.first, count, "worker finished");
        Ok(())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl<T: Real> TransformPlan<T> for SharedPlan<T> {
    fn execute(&self, buffer: &mut [Complex<T>]) -> Result<()> {
        self.execute_parallel(buffer, self.workers)
    }
}
