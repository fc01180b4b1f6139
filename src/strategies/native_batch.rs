//! One plan that knows the whole batch layout, executed with a single call

use num_complex::Complex;
use tracing::debug;

use super::{BatchStrategy, TransformPlan};
use crate::config::BenchmarkConfig;
use crate::error::{BenchError, Result};
use crate::options::PlanningMode;
use crate::planner::FftPlan;
use crate::signal::Real;
use crate::threads::process_batch;

/// Native batch execution: "`batch` transforms of `length`, `length` apart".
#[derive(Debug, Clone, Copy)]
pub struct NativeBatch {
    pub planning: PlanningMode,
}

impl Default for NativeBatch {
    /// Measures the candidate algorithms; planning time is outside the timed region anyway.
    fn default() -> Self {
        Self {
            planning: PlanningMode::Measure,
        }
    }
}

impl BatchStrategy for NativeBatch {
    type Plan<T: Real> = BatchPlan<T>;

    fn name(&self) -> &'static str {
        "native-batch"
    }

    fn build_plan<T: Real>(&self, config: &BenchmarkConfig) -> Result<BatchPlan<T>> {
        let length = config.length();
        BatchPlan::many(length, config.batch(), 1, length, self.planning)
    }
}

/// A plan for many equally shaped transforms at a fixed distance from each other
pub struct BatchPlan<T> {
    plan: FftPlan<T>,
    distance: usize,
    span: usize,
}

impl<T: Real> BatchPlan<T> {
    /// Plans `howmany` in-place forward transforms of `length` samples.
    ///
    /// Samples of one transform are `stride` apart and transform `k` starts at
    /// `k * distance`. Only contiguous transforms (`stride == 1`) that do not
    /// overlap (`distance >= length`) are supported.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Backend`] for any other layout.
    pub fn many(
        length: usize,
        howmany: usize,
        stride: usize,
        distance: usize,
        planning: PlanningMode,
    ) -> Result<Self> {
        const STEP: &str = "plan batch";

        if length == 0 || howmany == 0 {
            return Err(BenchError::backend(
                STEP,
                format!("empty batch: {howmany} transforms of {length} samples"),
            ));
        }
        if stride != 1 {
            return Err(BenchError::backend(
                STEP,
                format!("element stride {stride} is not supported, transforms must be contiguous"),
            ));
        }
        if howmany > 1 && distance < length {
            return Err(BenchError::backend(
                STEP,
                format!("distance {distance} makes transforms of {length} samples overlap"),
            ));
        }

        let distance = distance.max(length);
        let span = (howmany - 1)
            .checked_mul(distance)
            .and_then(|start| start.checked_add(length))
            .ok_or_else(|| {
                BenchError::backend(STEP, format!("{howmany} transforms {distance} apart overflow"))
            })?;

        let plan = FftPlan::for_segments(length, howmany, planning);
        debug!(
            length,
            howmany,
            distance,
            algorithm = plan.algorithm(),
            "batch plan ready"
        );

        Ok(Self {
            plan,
            distance,
            span,
        })
    }

    /// Samples the batch layout spans
    pub fn required_len(&self) -> usize {
        self.span
    }

    pub fn algorithm(&self) -> &'static str {
        self.plan.algorithm()
    }
}

impl<T: Real> TransformPlan<T> for BatchPlan<T> {
    fn execute(&self, buffer: &mut [Complex<T>]) -> Result<()> {
        if buffer.len() != self.required_len() {
            return Err(BenchError::backend(
                "execute batch",
                format!(
                    "buffer holds {} samples, batch layout spans {}",
                    buffer.len(),
                    self.required_len()
                ),
            ));
        }

        process_batch(self.plan.fft(), buffer, self.distance);
        Ok(())
    }
}
