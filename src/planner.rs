//! The planner module builds the compiled transform every strategy executes.
//! A plan is bound to a transform length and direction only; it never keeps the
//! address of a buffer, so the same plan can be run on any segment of the right size.
use std::sync::Arc;

use num_complex::Complex;
use rustfft::Fft;
use tracing::debug;

use crate::bencher::{guess_fastest_fft, measure_fastest_fft};
use crate::error::{BenchError, Result};
use crate::options::PlanningMode;
use crate::signal::Real;

/// A forward complex FFT of fixed length
pub struct FftPlan<T> {
    fft: Arc<dyn Fft<T>>,
    algorithm: &'static str,
    planning: PlanningMode,
}

impl<T: Real> FftPlan<T> {
    /// Create a plan for a single transform of `length` samples.
    ///
    /// With [`PlanningMode::Measure`] the candidates are timed on one probe segment.
    pub fn new(length: usize, planning: PlanningMode) -> Self {
        Self::for_segments(length, 1, planning)
    }

    /// Create a plan that will be run over `segments` consecutive transforms.
    ///
    /// The segment count only shapes the probe used by [`PlanningMode::Measure`];
    /// the plan itself still describes one transform.
    pub fn for_segments(length: usize, segments: usize, planning: PlanningMode) -> Self {
        let candidate = match planning {
            PlanningMode::Estimate => guess_fastest_fft(length),
            PlanningMode::Measure => measure_fastest_fft(length, segments),
        };
        debug!(length, algorithm = candidate.name, ?planning, "planned forward fft");

        Self {
            fft: candidate.fft,
            algorithm: candidate.name,
            planning,
        }
    }

    /// Runs the plan in place on `transform`, which need not be the planning buffer.
    ///
    /// # Errors
    ///
    /// Fails if `transform` is not exactly one plan length long or if `scratch`
    /// is shorter than [`Self::scratch_len`].
    pub fn process(&self, transform: &mut [Complex<T>], scratch: &mut [Complex<T>]) -> Result<()> {
        if transform.len() != self.len() {
            return Err(BenchError::backend(
                "execute",
                format!(
                    "segment holds {} samples, plan expects {}",
                    transform.len(),
                    self.len()
                ),
            ));
        }
        if scratch.len() < self.scratch_len() {
            return Err(BenchError::backend(
                "execute",
                format!(
                    "scratch holds {} samples, plan needs {}",
                    scratch.len(),
                    self.scratch_len()
                ),
            ));
        }

        self.fft.process_with_scratch(transform, &mut scratch[..self.scratch_len()]);
        Ok(())
    }

    /// A zeroed scratch buffer sized for this plan
    pub fn make_scratch(&self) -> Vec<Complex<T>> {
        vec![Complex::new(T::zero(), T::zero()); self.scratch_len()]
    }

    /// Samples per transform; never zero
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.fft.len()
    }

    pub fn scratch_len(&self) -> usize {
        self.fft.get_inplace_scratch_len()
    }

    /// Name of the algorithm the planner settled on
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn planning(&self) -> PlanningMode {
        self.planning
    }

    pub(crate) fn fft(&self) -> &dyn Fft<T> {
        self.fft.as_ref()
    }
}
