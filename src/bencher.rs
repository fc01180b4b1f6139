//! Benchmarks the algorithms the transform library offers for one length and picks the
//! fastest one on the current hardware

use std::sync::Arc;
use std::time::{Duration, Instant};

use num_complex::Complex;
use rustfft::algorithm::Radix4;
use rustfft::{Fft, FftDirection, FftPlanner, FftPlannerScalar};
use tracing::debug;

use crate::signal::Real;

const MEASURE_ITERATIONS: usize = 5;
const MEASURE_SEGMENTS: usize = 4;

/// A forward transform the library can build for a given length
pub(crate) struct Candidate<T> {
    pub name: &'static str,
    pub fft: Arc<dyn Fft<T>>,
}

fn candidates<T: Real>(length: usize) -> Vec<Candidate<T>> {
    let mut candidates = vec![
        guess_fastest_fft(length),
        Candidate {
            name: "scalar",
            fft: FftPlannerScalar::new().plan_fft(length, FftDirection::Forward),
        },
    ];

    if length >= 16 && length.is_power_of_two() {
        candidates.push(Candidate {
            name: "radix4",
            fft: Arc::new(Radix4::new(length, FftDirection::Forward)),
        });
    }

    candidates
}

/// Times each candidate on `probe` and returns the fastest one
fn find_fastest_implementation<T: Real>(
    candidates: Vec<Candidate<T>>,
    probe: &[Complex<T>],
    iterations: usize,
) -> Option<Candidate<T>> {
    let mut results = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        // Create a fresh copy of the probe for each candidate
        let mut data = probe.to_vec();
        let mut scratch =
            vec![Complex::new(T::zero(), T::zero()); candidate.fft.get_inplace_scratch_len()];

        // Warm-up run
        candidate.fft.process_with_scratch(&mut data, &mut scratch);

        let mut elapsed = Duration::ZERO;
        for _ in 0..iterations {
            // Reset data between iterations, outside the measurement
            data.copy_from_slice(probe);
            let start = Instant::now();
            candidate.fft.process_with_scratch(&mut data, &mut scratch);
            elapsed += start.elapsed();
        }

        debug!(algorithm = candidate.name, ?elapsed, "measured planning candidate");
        results.push((candidate, elapsed));
    }

    results
        .into_iter()
        .min_by_key(|(_, elapsed)| *elapsed)
        .map(|(fastest, _)| fastest)
}

/// Measures every candidate on up to `segments` transforms of `length` samples
pub(crate) fn measure_fastest_fft<T: Real>(length: usize, segments: usize) -> Candidate<T> {
    let segments = segments.clamp(1, MEASURE_SEGMENTS);
    let probe: Vec<Complex<T>> = (0..length * segments)
        .map(|i| Complex::new(T::narrow((i % length) as f64), T::narrow(-((i % 7) as f64))))
        .collect();

    find_fastest_implementation(candidates(length), &probe, MEASURE_ITERATIONS)
        .unwrap_or_else(|| guess_fastest_fft(length))
}

/// The library's own pick, without running anything
pub(crate) fn guess_fastest_fft<T: Real>(length: usize) -> Candidate<T> {
    Candidate {
        name: "auto",
        fft: FftPlanner::new().plan_fft_forward(length),
    }
}
