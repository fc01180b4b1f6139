//! Synthetic input for the benchmark: one contiguous buffer of cosine waves

use std::f64::consts::TAU;

use num_complex::Complex;
use num_traits::{Float, Zero};
use rustfft::FftNum;

use crate::config::BenchmarkConfig;
use crate::error::{BenchError, Result};

/// Sample component type the strategies can run at
pub trait Real: FftNum + Float {
    /// Converts an `f64` to this precision, rounding if needed
    fn narrow(value: f64) -> Self;
}

macro_rules! impl_real_for {
    ($precision:ty) => {
        impl Real for $precision {
            #[inline]
            fn narrow(value: f64) -> Self {
                value as $precision
            }
        }
    };
}

impl_real_for!(f32);
impl_real_for!(f64);

/// `batch` signals of `length` complex samples, stored back to back.
///
/// Signal `i` lives at `[i * length, (i + 1) * length)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBatch<T> {
    samples: Vec<Complex<T>>,
    batch: usize,
    length: usize,
}

impl<T: Real> SignalBatch<T> {
    /// Fills a new buffer so that signal `i` is a cosine with `1 + i` cycles.
    ///
    /// Sample `j` of signal `i` is `cos(2π (1 + i) j / length)` with a zero
    /// imaginary part, evaluated in `T` arithmetic. Every signal therefore peaks
    /// in a different bin, and the output is identical on every call for the same
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Allocation`] if the buffer cannot be allocated.
    pub fn generate(config: &BenchmarkConfig) -> Result<Self> {
        let (batch, length) = (config.batch(), config.length());
        let mut samples = Self::allocate(batch, length)?;
        let (tau, n) = (T::narrow(TAU), T::narrow(length as f64));

        samples.extend((0..batch).flat_map(|i| {
            (0..length).map(move |j| {
                // (1 + i) * j <= batch * length, which fits since the buffer was allocated
                let cycles = T::narrow((((1 + i) * j) % length) as f64);
                Complex::new((tau * cycles / n).cos(), Zero::zero())
            })
        }));

        Ok(Self {
            samples,
            batch,
            length,
        })
    }

    /// Wraps caller-provided samples laid out as `batch` consecutive signals.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Configuration`] if `samples` does not hold exactly
    /// `batch * length` values.
    pub fn from_samples(config: &BenchmarkConfig, samples: Vec<Complex<T>>) -> Result<Self> {
        if Some(samples.len()) != config.total_samples() {
            return Err(BenchError::Configuration(format!(
                "expected {} x {} samples, got {}",
                config.batch(),
                config.length(),
                samples.len()
            )));
        }

        Ok(Self {
            samples,
            batch: config.batch(),
            length: config.length(),
        })
    }

    fn allocate(batch: usize, length: usize) -> Result<Vec<Complex<T>>> {
        let oom = || BenchError::Allocation { batch, length };
        let total = batch.checked_mul(length).ok_or_else(oom)?;

        let mut samples = Vec::new();
        samples.try_reserve_exact(total).map_err(|_| oom())?;
        Ok(samples)
    }
}

impl<T> SignalBatch<T> {
    pub fn batch(&self) -> usize {
        self.batch
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Signal `index` of the batch
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.batch()`
    pub fn segment(&self, index: usize) -> &[Complex<T>] {
        let start = index * self.length;
        &self.samples[start..start + self.length]
    }

    /// Iterates over the signals in batch order
    pub fn segments(&self) -> impl Iterator<Item = &[Complex<T>]> {
        self.samples.chunks_exact(self.length)
    }

    pub fn as_slice(&self) -> &[Complex<T>] {
        &self.samples
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex<T>] {
        &mut self.samples
    }
}

#[cfg(test)]
mod tests {
    use utilities::assert_float_closeness;

    use super::*;

    #[test]
    fn layout_and_values() {
        let config = BenchmarkConfig::new(3, 8, 1).unwrap();
        let signal = SignalBatch::<f64>::generate(&config).unwrap();

        assert_eq!(signal.as_slice().len(), 24);
        assert_eq!(signal.segments().count(), 3);

        for (i, segment) in signal.segments().enumerate() {
            for (j, z) in segment.iter().enumerate() {
                let expected = (TAU * (1 + i) as f64 * j as f64 / 8.0).cos();
                assert_float_closeness(z.re, expected, 1e-12);
                assert_eq!(z.im, 0.0);
            }
        }
        assert_eq!(signal.segment(2), &signal.as_slice()[16..24]);
    }

    #[test]
    fn generation_is_bit_identical() {
        let config = BenchmarkConfig::new(5, 100, 2).unwrap();
        let a = SignalBatch::<f32>::generate(&config).unwrap();
        let b = SignalBatch::<f32>::generate(&config).unwrap();

        let bits = |s: &SignalBatch<f32>| {
            s.as_slice()
                .iter()
                .flat_map(|z| [z.re.to_bits(), z.im.to_bits()])
                .collect::<Vec<_>>()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn single_precision_uses_f32_arithmetic() {
        let config = BenchmarkConfig::new(3, 100, 1).unwrap();
        let signal = SignalBatch::<f32>::generate(&config).unwrap();

        for (i, segment) in signal.segments().enumerate() {
            for (j, z) in segment.iter().enumerate() {
                let cycles = (((1 + i) * j) % 100) as f32;
                let expected = (std::f32::consts::TAU * cycles / 100.0).cos();
                assert_eq!(z.re.to_bits(), expected.to_bits(), "segment {i} sample {j}");
            }
        }
    }

    #[test]
    fn each_segment_starts_at_one() {
        let config = BenchmarkConfig::new(4, 16, 1).unwrap();
        let signal = SignalBatch::<f32>::generate(&config).unwrap();

        for segment in signal.segments() {
            assert_eq!(segment[0], Complex::new(1.0, 0.0));
        }
    }

    #[test]
    fn overflowing_batch_is_an_allocation_error() {
        let config = BenchmarkConfig::new(usize::MAX, 2, 1).unwrap();
        let err = SignalBatch::<f64>::generate(&config).unwrap_err();
        assert!(matches!(err, BenchError::Allocation { .. }));
    }

    #[test]
    fn from_samples_checks_length() {
        let config = BenchmarkConfig::new(2, 4, 1).unwrap();
        let err = SignalBatch::<f64>::from_samples(&config, vec![Complex::zero(); 7]).unwrap_err();
        assert!(matches!(err, BenchError::Configuration(_)));

        let signal = SignalBatch::<f64>::from_samples(&config, vec![Complex::zero(); 8]).unwrap();
        assert_eq!(signal.batch(), 2);
    }
}
