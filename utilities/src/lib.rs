pub extern crate rustfft;

// export rustfft to batchfft tests and benches
use rand::{distributions::Uniform, prelude::*};
use rustfft::num_complex::Complex;
use rustfft::num_traits::{Float, ToPrimitive};

/// Asserts that two fp numbers are approximately equal.
///
/// # Panics
///
/// Panics if `actual` and `expected` are too far from each other
#[allow(dead_code)]
#[track_caller]
pub fn assert_float_closeness<T: Float + std::fmt::Display>(actual: T, expected: T, epsilon: T) {
    if (actual - expected).abs() >= epsilon {
        panic!(
            "Assertion failed: {actual} too far from expected value {expected} (with epsilon {epsilon})",
        );
    }
}

/// Generate a random complex signal of `len` samples from a fixed `seed`.
pub fn gen_random_signal<T>(len: usize, seed: u64) -> Vec<Complex<T>>
where
    T: Float + rand::distributions::uniform::SampleUniform,
{
    let mut rng = StdRng::seed_from_u64(seed);

    let uniform_dist = Uniform::new(T::from(-1.0).unwrap(), T::from(1.0).unwrap());
    (0..len)
        .map(|_| Complex::new(uniform_dist.sample(&mut rng), uniform_dist.sample(&mut rng)))
        .collect()
}

/// Textbook O(n^2) forward DFT, evaluated in `f64` regardless of the input precision.
pub fn reference_dft<T: Float>(signal: &[Complex<T>]) -> Vec<Complex<f64>> {
    let n = signal.len();
    let input: Vec<Complex<f64>> = signal
        .iter()
        .map(|z| Complex::new(z.re.to_f64().unwrap(), z.im.to_f64().unwrap()))
        .collect();

    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .fold(Complex::new(0.0, 0.0), |acc, (j, x)| {
                    // reduce the index product first so the angle stays small for large n
                    let phase = ((k * j) % n) as f64 / n as f64;
                    let w = Complex::from_polar(1.0, -2.0 * std::f64::consts::PI * phase);
                    acc + *x * w
                })
        })
        .collect()
}

/// Asserts that `actual` matches `expected` bin by bin.
///
/// The error of each bin is measured relative to the largest magnitude in `expected`,
/// so bins that should be zero are judged against the spectrum's scale.
///
/// # Panics
///
/// Panics on a length mismatch or on the first bin outside `rel_tol`
#[track_caller]
pub fn assert_spectrum_closeness<T: Float>(
    actual: &[Complex<T>],
    expected: &[Complex<f64>],
    rel_tol: f64,
) {
    assert_eq!(actual.len(), expected.len(), "spectrum lengths differ");

    let scale = expected.iter().map(|z| z.norm()).fold(1.0, f64::max);
    for (bin, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let a = Complex::new(a.re.to_f64().unwrap(), a.im.to_f64().unwrap());
        let err = (a - e).norm() / scale;
        assert!(
            err <= rel_tol,
            "bin {bin}: got {a}, expected {e} (relative error {err:e} > {rel_tol:e})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_random_signal() {
        let signal = gen_random_signal::<f64>(1 << 12, 7);

        assert!(signal
            .iter()
            .all(|z| (-1.0..1.0).contains(&z.re) && (-1.0..1.0).contains(&z.im)));
        assert_eq!(signal, gen_random_signal::<f64>(1 << 12, 7));
    }

    #[test]
    fn reference_dft_of_impulse_is_flat() {
        let mut impulse = vec![Complex::new(0.0f64, 0.0); 16];
        impulse[0] = Complex::new(1.0, 0.0);

        for bin in reference_dft(&impulse) {
            assert_float_closeness(bin.re, 1.0, 1e-12);
            assert_float_closeness(bin.im, 0.0, 1e-12);
        }
    }
}
