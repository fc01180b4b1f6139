//! Process-wide thread count used by the library-native batch paths
//!
//! The count is applied for the lifetime of a [`BackendThreads`] guard and
//! cleared when the guard drops. Holding a guard also excludes every other run
//! in the process, so the setting cannot change underneath a plan.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use num_complex::Complex;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rustfft::Fft;
use tracing::debug;

use crate::error::{check, Result};
use crate::signal::Real;

static RUN_LOCK: Mutex<()> = Mutex::new(());
static BACKEND_POOL: RwLock<Option<Arc<ThreadPool>>> = RwLock::new(None);

/// Scoped backend thread configuration for one run
pub struct BackendThreads {
    threads: usize,
    previous: Option<Arc<ThreadPool>>,
    _run: MutexGuard<'static, ()>,
}

impl BackendThreads {
    /// Applies `threads` as the backend thread count until the guard drops.
    ///
    /// Blocks while another run in this process holds a guard.
    pub fn configure(threads: usize) -> Result<Self> {
        let run = RUN_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let pool = if threads > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("batchfft-backend-{i}"))
                .build();
            Some(Arc::new(check("configure backend threads", pool)?))
        } else {
            None
        };

        let previous = std::mem::replace(&mut *write_pool(), pool);
        debug!(threads, "backend thread count applied");

        Ok(Self {
            threads,
            previous,
            _run: run,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Drop for BackendThreads {
    fn drop(&mut self) {
        *write_pool() = self.previous.take();
        debug!(threads = self.threads, "backend thread count cleared");
    }
}

fn write_pool() -> std::sync::RwLockWriteGuard<'static, Option<Arc<ThreadPool>>> {
    BACKEND_POOL.write().unwrap_or_else(PoisonError::into_inner)
}

fn current_pool() -> Option<Arc<ThreadPool>> {
    BACKEND_POOL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Runs `fft` in place over every transform of a strided batch.
///
/// Transform `k` starts at `k * distance` and spans `fft.len()` samples. With
/// a single backend thread and a dense layout this is one library call over
/// the whole buffer; otherwise the transforms are spread over the backend pool.
pub(crate) fn process_batch<T: Real>(
    fft: &dyn Fft<T>,
    buffer: &mut [Complex<T>],
    distance: usize,
) {
    let len = fft.len();
    let scratch_len = fft.get_inplace_scratch_len();

    match current_pool() {
        Some(pool) => pool.install(|| {
            buffer.par_chunks_mut(distance).for_each_init(
                || vec![Complex::new(T::zero(), T::zero()); scratch_len],
                |scratch, transform| fft.process_with_scratch(&mut transform[..len], scratch),
            );
        }),
        None if distance == len => {
            let mut scratch = vec![Complex::new(T::zero(), T::zero()); scratch_len];
            fft.process_with_scratch(buffer, &mut scratch);
        }
        None => {
            let mut scratch = vec![Complex::new(T::zero(), T::zero()); scratch_len];
            for transform in buffer.chunks_mut(distance) {
                fft.process_with_scratch(&mut transform[..len], &mut scratch);
            }
        }
    }
}
