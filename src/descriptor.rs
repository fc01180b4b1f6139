//! A configure-then-commit transform descriptor.
//!
//! Instead of one constructor taking every layout argument, a [`Descriptor`] is
//! created for a transform length and then configured one parameter at a time.
//! [`Descriptor::commit`] validates the whole configuration and compiles the
//! plan; only a committed descriptor can compute. Every call reports a
//! [`DescriptorError`] whose message is the descriptor's own diagnostic.

use num_complex::Complex;
use thiserror::Error;
use tracing::debug;

use crate::options::PlanningMode;
use crate::planner::FftPlan;
use crate::signal::Real;
use crate::threads::process_batch;

/// Diagnostics reported by descriptor calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("transform length must be positive")]
    InvalidLength,

    #[error("{param:?} must be positive, got {value}")]
    InvalidValue { param: ConfigParam, value: usize },

    #[error("{value:?} is not a valid value for {param:?}")]
    InconsistentValue { param: ConfigParam, value: ConfigValue },

    #[error("{param:?} of {distance} is smaller than the transform length {length}")]
    OverlappingTransforms {
        param: ConfigParam,
        distance: usize,
        length: usize,
    },

    #[error("in-place placement needs equal input and output distances, got {input} and {output}")]
    MismatchedDistances { input: usize, output: usize },

    #[error("descriptor is already committed")]
    AlreadyCommitted,

    #[error("descriptor is not committed")]
    NotCommitted,

    #[error("descriptor is configured for out-of-place placement")]
    PlacementMismatch,

    #[error("batch layout needs {needed} samples, buffer holds {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Configurable descriptor parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigParam {
    NumberOfTransforms,
    InputDistance,
    OutputDistance,
    Placement,
}

/// Value assigned to a [`ConfigParam`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValue {
    Count(usize),
    Placement(Placement),
}

/// Where results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    InPlace,
    NotInPlace,
}

/// A 1-D complex-to-complex transform descriptor
pub struct Descriptor<T> {
    length: usize,
    transforms: usize,
    input_distance: usize,
    output_distance: usize,
    placement: Placement,
    committed: Option<FftPlan<T>>,
}

impl<T: Real> Descriptor<T> {
    /// Creates an uncommitted descriptor for single transforms of `length` samples.
    pub fn new(length: usize) -> Result<Self, DescriptorError> {
        if length == 0 {
            return Err(DescriptorError::InvalidLength);
        }

        Ok(Self {
            length,
            transforms: 1,
            input_distance: length,
            output_distance: length,
            placement: Placement::default(),
            committed: None,
        })
    }

    /// Assigns one configuration parameter.
    ///
    /// Values are checked for type and sign here; the layout as a whole is only
    /// checked by [`Self::commit`].
    pub fn set_value(
        &mut self,
        param: ConfigParam,
        value: ConfigValue,
    ) -> Result<(), DescriptorError> {
        if self.committed.is_some() {
            return Err(DescriptorError::AlreadyCommitted);
        }

        // type mismatches are reported before the sign of a count
        match (param, value) {
            (ConfigParam::Placement, ConfigValue::Placement(p)) => self.placement = p,
            (ConfigParam::Placement, _) | (_, ConfigValue::Placement(_)) => {
                return Err(DescriptorError::InconsistentValue { param, value });
            }
            (_, ConfigValue::Count(0)) => {
                return Err(DescriptorError::InvalidValue { param, value: 0 });
            }
            (ConfigParam::NumberOfTransforms, ConfigValue::Count(n)) => self.transforms = n,
            (ConfigParam::InputDistance, ConfigValue::Count(d)) => self.input_distance = d,
            (ConfigParam::OutputDistance, ConfigValue::Count(d)) => self.output_distance = d,
        }

        Ok(())
    }

    /// Validates the configured layout and compiles the plan.
    pub fn commit(&mut self) -> Result<(), DescriptorError> {
        if self.committed.is_some() {
            return Err(DescriptorError::AlreadyCommitted);
        }

        if self.transforms > 1 {
            for (param, distance) in [
                (ConfigParam::InputDistance, self.input_distance),
                (ConfigParam::OutputDistance, self.output_distance),
            ] {
                if distance < self.length {
                    return Err(DescriptorError::OverlappingTransforms {
                        param,
                        distance,
                        length: self.length,
                    });
                }
            }
        }
        if self.placement == Placement::InPlace && self.input_distance != self.output_distance {
            return Err(DescriptorError::MismatchedDistances {
                input: self.input_distance,
                output: self.output_distance,
            });
        }

        let plan = FftPlan::new(self.length, PlanningMode::Estimate);
        debug!(
            length = self.length,
            transforms = self.transforms,
            distance = self.input_distance,
            algorithm = plan.algorithm(),
            "descriptor committed"
        );
        self.committed = Some(plan);
        Ok(())
    }

    /// Computes the configured batch of forward transforms in place.
    pub fn compute_forward(&self, buffer: &mut [Complex<T>]) -> Result<(), DescriptorError> {
        let plan = self.committed.as_ref().ok_or(DescriptorError::NotCommitted)?;
        if self.placement != Placement::InPlace {
            return Err(DescriptorError::PlacementMismatch);
        }

        let needed = self.required_len();
        if buffer.len() < needed {
            return Err(DescriptorError::BufferTooSmall {
                needed,
                available: buffer.len(),
            });
        }

        // a single transform may carry any distance; never stride below one transform
        let distance = self.input_distance.max(self.length);
        process_batch(plan.fft(), &mut buffer[..needed], distance);
        Ok(())
    }

    /// Samples spanned by the configured batch, from the first input to the last
    pub fn required_len(&self) -> usize {
        (self.transforms - 1)
            .saturating_mul(self.input_distance)
            .saturating_add(self.length)
    }

    pub fn is_committed(&self) -> bool {
        self.committed.is_some()
    }
}

impl<T> Drop for Descriptor<T> {
    fn drop(&mut self) {
        debug!(
            length = self.length,
            committed = self.committed.is_some(),
            "descriptor released"
        );
    }
}
