//! The batch expressed through a step-by-step configured descriptor

use num_complex::Complex;

use super::{BatchStrategy, TransformPlan};
use crate::config::BenchmarkConfig;
use crate::descriptor::{ConfigParam, ConfigValue, Descriptor, Placement};
use crate::error::{check, Result};
use crate::signal::Real;

/// Descriptor-based batch execution.
///
/// The descriptor has no planning-effort knob: commit always uses the library's
/// default choice of algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchDescriptor;

impl BatchStrategy for BatchDescriptor {
    type Plan<T: Real> = DescriptorPlan<T>;

    fn name(&self) -> &'static str {
        "batch-descriptor"
    }

    fn build_plan<T: Real>(&self, config: &BenchmarkConfig) -> Result<DescriptorPlan<T>> {
        let length = config.length();
        let descriptor = commit_descriptor(length, config.batch(), length)?;
        Ok(DescriptorPlan { descriptor })
    }
}

/// Creates, configures and commits an in-place descriptor for `transforms`
/// transforms of `length` samples placed `distance` apart.
///
/// Stops at the first failed step and names it; the partial descriptor is
/// dropped, and so released, before the error is returned.
fn commit_descriptor<T: Real>(
    length: usize,
    transforms: usize,
    distance: usize,
) -> Result<Descriptor<T>> {
    let mut descriptor = check("create descriptor", Descriptor::new(length))?;
    check(
        "set number of transforms",
        descriptor.set_value(ConfigParam::NumberOfTransforms, ConfigValue::Count(transforms)),
    )?;
    check(
        "set input distance",
        descriptor.set_value(ConfigParam::InputDistance, ConfigValue::Count(distance)),
    )?;
    check(
        "set output distance",
        descriptor.set_value(ConfigParam::OutputDistance, ConfigValue::Count(distance)),
    )?;
    check(
        "set placement",
        descriptor.set_value(
            ConfigParam::Placement,
            ConfigValue::Placement(Placement::InPlace),
        ),
    )?;
    check("commit descriptor", descriptor.commit())?;

    Ok(descriptor)
}

/// A committed descriptor
pub struct DescriptorPlan<T> {
    descriptor: Descriptor<T>,
}

impl<T: Real> TransformPlan<T> for DescriptorPlan<T> {
    fn execute(&self, buffer: &mut [Complex<T>]) -> Result<()> {
        check("compute forward", self.descriptor.compute_forward(buffer))
    }
}
