//! Command-line surface of the `batchfft` binary

use clap::Parser;

use crate::config::BenchmarkConfig;
use crate::error::Result;
use crate::options::{PlanningMode, Precision, RunOptions, StrategyKind};

/// Time one batch of forward complex FFTs and print the result as CSV.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Number of signals in the batch
    #[arg(short, long)]
    pub batch: usize,

    /// Samples per signal
    #[arg(short, long)]
    pub length: usize,

    /// Threads to use for the transforms
    #[arg(short, long)]
    pub threads: usize,

    /// How the batch is handed to the transform library
    #[arg(short, long, value_enum, default_value_t = StrategyKind::ManualParallel)]
    pub strategy: StrategyKind,

    /// Sample precision [default: double for native-batch, single otherwise]
    #[arg(short, long, value_enum)]
    pub precision: Option<Precision>,

    /// Planning effort [default: measure for native-batch, estimate otherwise]
    #[arg(long, value_enum)]
    pub planning: Option<PlanningMode>,
}

impl Args {
    /// Validates the parsed values into a run configuration and its options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BenchError::Configuration`] if batch, length or threads is zero.
    pub fn into_invocation(self) -> Result<(BenchmarkConfig, RunOptions)> {
        let config = BenchmarkConfig::new(self.batch, self.length, self.threads)?;
        let mut options = RunOptions::new(self.strategy);
        options.precision = self.precision;
        options.planning = self.planning;
        Ok((config, options))
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    use super::*;
    use crate::error::BenchError;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("batchfft").chain(args.iter().copied()))
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn short_flags_with_defaults() {
        let (config, options) = parse(&["-b", "16", "-l", "1024", "-t", "4"])
            .unwrap()
            .into_invocation()
            .unwrap();

        assert_eq!(config, BenchmarkConfig::new(16, 1024, 4).unwrap());
        assert_eq!(options.strategy, StrategyKind::ManualParallel);
        assert_eq!(options.precision(), Precision::Single);
        assert_eq!(options.planning(), PlanningMode::Estimate);
    }

    #[test]
    fn long_flags_and_overrides() {
        let (config, options) = parse(&[
            "--batch=3",
            "--length",
            "5",
            "--threads",
            "8",
            "--strategy",
            "native-batch",
            "--precision",
            "single",
            "--planning",
            "estimate",
        ])
        .unwrap()
        .into_invocation()
        .unwrap();

        assert_eq!(
            (config.batch(), config.length(), config.threads()),
            (3, 5, 8)
        );
        assert_eq!(options.strategy, StrategyKind::NativeBatch);
        assert_eq!(options.precision(), Precision::Single);
        assert_eq!(options.planning(), PlanningMode::Estimate);
    }

    #[test]
    fn zero_values_are_configuration_errors() {
        let err = parse(&["-b", "0", "-l", "1024", "-t", "4"])
            .unwrap()
            .into_invocation()
            .unwrap_err();
        assert!(matches!(err, BenchError::Configuration(_)));
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn malformed_input_is_rejected_by_the_parser() {
        let cases: [(&[&str], ErrorKind); 3] = [
            (&["-b", "16", "-l", "1024"], ErrorKind::MissingRequiredArgument),
            (&["-b", "16", "-l", "abc", "-t", "4"], ErrorKind::ValueValidation),
            (&["-b", "1", "-l", "8", "-t", "1", "--bogus"], ErrorKind::UnknownArgument),
        ];
        for (args, kind) in cases {
            let err = parse(args).unwrap_err();
            assert_eq!(err.kind(), kind, "{args:?}");
        }

        assert!(parse(&["-b", "-3", "-l", "8", "-t", "1"]).is_err());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let err = parse(&["-b", "1", "-l", "8", "-t", "1", "-s", "fastest"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
