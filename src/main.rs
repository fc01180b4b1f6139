use std::process::ExitCode;

use batchfft::cli::Args;
use batchfft::{run, BenchError, Report, CSV_HEADER};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let result = args
        .into_invocation()
        .and_then(|(config, options)| Ok((config, run(&config, &options)?)));

    match result {
        Ok((config, metrics)) => {
            println!("{CSV_HEADER}");
            println!("{}", Report::new(config, metrics));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            if let BenchError::Configuration(_) = e {
                eprintln!("{}", Args::command().render_usage());
            }
            e.exit_code()
        }
    }
}
