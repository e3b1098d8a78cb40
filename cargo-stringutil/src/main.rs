//! CLI entrypoint for `cargo-stringutil`.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use cargo_stringutil::cli::{self, Args};
use cargo_stringutil::{logging, run};

fn main() -> ExitCode {
    let args = Args::parse_from(cli::strip_subcommand(std::env::args_os()));
    logging::init(args.verbose);

    match run(&args) {
        Ok(report) => {
            match report.emitted {
                Some(unit) => tracing::info!(path = %unit.path, functions = unit.functions, "unit ready"),
                None => tracing::info!("no marked declarations"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Nothing else to do if stderr is gone; the exit code still reports failure.
            let _ignored = writeln!(std::io::stderr().lock(), "error: {err}");
            ExitCode::FAILURE
        }
    }
}
