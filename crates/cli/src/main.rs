use std::process::ExitCode;

use clap::Parser;
use env_logger::init;
use log::warn;
use vfview_cli::{cli::Cli, run};

fn main() -> ExitCode {
    init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io) = e.print() {
                warn!("could not print usage: {io}");
            }
            // --help and -v are not failures
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    match run(cli) {
        Ok(failures) => {
            println!("Execution completed successfully.");
            println!("Fails = {failures}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
