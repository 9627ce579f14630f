//! Podwire binary entry point.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use podwire_cli::{Cli, logging};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut stdout = io::stdout().lock();
    match podwire_cli::run(&cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "request not prepared");
            let _ = writeln!(io::stderr(), "Error: {err}");
            ExitCode::FAILURE
        },
    }
}
