//! Podwire command line client.
//!
//! Parses pod subcommands, binds the given flags onto option structs, and
//! prints the prepared request as `METHOD url` without sending it.

#![forbid(unsafe_code)]

pub mod bind;
pub mod cli;
pub mod error;
pub mod logging;

use std::io::Write;

pub use cli::Cli;
pub use error::{CliError, Result};
use podwire_bindings::Connection;
use tracing::info;

use crate::cli::Command;

/// Run a parsed command, writing the request line to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let conn = Connection::new(cli.url.as_str());
    let request = match &cli.command {
        Command::Pod(command) => bind::pod_request(&conn, command)?,
    };

    info!(method = %request.method(), path = request.path(), "request prepared");
    writeln!(out, "{} {}", request.method(), conn.url(&request))?;
    Ok(())
}
