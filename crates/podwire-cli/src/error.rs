//! CLI errors.

use podwire_bindings::BindingError;
use thiserror::Error;

/// Errors raised while turning command line input into a request.
#[derive(Error, Debug)]
pub enum CliError {
    /// A binding refused the options.
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// A `KEY=VALUE` flag value had no `=` or an empty key.
    #[error("invalid --{flag} value {value:?}: expected KEY=VALUE")]
    InvalidKeyValue {
        /// Flag name, without dashes
        flag: &'static str,
        /// Value as given
        value: String,
    },

    /// Writing the request line failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
