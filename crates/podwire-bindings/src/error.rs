//! Binding error types.

use podwire_params::ParamsError;
use thiserror::Error;

/// Result alias for bindings.
pub type Result<T> = std::result::Result<T, BindingError>;

/// Errors raised while preparing a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The option struct could not be encoded; nothing should be sent.
    #[error(transparent)]
    Params(#[from] ParamsError),

    /// A required path argument was empty.
    #[error("missing {0}")]
    MissingArgument(&'static str),
}
