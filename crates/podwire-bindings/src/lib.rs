//! Container engine bindings for pods.
//!
//! Each binding takes a [`Connection`], the pod it targets and an option
//! struct, and produces the [`Request`] the transport should send. Option
//! structs only put fields on the wire that the caller assigned, so the
//! engine keeps its own defaults for everything else.
//!
//! # Components
//!
//! - [`Connection`]: service base URL plus the shared option [`Registry`]
//! - [`Request`]: method, path and encoded query parameters
//! - [`pods`]: pod endpoints and their option structs
//! - [`error`]: binding error types
//!
//! Transport, retries and response decoding live elsewhere.

pub mod connection;
pub mod error;
pub mod pods;
pub mod request;

pub use connection::Connection;
pub use error::{BindingError, Result};
pub use podwire_params::{OptionStruct, ParameterSet, Registry};
pub use request::{Method, Request};
