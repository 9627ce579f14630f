//! Pod endpoints.
//!
//! Every binding encodes its option struct first and fails before producing a
//! request if encoding fails, so a partially encoded request never reaches the
//! transport.

mod types;

pub use types::{
    CreateOptions, InspectOptions, KillOptions, ListOptions, PortMapping, RemoveOptions,
    StatsOptions, StopOptions, TopOptions,
};

use podwire_params::{OptionStruct, escape_component};
use tracing::debug;

use crate::{
    connection::Connection,
    error::{BindingError, Result},
    request::{Method, Request},
};

/// Create a pod.
pub fn create(conn: &Connection, options: &CreateOptions) -> Result<Request> {
    prepare(conn, Method::Post, "/pods/create".to_string(), options)
}

/// Inspect one pod.
pub fn inspect(conn: &Connection, name_or_id: &str, options: &InspectOptions) -> Result<Request> {
    prepare(conn, Method::Get, pod_path(name_or_id, Some("json"))?, options)
}

/// Send a signal to every container in a pod.
pub fn kill(conn: &Connection, name_or_id: &str, options: &KillOptions) -> Result<Request> {
    prepare(conn, Method::Post, pod_path(name_or_id, Some("kill"))?, options)
}

/// List pods.
pub fn list(conn: &Connection, options: &ListOptions) -> Result<Request> {
    prepare(conn, Method::Get, "/pods/json".to_string(), options)
}

/// Remove a pod.
pub fn remove(conn: &Connection, name_or_id: &str, options: &RemoveOptions) -> Result<Request> {
    prepare(conn, Method::Delete, pod_path(name_or_id, None)?, options)
}

/// Resource statistics for pods.
pub fn stats(conn: &Connection, options: &StatsOptions) -> Result<Request> {
    prepare(conn, Method::Get, "/pods/stats".to_string(), options)
}

/// Stop a pod.
pub fn stop(conn: &Connection, name_or_id: &str, options: &StopOptions) -> Result<Request> {
    prepare(conn, Method::Post, pod_path(name_or_id, Some("stop"))?, options)
}

/// List the processes running in a pod.
pub fn top(conn: &Connection, name_or_id: &str, options: &TopOptions) -> Result<Request> {
    prepare(conn, Method::Get, pod_path(name_or_id, Some("top"))?, options)
}

fn pod_path(name_or_id: &str, action: Option<&str>) -> Result<String> {
    if name_or_id.is_empty() {
        return Err(BindingError::MissingArgument("pod name or ID"));
    }

    let pod = escape_component(name_or_id);
    Ok(match action {
        Some(action) => format!("/pods/{pod}/{action}"),
        None => format!("/pods/{pod}"),
    })
}

fn prepare<O: OptionStruct>(
    conn: &Connection,
    method: Method,
    path: String,
    options: &O,
) -> Result<Request> {
    let params = options.to_params(conn.registry())?;
    debug!(%method, %path, params = params.len(), "prepared pod request");
    Ok(Request::new(method, path, params))
}
