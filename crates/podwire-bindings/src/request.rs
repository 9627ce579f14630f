//! Request lines handed to the transport.

use std::fmt;

use podwire_params::ParameterSet;

/// HTTP method of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// A prepared request: what to call and with which parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    params: ParameterSet,
}

impl Request {
    /// Request for `path`, relative to the service base URL.
    pub fn new(method: Method, path: impl Into<String>, params: ParameterSet) -> Self {
        Self { method, path: path.into(), params }
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Escaped path, without query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Encoded parameters.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Path plus query string. The `?` is omitted when there are no
    /// parameters.
    pub fn uri(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params)
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri())
    }
}
