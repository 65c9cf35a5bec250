//! Error types for the todo API client and the store.
//!
//! # Design
//! Every way a remote call can fail is a `NetworkError`. A non-2xx status
//! renders as the operation's fixed failure message ("Failed to fetch
//! todos", ...) because that string is what ends up on screen. The raw
//! status and body are kept on the variant for logging.

use std::fmt;

use thiserror::Error;

/// The remote operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// User-facing message for a rejected request.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch todos",
            Operation::Create => "Failed to create todo",
            Operation::Update => "Failed to update todo",
            Operation::Delete => "Failed to delete todo",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors returned by effect handlers and `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The server answered with a non-2xx status.
    #[error("{}", .operation.failure_message())]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// The request never produced a response (DNS, connect, TLS, reset...).
    #[error("{0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Configuration could not be read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// The store loop is no longer running.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store loop has stopped")]
    Closed,
}
