//! Error types for client operations.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The remote operation an application error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Put,
    Get,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Put => f.write_str("put"),
            Operation::Get => f.write_str("get"),
            Operation::Delete => f.write_str("delete"),
        }
    }
}

/// Which side of the wire an [`Error`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call did not complete: dial failure, broken connection, deadline,
    /// or a non-OK gRPC status.
    Transport,
    /// The call completed but the server reported a failure in the response.
    Application,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid server address {addr:?}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("gRPC transport error: {0}")]
    Connect(#[from] tonic::transport::Error),

    #[error("gRPC status error: {0}")]
    Status(#[from] tonic::Status),

    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("{op} failed: {message}")]
    Application { op: Operation, message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Application { .. } => ErrorKind::Application,
            Error::InvalidAddress { .. }
            | Error::Connect(_)
            | Error::Status(_)
            | Error::Timeout(_) => ErrorKind::Transport,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    pub fn is_application(&self) -> bool {
        self.kind() == ErrorKind::Application
    }
}
