//! Unified gateway error model and its HTTP mapping.
//! Both gateways return `GatewayResult<T>` from every operation; the HTTP layer
//! turns the error into a response in one place per gateway.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Unknown route")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Io { message: String },
    #[error("{message}")]
    CommandFailed { message: String },
    #[error("Unsupported OS: {name}")]
    UnsupportedOs { name: String },
    #[error("{message}")]
    Internal { message: String },
}

impl GatewayError {
    pub fn validation<S: Into<String>>(msg: S) -> Self { GatewayError::Validation(msg.into()) }
    pub fn io<S: Into<String>>(msg: S) -> Self { GatewayError::Io { message: msg.into() } }
    pub fn command<S: Into<String>>(msg: S) -> Self { GatewayError::CommandFailed { message: msg.into() } }
    pub fn unsupported<S: Into<String>>(name: S) -> Self { GatewayError::UnsupportedOs { name: name.into() } }
    pub fn internal<S: Into<String>>(msg: S) -> Self { GatewayError::Internal { message: msg.into() } }

    /// Short machine-readable code, used in logs.
    pub fn code_str(&self) -> &'static str {
        match self {
            GatewayError::NotFound => "not_found",
            GatewayError::Validation(_) => "validation",
            GatewayError::Io { .. } => "io",
            GatewayError::CommandFailed { .. } => "command_failed",
            GatewayError::UnsupportedOs { .. } => "unsupported_os",
            GatewayError::Internal { .. } => "internal",
        }
    }

    /// Text placed in the ERROR record or the `error` field.
    pub fn message(&self) -> String { self.to_string() }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            GatewayError::NotFound => 404,
            GatewayError::Validation(_) => 400,
            GatewayError::Io { .. }
            | GatewayError::CommandFailed { .. }
            | GatewayError::UnsupportedOs { .. }
            | GatewayError::Internal { .. } => 500,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Io { message: err.to_string() }
    }
}

impl From<base64::DecodeError> for GatewayError {
    fn from(err: base64::DecodeError) -> Self {
        GatewayError::Io { message: format!("invalid base64 content: {err}") }
    }
}

impl From<tokio::task::JoinError> for GatewayError {
    fn from(err: tokio::task::JoinError) -> Self {
        GatewayError::Internal { message: format!("worker task failed: {err}") }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
