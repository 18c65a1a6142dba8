use jsonrpsee::{core::Error as ClientError, types::error::CallError};
use std::time::Duration;
use thiserror::Error;

use crate::sanitize_error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HarnessError {
    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Node rejected {method}: [{code}] {message}")]
    NodeRejected { method: String, code: i32, message: String },

    #[error("RPC request timed out")]
    RequestTimeout,

    #[error("Step '{step}' did not complete within {timeout:?}")]
    StepTimeout { step: String, timeout: Duration },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Arithmetic error: {0}")]
    ArithmeticError(String),

    #[error("Balance mismatch for {address} at '{tag}': expected {expected}, got {actual}")]
    BalanceMismatch { address: String, tag: String, expected: String, actual: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl HarnessError {
    pub fn rejected(method: &str, code: i32, message: impl Into<String>) -> Self {
        HarnessError::NodeRejected { method: method.to_string(), code, message: message.into() }
    }

    /// True when the node answered with a JSON-RPC error object.
    pub fn is_node_rejection(&self) -> bool {
        matches!(self, HarnessError::NodeRejected { .. })
    }
}

/// Maps a jsonrpsee client error for `method` into the harness taxonomy.
pub fn from_client_error(method: &str, e: ClientError) -> HarnessError {
    match e {
        ClientError::Call(CallError::Custom(err)) => {
            HarnessError::rejected(method, err.code(), sanitize_error!(err.message()))
        }
        ClientError::Call(CallError::InvalidParams(err)) => {
            HarnessError::rejected(method, -32602, sanitize_error!(err))
        }
        ClientError::RequestTimeout => HarnessError::RequestTimeout,
        ClientError::ParseError(err) => {
            HarnessError::InvalidResponse(format!("{method}: {}", sanitize_error!(err)))
        }
        other => HarnessError::RpcError(format!("{method}: {}", sanitize_error!(other))),
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::InvalidResponse(sanitize_error!(e))
    }
}

impl From<alloy::signers::Error> for HarnessError {
    fn from(e: alloy::signers::Error) -> Self {
        HarnessError::SigningError(sanitize_error!(e))
    }
}

impl From<tokio::time::error::Elapsed> for HarnessError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        HarnessError::RequestTimeout
    }
}
