//! SDK error types

use streamq_primitives::AddressError;
use thiserror::Error;

/// SDK error type
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Address text is not `0x` followed by 40 hex characters
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Call arguments do not match the declared parameter list
    #[error("Invalid argument list: {0}")]
    InvalidArgumentList(String),

    /// Returned bytes do not fit the requested output types
    #[error("Malformed ABI data: {0}")]
    MalformedAbiData(String),

    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object (e.g. a revert)
    #[error("Contract call error: {message} (code {code})")]
    ContractCall {
        /// Error code
        code: i64,
        /// Node-supplied message
        message: String,
        /// Revert payload, if the node returned one
        data: Option<String>,
    },

    /// The call succeeded but returned no bytes at all
    #[error("Empty result: the node returned no data")]
    EmptyResult,

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SdkError {
    /// True for errors the caller must fix (bad input), detected before any
    /// network interaction.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            SdkError::InvalidAddress(_) | SdkError::InvalidArgumentList(_)
        )
    }
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<AddressError> for SdkError {
    fn from(e: AddressError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}
