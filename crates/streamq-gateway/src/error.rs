//! Gateway error types

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors, reported once at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No contract address in file, environment, or flags
    #[error("contract address is not configured (set TOKEN_CONTRACT_ADDRESS or --contract)")]
    MissingContractAddress,

    /// Contract address is not `0x` followed by 40 hex characters
    #[error("invalid contract address: {0}")]
    InvalidContractAddress(String),

    /// Listen address is not `host:port`
    #[error("invalid listen address: {0}")]
    InvalidListenAddr(String),

    /// Block reference is not a tag or a number
    #[error("invalid block reference: {0}")]
    InvalidBlock(String),
}

/// Gateway runtime errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Server bind error
    #[error("failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// SDK error raised while building the query stack
    #[error("SDK error: {0}")]
    Sdk(#[from] streamq_sdk::SdkError),
}

/// Gateway result type
pub type GatewayResult<T> = Result<T, GatewayError>;
