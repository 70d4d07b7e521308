//! Gateway configuration
//!
//! Layered lowest to highest: built-in defaults, optional TOML file,
//! environment, command-line flags.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use streamq_sdk::types::BlockId;
use streamq_sdk::Address;

use crate::cli::Cli;
use crate::error::ConfigError;

/// JSON-RPC endpoint URL
pub const ENV_RPC_URL: &str = "WEB3_PROVIDER_URL";
/// Token contract address
pub const ENV_CONTRACT_ADDRESS: &str = "TOKEN_CONTRACT_ADDRESS";
/// HTTP listen address
pub const ENV_LISTEN_ADDR: &str = "GATEWAY_LISTEN_ADDR";

/// Endpoint used when no RPC URL is configured anywhere
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Gateway configuration, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// JSON-RPC endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// Token contract address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Per-request RPC timeout in seconds, 0 to disable
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Block to query
    #[serde(default = "default_block")]
    pub block: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_block() -> String {
    "latest".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            contract_address: None,
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout_secs(),
            block: default_block(),
        }
    }
}

/// Validated settings the gateway runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Token contract address
    pub contract_address: Address,
    /// HTTP listen address
    pub listen_addr: SocketAddr,
    /// Per-request RPC deadline
    pub request_timeout: Option<Duration>,
    /// Block to query
    pub block: BlockId,
}

impl GatewayConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Full layered load: file named by `--config`, then `env`, then flags.
    ///
    /// `env` is the variable lookup, `std::env::var(..).ok()` in production.
    pub fn load<F>(cli: &Cli, env: F) -> Result<GatewaySettings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env);
        config.apply_cli(cli);
        config.resolve()
    }

    /// Override fields from environment variables; empty values are ignored
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_RPC_URL) {
            self.rpc_url = Some(url);
        }
        if let Some(address) = lookup(ENV_CONTRACT_ADDRESS) {
            self.contract_address = Some(address);
        }
        if let Some(listen) = lookup(ENV_LISTEN_ADDR) {
            self.listen_addr = listen;
        }
    }

    /// Override fields from command-line flags
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.rpc_url {
            self.rpc_url = Some(url.clone());
        }
        if let Some(address) = &cli.contract {
            self.contract_address = Some(address.clone());
        }
        if let Some(listen) = &cli.listen {
            self.listen_addr = listen.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.request_timeout_secs = timeout;
        }
        if let Some(block) = &cli.block {
            self.block = block.clone();
        }
    }

    /// Validate into [`GatewaySettings`]
    pub fn resolve(self) -> Result<GatewaySettings, ConfigError> {
        let rpc_url = match self.rpc_url {
            Some(url) => url,
            None => {
                tracing::warn!(
                    "{} not set, falling back to {}",
                    ENV_RPC_URL,
                    DEFAULT_RPC_URL
                );
                DEFAULT_RPC_URL.to_string()
            }
        };

        let contract_text = self
            .contract_address
            .ok_or(ConfigError::MissingContractAddress)?;
        let contract_address = Address::parse_canonical(&contract_text)
            .map_err(|e| ConfigError::InvalidContractAddress(format!("{}: {}", contract_text, e)))?;

        let listen_addr = self
            .listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(self.listen_addr.clone()))?;

        let block = self
            .block
            .parse()
            .map_err(|_| ConfigError::InvalidBlock(self.block.clone()))?;

        let request_timeout = match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(GatewaySettings {
            rpc_url,
            contract_address,
            listen_addr,
            request_timeout,
            block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn no_flags() -> Cli {
        Cli {
            config: None,
            rpc_url: None,
            contract: None,
            listen: None,
            timeout: None,
            block: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    #[test]
    fn test_config_default() {
        let config = GatewayConfig::default();
        assert!(config.rpc_url.is_none());
        assert!(config.contract_address.is_none());
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.block, "latest");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            rpc_url = "http://example.com:8545"
            contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        "#;
        let config = GatewayConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.rpc_url.as_deref(), Some("http://example.com:8545"));
        assert_eq!(config.contract_address.as_deref(), Some(CONTRACT));
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_config_deserialize_invalid() {
        let result = GatewayConfig::from_toml_str("request_timeout_secs = \"soon\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_serialize() {
        let toml = toml::to_string(&GatewayConfig::default()).unwrap();
        assert!(toml.contains("listen_addr"));
        assert!(toml.contains("block"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = GatewayConfig {
            rpc_url: Some("http://file:8545".to_string()),
            ..Default::default()
        };
        config.apply_env(env_from(&[
            (ENV_RPC_URL, "http://env:8545"),
            (ENV_CONTRACT_ADDRESS, CONTRACT),
            (ENV_LISTEN_ADDR, "127.0.0.1:8080"),
        ]));

        assert_eq!(config.rpc_url.as_deref(), Some("http://env:8545"));
        assert_eq!(config.contract_address.as_deref(), Some(CONTRACT));
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let mut config = GatewayConfig::default();
        config.apply_env(env_from(&[(ENV_RPC_URL, "  ")]));
        assert!(config.rpc_url.is_none());
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config = GatewayConfig::default();
        config.apply_env(env_from(&[(ENV_RPC_URL, "http://env:8545")]));
        config.apply_cli(&Cli {
            rpc_url: Some("http://flag:8545".to_string()),
            timeout: Some(0),
            block: Some("finalized".to_string()),
            ..no_flags()
        });

        assert_eq!(config.rpc_url.as_deref(), Some("http://flag:8545"));
        assert_eq!(config.request_timeout_secs, 0);
        assert_eq!(config.block, "finalized");
    }

    #[test]
    fn test_resolve_defaults_rpc_url() {
        let settings = GatewayConfig::load(&no_flags(), env_from(&[(ENV_CONTRACT_ADDRESS, CONTRACT)]))
            .unwrap();

        assert_eq!(settings.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(settings.contract_address, Address::parse_canonical(CONTRACT).unwrap());
        assert_eq!(settings.listen_addr.port(), 3000);
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(settings.block, BlockId::Latest);
    }

    #[test]
    fn test_resolve_missing_contract() {
        let result = GatewayConfig::load(&no_flags(), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingContractAddress)));
    }

    #[test]
    fn test_resolve_invalid_values() {
        let bad_contract = GatewayConfig {
            contract_address: Some("0x1234".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_contract.resolve(),
            Err(ConfigError::InvalidContractAddress(_))
        ));

        let bad_listen = GatewayConfig {
            contract_address: Some(CONTRACT.to_string()),
            listen_addr: "localhost".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_listen.resolve(), Err(ConfigError::InvalidListenAddr(_))));

        let bad_block = GatewayConfig {
            contract_address: Some(CONTRACT.to_string()),
            block: "tomorrow".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_block.resolve(), Err(ConfigError::InvalidBlock(_))));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = GatewayConfig {
            contract_address: Some(CONTRACT.to_string()),
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.resolve().unwrap().request_timeout, None);
    }
}
