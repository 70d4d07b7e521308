//! Query facade for the streaming token contract

use streamq_primitives::{Address, U256};

use crate::abi::Token;
use crate::client::RpcClient;
use crate::contract::{self, Contract};
use crate::types::BlockId;
use crate::SdkError;

/// Named read-only queries against one deployed streaming token contract.
///
/// Every address argument is checked for the canonical `0x` + 40 hex form
/// before anything is encoded, so a rejected address never reaches the
/// transport.
#[derive(Clone)]
pub struct StreamTokenQuery {
    client: RpcClient,
    contract: Contract,
    block: BlockId,
}

impl StreamTokenQuery {
    /// Create a facade for the contract at `contract_address`, querying `latest`
    pub fn new(client: RpcClient, contract_address: Address) -> Self {
        Self {
            client,
            contract: contract::stream_token(contract_address),
            block: BlockId::Latest,
        }
    }

    /// Query at `block` instead of `latest`
    pub fn with_block(mut self, block: BlockId) -> Self {
        self.block = block;
        self
    }

    /// Contract being queried
    pub fn contract_address(&self) -> &Address {
        self.contract.address()
    }

    /// Underlying RPC client
    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Token balance of `address`, in base units
    pub async fn get_token_balance(&self, address: &str) -> Result<U256, SdkError> {
        let owner = parse_address(address)?;
        let token = self.query("balanceOf", &[Token::Address(owner)]).await?;
        token
            .into_uint()
            .ok_or_else(|| unexpected_output("balanceOf", "uint256"))
    }

    /// Whether `user` may currently stream `content_id`
    pub async fn can_stream_content(&self, user: &str, content_id: &str) -> Result<bool, SdkError> {
        let user = parse_address(user)?;
        let token = self
            .query(
                "canStream",
                &[Token::Address(user), Token::String(content_id.to_string())],
            )
            .await?;
        token
            .into_bool()
            .ok_or_else(|| unexpected_output("canStream", "bool"))
    }

    /// Total token supply, in base units
    pub async fn total_supply(&self) -> Result<U256, SdkError> {
        let token = self.query("totalSupply", &[]).await?;
        token
            .into_uint()
            .ok_or_else(|| unexpected_output("totalSupply", "uint256"))
    }

    /// Unix timestamp at which `user`'s access to `content_id` ends (zero if none)
    pub async fn stream_expiry(&self, user: &str, content_id: &str) -> Result<U256, SdkError> {
        let user = parse_address(user)?;
        let token = self
            .query(
                "streamExpiry",
                &[Token::Address(user), Token::String(content_id.to_string())],
            )
            .await?;
        token
            .into_uint()
            .ok_or_else(|| unexpected_output("streamExpiry", "uint256"))
    }

    /// Contract owner
    pub async fn owner(&self) -> Result<Address, SdkError> {
        let token = self.query("owner", &[]).await?;
        token
            .into_address()
            .ok_or_else(|| unexpected_output("owner", "address"))
    }

    /// Address that receives platform fees
    pub async fn treasury_address(&self) -> Result<Address, SdkError> {
        let token = self.query("treasuryAddress", &[]).await?;
        token
            .into_address()
            .ok_or_else(|| unexpected_output("treasuryAddress", "address"))
    }

    /// Registered creator of `content_id` (zero address if unregistered)
    pub async fn content_creator(&self, content_id: &str) -> Result<Address, SdkError> {
        let token = self
            .query("contentCreators", &[Token::String(content_id.to_string())])
            .await?;
        token
            .into_address()
            .ok_or_else(|| unexpected_output("contentCreators", "address"))
    }

    /// Encode, call and decode a single-output function
    async fn query(&self, function: &str, args: &[Token]) -> Result<Token, SdkError> {
        let data = self.contract.encode_call(function, args)?;
        tracing::debug!(
            function,
            contract = %self.contract.address(),
            data = %hex::encode(&data),
            "encoded contract call"
        );

        let result = self
            .client
            .call(self.contract.address(), &data, self.block)
            .await?;

        let token = self
            .contract
            .decode_output(function, &result)?
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::MalformedAbiData(format!("{} returned no values", function)))?;
        tracing::debug!(function, result = ?token, "decoded contract result");
        Ok(token)
    }
}

fn parse_address(s: &str) -> Result<Address, SdkError> {
    Ok(Address::parse_canonical(s)?)
}

fn unexpected_output(function: &str, expected: &str) -> SdkError {
    SdkError::MalformedAbiData(format!("{} did not return a {}", function, expected))
}
