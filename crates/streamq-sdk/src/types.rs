//! RPC request types

use std::str::FromStr;

use bytes::Bytes;
use serde::Serialize;
use streamq_primitives::Address;

use crate::SdkError;

/// Block identifier for RPC queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block (the node's current head)
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
    /// Safe block (finalized by consensus)
    Safe,
    /// Finalized block
    Finalized,
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&format!("0x{:x}", n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
            BlockId::Safe => serializer.serialize_str("safe"),
            BlockId::Finalized => serializer.serialize_str("finalized"),
        }
    }
}

/// Accepts a tag, a decimal block number, or a `0x` hex block number
impl FromStr for BlockId {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockId::Latest),
            "pending" => Ok(BlockId::Pending),
            "earliest" => Ok(BlockId::Earliest),
            "safe" => Ok(BlockId::Safe),
            "finalized" => Ok(BlockId::Finalized),
            _ => {
                let number = match s.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => s.parse(),
                };
                number
                    .map(BlockId::Number)
                    .map_err(|_| SdkError::Serialization(format!("Invalid block reference: {}", s)))
            }
        }
    }
}

/// Call request for eth_call
#[derive(Debug, Clone, Default)]
pub struct CallRequest {
    /// Sender address
    pub from: Option<Address>,
    /// Contract address
    pub to: Option<Address>,
    /// Input data
    pub data: Option<Bytes>,
}

impl Serialize for CallRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let count = [self.from.is_some(), self.to.is_some(), self.data.is_some()]
            .iter()
            .filter(|present| **present)
            .count();

        let mut map = serializer.serialize_map(Some(count))?;

        if let Some(from) = &self.from {
            map.serialize_entry("from", from)?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("to", to)?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", &format!("0x{}", hex::encode(data)))?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_serialize() {
        assert_eq!(serde_json::to_string(&BlockId::Latest).unwrap(), "\"latest\"");
        assert_eq!(serde_json::to_string(&BlockId::Number(100)).unwrap(), "\"0x64\"");
        assert_eq!(serde_json::to_string(&BlockId::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_block_id_default_is_latest() {
        assert_eq!(BlockId::default(), BlockId::Latest);
    }

    #[test]
    fn test_block_id_from_str() {
        assert_eq!("latest".parse::<BlockId>().unwrap(), BlockId::Latest);
        assert_eq!("finalized".parse::<BlockId>().unwrap(), BlockId::Finalized);
        assert_eq!("100".parse::<BlockId>().unwrap(), BlockId::Number(100));
        assert_eq!("0x64".parse::<BlockId>().unwrap(), BlockId::Number(100));
        assert!("tomorrow".parse::<BlockId>().is_err());
    }

    #[test]
    fn test_call_request_serialize() {
        let req = CallRequest {
            to: Some(Address::ZERO),
            data: Some(Bytes::from(vec![0x70, 0xa0, 0x82, 0x31])),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["to"], "0x0000000000000000000000000000000000000000");
        assert_eq!(json["data"], "0x70a08231");
        assert!(json.get("from").is_none()); // None fields skipped
    }
}
