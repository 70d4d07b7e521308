//! ABI type definitions

use std::fmt;

use streamq_primitives::{Address, U256};

/// Solidity ABI token types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits)
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    String(String),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
}

/// Solidity parameter types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Boolean
    Bool,
    /// UTF-8 string
    String,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::String | ParamType::Bytes)
    }

    /// Check whether `token` is a value of this type.
    ///
    /// Widths are not checked here; the encoder rejects out-of-range values.
    pub fn matches(&self, token: &Token) -> bool {
        matches!(
            (self, token),
            (ParamType::Address, Token::Address(_))
                | (ParamType::Uint(_), Token::Uint(_))
                | (ParamType::Bool, Token::Bool(_))
                | (ParamType::String, Token::String(_))
                | (ParamType::Bytes, Token::Bytes(_))
                | (ParamType::FixedBytes(_), Token::FixedBytes(_))
        )
    }
}

/// Canonical type name as used in function signatures
impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Bool => f.write_str("bool"),
            ParamType::String => f.write_str("string"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
        }
    }
}

impl Token {
    /// Get the type of this token
    pub fn type_of(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::Address,
            Token::Uint(_) => ParamType::Uint(256),
            Token::Bool(_) => ParamType::Bool,
            Token::String(_) => ParamType::String,
            Token::Bytes(_) => ParamType::Bytes,
            Token::FixedBytes(b) => ParamType::FixedBytes(b.len()),
        }
    }

    /// Take the address out of an address token
    pub fn into_address(self) -> Option<Address> {
        match self {
            Token::Address(addr) => Some(addr),
            _ => None,
        }
    }

    /// Take the value out of a uint token
    pub fn into_uint(self) -> Option<U256> {
        match self {
            Token::Uint(value) => Some(value),
            _ => None,
        }
    }

    /// Take the value out of a bool token
    pub fn into_bool(self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Take the string out of a string token
    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }
}
