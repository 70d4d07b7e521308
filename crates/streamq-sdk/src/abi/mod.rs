//! ABI encoding and decoding for Solidity contracts
//!
//! This module provides functionality for:
//! - Encoding function calls
//! - Decoding function return values
//! - Computing function selectors
//!
//! # Example
//!
//! ```rust
//! use streamq_sdk::abi::{decode, encode_function_call, FunctionSignature, ParamType, Token};
//! use streamq_sdk::{Address, U256};
//!
//! let owner = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
//! let signature = FunctionSignature::parse("balanceOf(address)").unwrap();
//! let data = encode_function_call(&signature, &[Token::Address(owner)]).unwrap();
//! assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
//!
//! let return_data = [0u8; 32]; // From eth_call
//! let balance = decode(&[ParamType::Uint(256)], &return_data).unwrap();
//! assert_eq!(balance[0], Token::Uint(U256::zero()));
//! ```

mod decode;
mod encode;
mod signature;
mod types;

pub use decode::{decode, decode_one};
pub use encode::{encode, encode_function_call, WORD};
pub use signature::{function_selector, parse_type, FunctionSignature};
pub use types::{ParamType, Token};
