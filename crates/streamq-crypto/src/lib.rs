//! # streamq-crypto
//!
//! Keccak-256, the only digest the ABI layer needs (function selectors).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::keccak256;
