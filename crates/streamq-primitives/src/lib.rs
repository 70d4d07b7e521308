//! # streamq-primitives
//!
//! Primitive types shared by the streamq crates: the 20-byte [`Address`],
//! the 32-byte [`H256`] digest, and the arbitrary-precision [`U256`] used for
//! every ABI integer.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_exceeds_u128() {
        let big = U256::from(u128::MAX) + U256::from(1u8);
        assert_eq!(big.bits(), 129);
        assert_eq!(
            big.to_string(),
            "340282366920938463463374607431768211456"
        );
    }
}
