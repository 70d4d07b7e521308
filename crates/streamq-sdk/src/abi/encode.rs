//! ABI encoding

use bytes::Bytes;
use streamq_primitives::U256;

use super::signature::FunctionSignature;
use super::types::{ParamType, Token};
use crate::SdkError;

/// Size of one ABI word
pub const WORD: usize = 32;

/// Encode tokens against their declared types.
///
/// Strictly positional: `tokens[i]` must be a value of `types[i]`.
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, SdkError> {
    if types.len() != tokens.len() {
        return Err(SdkError::InvalidArgumentList(format!(
            "Expected {} arguments, got {}",
            types.len(),
            tokens.len()
        )));
    }

    // Static types sit in the head; dynamic ones leave an offset there
    let head_size = types.len() * WORD;
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (index, (param_type, token)) in types.iter().zip(tokens).enumerate() {
        if !param_type.matches(token) {
            return Err(SdkError::InvalidArgumentList(format!(
                "Argument {} should be {}, got {}",
                index,
                param_type,
                token.type_of()
            )));
        }

        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend_from_slice(&encode_u256(&U256::from(offset)));
            tail.extend(encode_token(param_type, token)?);
        } else {
            head.extend(encode_token(param_type, token)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encode function call (selector + params)
pub fn encode_function_call(
    signature: &FunctionSignature,
    tokens: &[Token],
) -> Result<Bytes, SdkError> {
    let mut data = signature.selector().to_vec();
    data.extend(encode(signature.inputs(), tokens)?);
    Ok(Bytes::from(data))
}

/// Encode a single token
fn encode_token(param_type: &ParamType, token: &Token) -> Result<Vec<u8>, SdkError> {
    let encoded = match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; WORD];
            buf[12..].copy_from_slice(addr.as_bytes());
            buf.to_vec()
        }
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if value.bits() > *bits {
                return Err(SdkError::InvalidArgumentList(format!(
                    "Value {} does not fit in uint{}",
                    value, bits
                )));
            }
            encode_u256(value).to_vec()
        }
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; WORD];
            buf[WORD - 1] = u8::from(*b);
            buf.to_vec()
        }
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if data.len() != *size {
                return Err(SdkError::InvalidArgumentList(format!(
                    "Expected {} bytes for bytes{}, got {}",
                    size,
                    size,
                    data.len()
                )));
            }
            let mut buf = [0u8; WORD];
            buf[..data.len()].copy_from_slice(data);
            buf.to_vec()
        }
        (ParamType::Bytes, Token::Bytes(data)) => encode_bytes(data),
        (ParamType::String, Token::String(s)) => encode_bytes(s.as_bytes()),
        _ => {
            return Err(SdkError::InvalidArgumentList(format!(
                "Cannot encode {} as {}",
                token.type_of(),
                param_type
            )))
        }
    };
    Ok(encoded)
}

/// Encode a U256 as one big-endian word
fn encode_u256(value: &U256) -> [u8; WORD] {
    let mut bytes = [0u8; WORD];
    value.to_big_endian(&mut bytes);
    bytes
}

/// Encode dynamic bytes: length word, then data right-padded to a word boundary
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = encode_u256(&U256::from(data.len())).to_vec();

    let padded_len = data.len().div_ceil(WORD) * WORD;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamq_primitives::Address;

    #[test]
    fn test_encode_address() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let encoded = encode(&[ParamType::Address], &[Token::Address(addr)]).unwrap();

        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[..12], &[0u8; 12]);
        assert_eq!(&encoded[12..32], addr.as_bytes());
    }

    #[test]
    fn test_encode_uint_bounds() {
        let zero = encode(&[ParamType::Uint(256)], &[Token::Uint(U256::zero())]).unwrap();
        assert_eq!(zero, vec![0u8; 32]);

        let max = encode(&[ParamType::Uint(256)], &[Token::Uint(U256::MAX)]).unwrap();
        assert_eq!(max, vec![0xffu8; 32]);

        let hundred = encode(&[ParamType::Uint(256)], &[Token::Uint(U256::from(100))]).unwrap();
        assert_eq!(hundred[31], 100);
    }

    #[test]
    fn test_encode_uint_overflowing_width() {
        let result = encode(&[ParamType::Uint(8)], &[Token::Uint(U256::from(256))]);
        assert!(matches!(result, Err(SdkError::InvalidArgumentList(_))));

        let fits = encode(&[ParamType::Uint(8)], &[Token::Uint(U256::from(255))]).unwrap();
        assert_eq!(fits[31], 0xff);
    }

    #[test]
    fn test_encode_bool() {
        let encoded_true = encode(&[ParamType::Bool], &[Token::Bool(true)]).unwrap();
        let encoded_false = encode(&[ParamType::Bool], &[Token::Bool(false)]).unwrap();

        assert_eq!(encoded_true[31], 1);
        assert!(encoded_true[..31].iter().all(|b| *b == 0));
        assert_eq!(encoded_false, vec![0u8; 32]);
    }

    #[test]
    fn test_encode_bytes4() {
        let encoded = encode(&[ParamType::FixedBytes(4)], &[Token::FixedBytes(vec![1, 2, 3, 4])]).unwrap();
        assert_eq!(&encoded[..4], &[1, 2, 3, 4]);
        assert!(encoded[4..].iter().all(|b| *b == 0));

        let wrong = encode(&[ParamType::FixedBytes(4)], &[Token::FixedBytes(vec![1, 2])]);
        assert!(wrong.is_err());
    }

    #[test]
    fn test_encode_dynamic_bytes() {
        let data = vec![0x01, 0x02, 0x03];
        let encoded = encode(&[ParamType::Bytes], &[Token::Bytes(data.clone())]).unwrap();

        // offset (32) + length (32) + padded data (32)
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 32);
        assert_eq!(encoded[63], 3);
        assert_eq!(&encoded[64..67], &data[..]);
    }

    #[test]
    fn test_encode_address_then_string() {
        // canStream(address,string) argument block
        let user = Address::from_hex("0x1234567890123456789012345678901234567890").unwrap();
        let encoded = encode(
            &[ParamType::Address, ParamType::String],
            &[Token::Address(user), Token::String("content_001".into())],
        )
        .unwrap();

        // address word + offset word + length word + one data word
        assert_eq!(encoded.len(), 128);
        assert_eq!(&encoded[12..32], user.as_bytes());
        assert_eq!(encoded[63], 64); // tail starts after the two head words
        assert_eq!(encoded[95], 11);
        assert_eq!(&encoded[96..107], b"content_001");
        assert!(encoded[107..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_empty_string() {
        let encoded = encode(&[ParamType::String], &[Token::String(String::new())]).unwrap();
        // offset + zero length, no data words
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 32);
        assert_eq!(&encoded[32..], &[0u8; 32]);
    }

    #[test]
    fn test_encode_string_exact_word() {
        let s = "a".repeat(32);
        let encoded = encode(&[ParamType::String], &[Token::String(s)]).unwrap();
        assert_eq!(encoded.len(), 96);
    }

    #[test]
    fn test_encode_argument_count_mismatch() {
        let result = encode(&[ParamType::Address, ParamType::String], &[Token::Address(Address::ZERO)]);
        assert!(matches!(result, Err(SdkError::InvalidArgumentList(_))));
    }

    #[test]
    fn test_encode_argument_type_mismatch() {
        let result = encode(&[ParamType::Address], &[Token::Bool(true)]);
        match result {
            Err(SdkError::InvalidArgumentList(msg)) => {
                assert!(msg.contains("address"));
                assert!(msg.contains("bool"));
            }
            other => panic!("expected InvalidArgumentList, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_function_call() {
        let to = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let signature = FunctionSignature::parse("transfer(address,uint256)").unwrap();
        let encoded = encode_function_call(
            &signature,
            &[Token::Address(to), Token::Uint(U256::from(1000))],
        )
        .unwrap();

        // 4 bytes selector + 32 bytes address + 32 bytes uint
        assert_eq!(encoded.len(), 68);
        assert_eq!(&encoded[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_encode_function_call_no_args() {
        let signature = FunctionSignature::parse("totalSupply()").unwrap();
        let encoded = encode_function_call(&signature, &[]).unwrap();
        assert_eq!(&encoded[..], &[0x18, 0x16, 0x0d, 0xdd]);
    }
}
