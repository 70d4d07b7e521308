//! ABI decoding

use streamq_primitives::{Address, U256};

use super::encode::WORD;
use super::types::{ParamType, Token};
use crate::SdkError;

/// Decode tokens from ABI-encoded data.
///
/// Returns exactly one token per declared type, or an error; never a
/// partial result.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    let required = types.len() * WORD;
    check_length(data, required)?;

    types
        .iter()
        .enumerate()
        .map(|(index, param_type)| decode_token(param_type, data, index * WORD))
        .collect()
}

/// Decode a single value from the start of `data`
pub fn decode_one(param_type: &ParamType, data: &[u8]) -> Result<Token, SdkError> {
    let mut tokens = decode(std::slice::from_ref(param_type), data)?;
    tokens
        .pop()
        .ok_or_else(|| SdkError::MalformedAbiData("No value decoded".to_string()))
}

/// Decode a single token whose head word starts at `offset`
fn decode_token(param_type: &ParamType, data: &[u8], offset: usize) -> Result<Token, SdkError> {
    let word = read_word(data, offset)?;

    match param_type {
        ParamType::Address => {
            let mut addr_bytes = [0u8; 20];
            addr_bytes.copy_from_slice(&word[12..]);
            Ok(Token::Address(Address::from_bytes(addr_bytes)))
        }
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(word);
            if value.bits() > *bits {
                return Err(SdkError::MalformedAbiData(format!(
                    "Value {} does not fit in uint{}",
                    value, bits
                )));
            }
            Ok(Token::Uint(value))
        }
        // Permissive: any non-zero word is true
        ParamType::Bool => Ok(Token::Bool(word.iter().any(|b| *b != 0))),
        ParamType::FixedBytes(size) => Ok(Token::FixedBytes(word[..*size].to_vec())),
        ParamType::Bytes => {
            let tail = word_to_usize(word)?;
            Ok(Token::Bytes(decode_bytes(data, tail)?))
        }
        ParamType::String => {
            let tail = word_to_usize(word)?;
            let bytes = decode_bytes(data, tail)?;
            let s = String::from_utf8(bytes)
                .map_err(|e| SdkError::MalformedAbiData(format!("Invalid UTF-8: {}", e)))?;
            Ok(Token::String(s))
        }
    }
}

/// Decode dynamic bytes from the tail at `offset` (length word, then data)
fn decode_bytes(data: &[u8], offset: usize) -> Result<Vec<u8>, SdkError> {
    let len = word_to_usize(read_word(data, offset)?)?;
    let start = offset + WORD;
    let end = start
        .checked_add(len)
        .ok_or_else(|| SdkError::MalformedAbiData(format!("Length overflow: {}", len)))?;
    check_length(data, end)?;
    Ok(data[start..end].to_vec())
}

/// Borrow the word at `offset`
fn read_word(data: &[u8], offset: usize) -> Result<&[u8], SdkError> {
    let end = offset
        .checked_add(WORD)
        .ok_or_else(|| SdkError::MalformedAbiData(format!("Offset overflow: {}", offset)))?;
    check_length(data, end)?;
    Ok(&data[offset..end])
}

/// Interpret a word as an offset or length.
///
/// Anything above `u32::MAX` cannot index a real payload.
fn word_to_usize(word: &[u8]) -> Result<usize, SdkError> {
    let value = U256::from_big_endian(word);
    if value > U256::from(u32::MAX) {
        return Err(SdkError::MalformedAbiData(format!(
            "Offset or length out of range: {}",
            value
        )));
    }
    Ok(value.low_u64() as usize)
}

/// Check that data has at least `required` bytes
fn check_length(data: &[u8], required: usize) -> Result<(), SdkError> {
    if data.len() < required {
        return Err(SdkError::MalformedAbiData(format!(
            "Insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}
