//! Function signatures and selectors

use std::fmt;

use super::types::ParamType;
use crate::SdkError;

/// A function name plus its ordered parameter types.
///
/// Only used to derive the 4-byte selector and to check call arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    name: String,
    inputs: Vec<ParamType>,
}

impl FunctionSignature {
    /// Create a signature from a name and parameter types
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }

    /// Parse a signature such as `"canStream(address,string)"`
    pub fn parse(s: &str) -> Result<Self, SdkError> {
        let s = s.trim();
        let open = s
            .find('(')
            .ok_or_else(|| SdkError::InvalidArgumentList(format!("Missing '(' in signature: {}", s)))?;
        if !s.ends_with(')') {
            return Err(SdkError::InvalidArgumentList(format!(
                "Missing ')' in signature: {}",
                s
            )));
        }

        let name = &s[..open];
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            return Err(SdkError::InvalidArgumentList(format!(
                "Invalid function name: {:?}",
                name
            )));
        }

        let params = &s[open + 1..s.len() - 1];
        let inputs = if params.trim().is_empty() {
            Vec::new()
        } else {
            params
                .split(',')
                .map(parse_type)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self::new(name, inputs))
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter types, in order
    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    /// Canonical form: `name(type1,type2)` with no whitespace
    pub fn canonical(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|t| t.to_string()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// First 4 bytes of keccak256 of the canonical form
    pub fn selector(&self) -> [u8; 4] {
        function_selector(&self.canonical())
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = streamq_crypto::keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Parse a simple type string (e.g., "uint256", "address")
pub fn parse_type(s: &str) -> Result<ParamType, SdkError> {
    let s = s.trim();

    match s {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        _ => {}
    }

    // uint<N>
    if let Some(rest) = s.strip_prefix("uint") {
        let bits: usize = if rest.is_empty() {
            256
        } else {
            rest.parse()
                .map_err(|_| SdkError::InvalidArgumentList(format!("Invalid uint size: {}", rest)))?
        };
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return Err(SdkError::InvalidArgumentList(format!(
                "Invalid uint size: {}",
                bits
            )));
        }
        return Ok(ParamType::Uint(bits));
    }

    // bytes<N>
    if let Some(rest) = s.strip_prefix("bytes") {
        let size: usize = rest
            .parse()
            .map_err(|_| SdkError::InvalidArgumentList(format!("Invalid bytes size: {}", rest)))?;
        if size == 0 || size > 32 {
            return Err(SdkError::InvalidArgumentList(format!(
                "Invalid bytes size: {}",
                size
            )));
        }
        return Ok(ParamType::FixedBytes(size));
    }

    Err(SdkError::InvalidArgumentList(format!("Unknown type: {}", s)))
}
