//! Contract interaction helpers

use bytes::Bytes;
use streamq_primitives::Address;

use crate::abi::{decode, encode_function_call, FunctionSignature, ParamType, Token};
use crate::SdkError;

/// Contract helper for encoding/decoding function calls
#[derive(Debug, Clone)]
pub struct Contract {
    /// Contract address
    address: Address,
    /// Function definitions
    functions: Vec<FunctionDef>,
}

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Name and input types
    pub signature: FunctionSignature,
    /// Output parameter types
    pub outputs: Vec<ParamType>,
}

impl FunctionDef {
    /// Create a new function definition
    pub fn new(signature: FunctionSignature, outputs: Vec<ParamType>) -> Self {
        Self { signature, outputs }
    }

    /// Parse a definition from its canonical signature text,
    /// e.g. `"canStream(address,string)"`
    pub fn parse(signature: &str, outputs: Vec<ParamType>) -> Result<Self, SdkError> {
        Ok(Self::new(FunctionSignature::parse(signature)?, outputs))
    }

    /// Function name
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Function selector (4 bytes)
    pub fn selector(&self) -> [u8; 4] {
        self.signature.selector()
    }
}

impl Contract {
    /// Create a new contract helper
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Get the contract address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Add a function definition
    pub fn add_function(&mut self, function: FunctionDef) {
        self.functions.push(function);
    }

    /// Get a function by name
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name() == name)
    }

    /// Encode a function call
    pub fn encode_call(&self, function_name: &str, args: &[Token]) -> Result<Bytes, SdkError> {
        let function = self.function(function_name).ok_or_else(|| {
            SdkError::InvalidArgumentList(format!("Unknown function: {}", function_name))
        })?;

        encode_function_call(&function.signature, args)
    }

    /// Decode function output
    pub fn decode_output(&self, function_name: &str, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        let function = self.function(function_name).ok_or_else(|| {
            SdkError::InvalidArgumentList(format!("Unknown function: {}", function_name))
        })?;

        decode(&function.outputs, data)
    }
}

/// Builder for creating contract interfaces
pub struct ContractBuilder {
    address: Address,
    functions: Vec<FunctionDef>,
}

impl ContractBuilder {
    /// Create a new contract builder
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Add a function
    pub fn function(
        mut self,
        name: &str,
        inputs: Vec<ParamType>,
        outputs: Vec<ParamType>,
    ) -> Self {
        self.functions
            .push(FunctionDef::new(FunctionSignature::new(name, inputs), outputs));
        self
    }

    /// Build the contract
    pub fn build(self) -> Contract {
        Contract {
            address: self.address,
            functions: self.functions,
        }
    }
}

/// Create a helper for the streaming token's read-only interface
pub fn stream_token(address: Address) -> Contract {
    ContractBuilder::new(address)
        .function(
            "balanceOf",
            vec![ParamType::Address],
            vec![ParamType::Uint(256)],
        )
        .function(
            "canStream",
            vec![ParamType::Address, ParamType::String],
            vec![ParamType::Bool],
        )
        .function("totalSupply", vec![], vec![ParamType::Uint(256)])
        .function(
            "streamExpiry",
            vec![ParamType::Address, ParamType::String],
            vec![ParamType::Uint(256)],
        )
        .function("owner", vec![], vec![ParamType::Address])
        .function("treasuryAddress", vec![], vec![ParamType::Address])
        .function(
            "contentCreators",
            vec![ParamType::String],
            vec![ParamType::Address],
        )
        .build()
}
