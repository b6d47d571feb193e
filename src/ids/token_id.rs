//! Token Identifier Codec
//!
//! A token id packs the owning contract's hash and the token's index within
//! that contract:
//!
//! ```text
//! [version 0x84] ++ contract hash(21) ++ index(u32, big-endian) ++ checksum(4)
//! ```
//!
//! The native ledger token on each network is the exception. Its ids are fixed
//! literals that are matched verbatim and never decoded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::checksum::{self, CHECKSUM_LEN, CONTRACT_HASH_LEN};
use super::{decode_base58, ContractId, IdentifierError};
use crate::chain::ChainId;

/// Contract-local token sequence number
pub type TokenIndex = u32;

/// Version byte of contract-derived token ids
pub const TOKEN_ID_VERSION: u8 = 132;

/// Total decoded length of a token id
pub const TOKEN_ID_LEN: usize = 1 + CONTRACT_HASH_LEN + 4 + CHECKSUM_LEN;

/// Native token id on main net
pub const MAINNET_NATIVE_TOKEN_ID: &str = "TWatCreEv7ayv6iAfLgke6ppVV33kDjFqSJn8yicf";

/// Native token id on test net
pub const TESTNET_NATIVE_TOKEN_ID: &str = "TWuKDNU1SAheHR99s1MbGZLPh1KophEmKk1eeU3mW";

/// A token id: either contract-derived or one of the native literals
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(String);

impl TokenId {
    /// Derive the token id for `index` within `contract_id`
    pub fn encode(contract_id: &ContractId, index: TokenIndex) -> Self {
        let mut payload = Vec::with_capacity(TOKEN_ID_LEN);
        payload.push(TOKEN_ID_VERSION);
        payload.extend_from_slice(contract_id.hash());
        payload.extend_from_slice(&index.to_be_bytes());

        Self(checksum::seal_base58(payload))
    }

    /// Recover `(contract id, index)` from an encoded token id
    ///
    /// Native token literals are rejected here; check [`TokenId::is_native`]
    /// first when the input may be one of them.
    pub fn decode(s: &str) -> Result<(ContractId, TokenIndex), IdentifierError> {
        if is_native_literal(s) {
            return Err(IdentifierError::NotContractDerived(s.to_string()));
        }

        let bytes = decode_base58("token id", s, TOKEN_ID_LEN)?;

        if bytes[0] != TOKEN_ID_VERSION {
            return Err(IdentifierError::UnsupportedVersion {
                kind: "token id",
                version: bytes[0],
            });
        }

        let payload = checksum::verify(&bytes).ok_or_else(|| IdentifierError::ChecksumMismatch {
            kind: "token id",
            value: s.to_string(),
        })?;

        let mut hash = [0u8; CONTRACT_HASH_LEN];
        hash.copy_from_slice(&payload[1..1 + CONTRACT_HASH_LEN]);

        let mut index = [0u8; 4];
        index.copy_from_slice(&payload[1 + CONTRACT_HASH_LEN..]);

        Ok((ContractId::from_hash(hash), TokenIndex::from_be_bytes(index)))
    }

    /// Encode and verify that decoding yields the same pair
    pub fn resolve(contract_id: &ContractId, index: TokenIndex) -> Result<Self, IdentifierError> {
        let token_id = Self::encode(contract_id, index);
        let (decoded_ctrt, decoded_idx) = Self::decode(token_id.as_str())?;

        if &decoded_ctrt != contract_id || decoded_idx != index {
            return Err(IdentifierError::RoundTrip {
                token_id: token_id.0,
                index,
            });
        }

        Ok(token_id)
    }

    /// Native token id for a network
    pub fn native(chain_id: ChainId) -> Self {
        match chain_id {
            ChainId::MainNet => Self(MAINNET_NATIVE_TOKEN_ID.to_string()),
            ChainId::TestNet => Self(TESTNET_NATIVE_TOKEN_ID.to_string()),
        }
    }

    /// Decode this token id into its contract and index
    pub fn parts(&self) -> Result<(ContractId, TokenIndex), IdentifierError> {
        Self::decode(&self.0)
    }

    pub fn is_mainnet_native(&self) -> bool {
        self.0 == MAINNET_NATIVE_TOKEN_ID
    }

    pub fn is_testnet_native(&self) -> bool {
        self.0 == TESTNET_NATIVE_TOKEN_ID
    }

    pub fn is_native(&self) -> bool {
        self.is_mainnet_native() || self.is_testnet_native()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_native_literal(s: &str) -> bool {
    s == MAINNET_NATIVE_TOKEN_ID || s == TESTNET_NATIVE_TOKEN_ID
}

impl FromStr for TokenId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_native_literal(s) {
            Self::decode(s)?;
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TokenId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenId> for String {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
