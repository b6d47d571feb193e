//! Contract identifiers
//!
//! Layout: `[version 0x06] ++ hash(21) ++ checksum(4)`, rendered as base58.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::checksum::{self, CHECKSUM_LEN, CONTRACT_HASH_LEN};
use super::{decode_base58, IdentifierError};

/// Version byte of contract ids
pub const CONTRACT_ID_VERSION: u8 = 6;

/// Total decoded length of a contract id
pub const CONTRACT_ID_LEN: usize = 1 + CONTRACT_HASH_LEN + CHECKSUM_LEN;

/// A validated contract id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractId {
    data: String,
    hash: [u8; CONTRACT_HASH_LEN],
}

impl ContractId {
    /// Build the contract id for a 21-byte contract hash
    pub fn from_hash(hash: [u8; CONTRACT_HASH_LEN]) -> Self {
        let mut payload = Vec::with_capacity(CONTRACT_ID_LEN);
        payload.push(CONTRACT_ID_VERSION);
        payload.extend_from_slice(&hash);

        Self {
            data: checksum::seal_base58(payload),
            hash,
        }
    }

    /// The 21-byte hash body shared with token ids of this contract
    pub fn hash(&self) -> &[u8; CONTRACT_HASH_LEN] {
        &self.hash
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }
}

impl FromStr for ContractId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_base58("contract id", s, CONTRACT_ID_LEN)?;

        if bytes[0] != CONTRACT_ID_VERSION {
            return Err(IdentifierError::UnsupportedVersion {
                kind: "contract id",
                version: bytes[0],
            });
        }

        let payload = checksum::verify(&bytes).ok_or_else(|| IdentifierError::ChecksumMismatch {
            kind: "contract id",
            value: s.to_string(),
        })?;

        let mut hash = [0u8; CONTRACT_HASH_LEN];
        hash.copy_from_slice(&payload[1..]);

        Ok(Self {
            data: s.to_string(),
            hash,
        })
    }
}

impl TryFrom<String> for ContractId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContractId> for String {
    fn from(id: ContractId) -> Self {
        id.data
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
