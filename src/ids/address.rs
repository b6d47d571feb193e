//! Account addresses
//!
//! Layout: `[version 0x05] ++ chain byte ++ public key hash(20) ++ checksum(4)`.
//! Addresses are supplied by the wallet collaborator; the core only parses,
//! compares and forwards them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::checksum::{self, CHECKSUM_LEN, HASH_LEN};
use super::{decode_base58, IdentifierError};
use crate::chain::ChainId;

/// Version byte of account addresses
pub const ADDRESS_VERSION: u8 = 5;

/// Total decoded length of an address
pub const ADDRESS_LEN: usize = 2 + HASH_LEN + CHECKSUM_LEN;

/// A network-tagged account address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    data: String,
    chain_id: ChainId,
}

impl Address {
    /// Build the address of a public key hash on the given chain
    pub fn from_public_key_hash(chain_id: ChainId, hash: [u8; HASH_LEN]) -> Self {
        let mut payload = Vec::with_capacity(ADDRESS_LEN);
        payload.push(ADDRESS_VERSION);
        payload.push(chain_id.as_byte());
        payload.extend_from_slice(&hash);

        Self {
            data: checksum::seal_base58(payload),
            chain_id,
        }
    }

    /// Network this address belongs to
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }
}

impl FromStr for Address {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_base58("address", s, ADDRESS_LEN)?;

        if bytes[0] != ADDRESS_VERSION {
            return Err(IdentifierError::UnsupportedVersion {
                kind: "address",
                version: bytes[0],
            });
        }

        checksum::verify(&bytes).ok_or_else(|| IdentifierError::ChecksumMismatch {
            kind: "address",
            value: s.to_string(),
        })?;

        let chain_id = ChainId::from_byte(bytes[1]).ok_or(IdentifierError::UnknownChain(bytes[1]))?;

        Ok(Self {
            data: s.to_string(),
            chain_id,
        })
    }
}

impl TryFrom<String> for Address {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.data
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
