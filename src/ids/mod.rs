//! Ledger identifiers
//!
//! Base58 identifiers used across the ledger: account addresses, contract ids
//! and token ids. Every identifier is a fixed-layout byte string with a version
//! byte up front and a checksum at the end, so any parse failure is caught
//! locally before a request is ever built.

pub mod address;
pub mod checksum;
pub mod contract_id;
pub mod token_id;

pub use address::Address;
pub use contract_id::ContractId;
pub use token_id::{TokenId, TokenIndex};

/// Error type for identifier parsing and decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Not valid base58
    #[error("Invalid base58 in {kind} '{value}': {reason}")]
    Base58 {
        kind: &'static str,
        value: String,
        reason: String,
    },

    /// Decoded byte length does not match the layout
    #[error("Invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Leading version byte is not the one for this identifier kind
    #[error("Unsupported {kind} version: {version}")]
    UnsupportedVersion { kind: &'static str, version: u8 },

    /// Trailing checksum does not match the payload
    #[error("Checksum mismatch in {kind} '{value}'")]
    ChecksumMismatch { kind: &'static str, value: String },

    /// Address chain byte is not a known network
    #[error("Unknown chain id byte in address: {0:#04x}")]
    UnknownChain(u8),

    /// Identifier is not derived from a contract (native token literals)
    #[error("Token id '{0}' is not contract-derived")]
    NotContractDerived(String),

    /// Encode/decode did not reproduce the input
    #[error("Token id '{token_id}' does not round-trip to index {index}")]
    RoundTrip { token_id: String, index: TokenIndex },
}

/// Decode base58 and check the total length
pub(crate) fn decode_base58(
    kind: &'static str,
    value: &str,
    expected: usize,
) -> Result<Vec<u8>, IdentifierError> {
    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|e| IdentifierError::Base58 {
            kind,
            value: value.to_string(),
            reason: e.to_string(),
        })?;

    if bytes.len() != expected {
        return Err(IdentifierError::InvalidLength {
            kind,
            expected,
            actual: bytes.len(),
        });
    }

    Ok(bytes)
}
