//! Identifier checksum
//!
//! Addresses, contract ids and token ids all carry the same 4-byte checksum:
//! the leading bytes of `keccak256(blake2b256(payload))`.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha3::{Digest, Keccak256};

/// Number of checksum bytes appended to every identifier
pub const CHECKSUM_LEN: usize = 4;

/// Length of the public key hash inside an address
pub const HASH_LEN: usize = 20;

/// Length of the contract body shared by contract ids and token ids
pub const CONTRACT_HASH_LEN: usize = 21;

type Blake2b256 = Blake2b<U32>;

/// Ledger hash: keccak256 over blake2b-256
pub fn secure_hash(payload: &[u8]) -> [u8; 32] {
    let blake = Blake2b256::digest(payload);
    Keccak256::digest(blake).into()
}

/// Checksum over the given payload
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = secure_hash(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

/// Split `bytes` into payload and trailing checksum, verifying the checksum
///
/// Returns the payload on success. The caller is responsible for length checks.
pub(crate) fn verify(bytes: &[u8]) -> Option<&[u8]> {
    if bytes.len() < CHECKSUM_LEN {
        return None;
    }
    let (payload, sum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if checksum(payload) == sum {
        Some(payload)
    } else {
        None
    }
}

/// Append the checksum of `payload` and render as base58
pub(crate) fn seal_base58(mut payload: Vec<u8>) -> String {
    let sum = checksum(&payload);
    payload.extend_from_slice(&sum);
    bs58::encode(payload).into_string()
}
