//! Signing seam
//!
//! Key management and signature schemes belong to the wallet collaborator.
//! The core hands it a [`TransactionRequest`] and gets back a payload the node
//! transport can broadcast.

use serde::{Deserialize, Serialize};

use crate::ids::Address;
use crate::types::TransactionRequest;

/// Error type for signing
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// Signer refused the request
    #[error("Signer rejected request: {0}")]
    Rejected(String),

    /// Key material unavailable
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),
}

/// A signed, broadcast-ready transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedRequest {
    pub request: TransactionRequest,

    /// Sender public key, encoding chosen by the signer
    pub public_key: String,

    /// Signature over the encoded request, encoding chosen by the signer
    pub signature: String,
}

/// An account able to authorize transactions
pub trait Signer: Send + Sync {
    /// Address the ledger attributes transactions to
    fn address(&self) -> &Address;

    /// Sign a request for broadcast
    fn sign(&self, request: &TransactionRequest) -> Result<SignedRequest, SignError>;
}
