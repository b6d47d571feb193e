//! Chain context
//!
//! Binds a network identifier to the node transport. Cheap to clone and shared
//! read-only by every contract handle created against it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::account::{SignError, Signer};
use crate::node::{BroadcastResponse, NetworkError, NodeTransport};
use crate::types::TransactionRequest;

/// Ledger network identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainId {
    #[serde(rename = "M")]
    MainNet,
    #[serde(rename = "T")]
    TestNet,
}

impl ChainId {
    /// Byte embedded in addresses of this network
    pub fn as_byte(self) -> u8 {
        match self {
            ChainId::MainNet => b'M',
            ChainId::TestNet => b'T',
        }
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'M' => Some(ChainId::MainNet),
            b'T' => Some(ChainId::TestNet),
            _ => None,
        }
    }
}

impl FromStr for ChainId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(ChainId::MainNet),
            "T" => Ok(ChainId::TestNet),
            _ => Err(format!("Invalid chain ID '{}'. Valid options: M, T", s)),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::MainNet => write!(f, "M"),
            ChainId::TestNet => write!(f, "T"),
        }
    }
}

/// Error type for submitting a transaction
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Signer address belongs to another network
    #[error("Signer {address} is not on chain {expected}")]
    ChainMismatch { address: String, expected: ChainId },

    /// Signing collaborator refused the request
    #[error("Signing failed: {0}")]
    Signing(#[from] SignError),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

/// A network bound to a node transport
#[derive(Clone)]
pub struct Chain {
    api: Arc<dyn NodeTransport>,
    chain_id: ChainId,
}

impl Chain {
    pub fn new(api: Arc<dyn NodeTransport>, chain_id: ChainId) -> Self {
        Self { api, chain_id }
    }

    /// Chain on test net, the default network
    pub fn testnet(api: Arc<dyn NodeTransport>) -> Self {
        Self::new(api, ChainId::TestNet)
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Node transport used for every round trip on this chain
    pub fn api(&self) -> &dyn NodeTransport {
        self.api.as_ref()
    }

    /// Current height of the chain
    pub async fn height(&self) -> Result<u64, NetworkError> {
        self.api.get_height().await
    }

    /// Sign `request` with `signer` and broadcast it
    ///
    /// The returned acknowledgement only means the node accepted the payload;
    /// the outcome is observed through [`crate::confirm`].
    pub async fn submit(
        &self,
        signer: &dyn Signer,
        request: TransactionRequest,
    ) -> Result<BroadcastResponse, SubmitError> {
        let address = signer.address();
        if address.chain_id() != self.chain_id {
            return Err(SubmitError::ChainMismatch {
                address: address.to_string(),
                expected: self.chain_id,
            });
        }

        let signed = signer.sign(&request)?;
        let response = self.api.broadcast(signed).await?;

        log::info!(
            "Broadcast {} from {}: tx {}",
            request.call.describe(),
            address,
            response.id
        );

        Ok(response)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
