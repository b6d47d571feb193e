//! Node transport
//!
//! The core never talks HTTP itself. Everything it needs from a ledger node is
//! expressed by [`NodeTransport`]; an implementation lives with the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::account::SignedRequest;
use crate::ids::{Address, ContractId, TokenId, TokenIndex};

/// Error type for transport failures
///
/// Propagated unmodified; callers may retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    /// Request could not be completed
    #[error("Node request failed: {0}")]
    Request(String),

    /// Node answered with something that cannot be interpreted
    #[error("Malformed node response: {0}")]
    MalformedResponse(String),

    /// Node does not know the requested entity
    #[error("Not found on node: {0}")]
    NotFound(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Node unavailable")]
    Unavailable,
}

/// Acknowledgement of a broadcast transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResponse {
    /// Transaction id used for confirmation polling
    pub id: String,

    /// Contract id assigned by the node (register transactions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<ContractId>,
}

/// Transaction status as reported by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Not yet included in a block
    Pending,
    Success,
    Failed,
}

/// Transaction outcome as reported by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub id: String,
    pub status: TxStatus,

    /// Node-supplied failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Token metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token_id: TokenId,
    pub contract_id: ContractId,

    /// Node-side contract kind tag
    #[serde(rename = "type")]
    pub kind_tag: String,

    pub max: u64,
    pub total: u64,
    pub unit: u64,

    #[serde(default)]
    pub description: String,
}

/// Contract state fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub contract_id: ContractId,

    /// Node-side contract kind tag
    #[serde(rename = "type")]
    pub kind_tag: String,

    pub issuer: Address,
    pub maker: Address,
    pub unit: u64,

    /// Highest assigned token index, `None` before the first issuance
    #[serde(default)]
    pub last_index: Option<TokenIndex>,
}

/// Ledger node access used by the core
///
/// Each method is a single round trip. Implementations must not cache: the
/// core relies on every call reflecting current ledger state.
#[async_trait]
pub trait NodeTransport: Send + Sync {
    /// Current chain height
    async fn get_height(&self) -> Result<u64, NetworkError>;

    /// Submit a signed transaction
    async fn broadcast(&self, signed: SignedRequest) -> Result<BroadcastResponse, NetworkError>;

    /// Current status of a transaction
    async fn get_transaction_info(&self, tx_id: &str) -> Result<TransactionReceipt, NetworkError>;

    /// Balance of `token_id` held by `address`
    async fn get_token_balance(
        &self,
        address: &Address,
        token_id: &TokenId,
    ) -> Result<u64, NetworkError>;

    /// Metadata of a token
    async fn get_token_info(&self, token_id: &TokenId) -> Result<TokenInfo, NetworkError>;

    /// State fields of a contract
    async fn get_contract_info(&self, contract_id: &ContractId)
        -> Result<ContractInfo, NetworkError>;
}
