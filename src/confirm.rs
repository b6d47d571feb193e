//! Confirmation Monitor
//!
//! Tracks a broadcast transaction until the ledger reports its outcome.
//!
//! ```text
//! Broadcast --ack--> Pending --poll--> Pending   (not yet included)
//!                            --poll--> Success
//!                            --poll--> Failed(reason)
//! ```
//!
//! There is no timeout and no retry budget. The caller decides how often to
//! poll and when to stop; dropping a monitor has no effect on the transaction.

use std::fmt;

use crate::chain::Chain;
use crate::node::{BroadcastResponse, NetworkError, TransactionReceipt, TxStatus};

/// Why the ledger rejected a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Caller lacks the role the function requires
    Unauthorized,

    /// Source holds less than the amount moved
    InsufficientBalance,

    /// Node reported failure without a reason
    Unspecified,

    /// Any other node-supplied reason, verbatim
    Other(String),
}

impl RejectReason {
    /// Classify a node-supplied reason string
    pub fn from_node(reason: &str) -> Self {
        match reason {
            "Unauthorized" | "ContractInvalidCaller" | "ContractInvalidSigner" => {
                RejectReason::Unauthorized
            }
            "InsufficientBalance"
            | "ContractTokenBalanceInsufficient"
            | "ContractAccountBalanceInsufficient" => RejectReason::InsufficientBalance,
            "" => RejectReason::Unspecified,
            other => RejectReason::Other(other.to_string()),
        }
    }

    fn from_receipt(receipt: &TransactionReceipt) -> Self {
        receipt
            .reason
            .as_deref()
            .map(Self::from_node)
            .unwrap_or(RejectReason::Unspecified)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Unauthorized => write!(f, "Unauthorized"),
            RejectReason::InsufficientBalance => write!(f, "InsufficientBalance"),
            RejectReason::Unspecified => write!(f, "unspecified"),
            RejectReason::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// Error type for confirmation checks
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfirmationError {
    /// Transaction confirmed with a failure status
    #[error("Transaction {tx_id} rejected by ledger: {reason}")]
    LedgerRejected { tx_id: String, reason: RejectReason },

    /// Transaction not yet included
    #[error("Transaction {0} not confirmed yet")]
    NotConfirmed(String),

    /// Transport failure while polling
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

/// Monitor state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Submitted, acknowledgement not yet recorded
    Broadcast,
    Pending,
    Success,
    Failed(RejectReason),
}

impl ConfirmationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConfirmationState::Success | ConfirmationState::Failed(_))
    }
}

/// Per-transaction confirmation state machine
#[derive(Debug, Clone)]
pub struct TxMonitor {
    tx_id: String,
    state: ConfirmationState,
}

impl TxMonitor {
    /// Monitor for a transaction whose broadcast is not yet acknowledged
    pub fn new(tx_id: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            state: ConfirmationState::Broadcast,
        }
    }

    /// Monitor for an acknowledged broadcast, already Pending
    pub fn from_broadcast(response: &BroadcastResponse) -> Self {
        let mut monitor = Self::new(response.id.clone());
        monitor.acknowledge();
        monitor
    }

    /// Record the transport's submit acknowledgement
    pub fn acknowledge(&mut self) {
        if self.state == ConfirmationState::Broadcast {
            self.state = ConfirmationState::Pending;
        }
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    /// Ask the node once for the transaction's status
    ///
    /// Terminal states are final, and a monitor still waiting for its
    /// broadcast acknowledgement has nothing to ask about yet. Neither makes a
    /// network call.
    pub async fn poll_once(&mut self, chain: &Chain) -> Result<&ConfirmationState, NetworkError> {
        if self.state.is_terminal() || self.state == ConfirmationState::Broadcast {
            return Ok(&self.state);
        }

        let receipt = poll_once(chain, &self.tx_id).await?;
        self.state = match receipt.status {
            TxStatus::Pending => ConfirmationState::Pending,
            TxStatus::Success => ConfirmationState::Success,
            TxStatus::Failed => ConfirmationState::Failed(RejectReason::from_receipt(&receipt)),
        };

        log::debug!("Tx {} is {:?}", self.tx_id, self.state);

        Ok(&self.state)
    }

    /// Turn the current state into a result without polling
    pub fn outcome(&self) -> Result<(), ConfirmationError> {
        match &self.state {
            ConfirmationState::Success => Ok(()),
            ConfirmationState::Failed(reason) => Err(ConfirmationError::LedgerRejected {
                tx_id: self.tx_id.clone(),
                reason: reason.clone(),
            }),
            ConfirmationState::Broadcast | ConfirmationState::Pending => {
                Err(ConfirmationError::NotConfirmed(self.tx_id.clone()))
            }
        }
    }
}

/// Fetch the receipt of a transaction once
pub async fn poll_once(chain: &Chain, tx_id: &str) -> Result<TransactionReceipt, NetworkError> {
    chain.api().get_transaction_info(tx_id).await
}

/// Poll once and require Success
///
/// Failed maps to [`ConfirmationError::LedgerRejected`]; still pending maps to
/// [`ConfirmationError::NotConfirmed`].
pub async fn assert_success(
    chain: &Chain,
    tx_id: &str,
) -> Result<TransactionReceipt, ConfirmationError> {
    let receipt = poll_once(chain, tx_id).await?;

    match receipt.status {
        TxStatus::Success => Ok(receipt),
        TxStatus::Failed => {
            let reason = RejectReason::from_receipt(&receipt);
            log::info!("Tx {} rejected: {}", tx_id, reason);
            Err(ConfirmationError::LedgerRejected {
                tx_id: tx_id.to_string(),
                reason,
            })
        }
        TxStatus::Pending => Err(ConfirmationError::NotConfirmed(tx_id.to_string())),
    }
}
