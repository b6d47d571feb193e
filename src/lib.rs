//! VSYS Token Client
//!
//! Client-side core for token contracts (fungible and non-fungible) on a
//! remote ledger: a registry of contract kinds, checksum-protected token id
//! encoding, a generic invocation façade, and submit-then-confirm polling.
//! Node transport and signing are supplied by the caller through the traits in
//! [`node`] and [`account`].

pub mod account;
pub mod chain;
pub mod config;
pub mod confirm;
pub mod contract;
pub mod ids;
pub mod node;
pub mod types;

// Re-exports
pub use account::{SignError, SignedRequest, Signer};
pub use chain::{Chain, ChainId, SubmitError};
pub use confirm::{assert_success, ConfirmationError, ConfirmationState, RejectReason, TxMonitor};
pub use contract::{
    from_token_id, ContractError, ContractHandle, ContractKind, InitConfig, Registration,
    SystemContract, TokenContract,
};
pub use ids::{Address, ContractId, IdentifierError, TokenId, TokenIndex};
pub use node::{
    BroadcastResponse, ContractInfo, NetworkError, NodeTransport, TokenInfo, TransactionReceipt,
    TxStatus,
};
pub use types::{CallOptions, DataEntry, TransactionRequest, Units};
