//! Token contracts
//!
//! One generic [`ContractHandle`] serves every contract kind. Per-kind
//! variation (which operations exist, function indices, argument shapes) comes
//! from the registry in [`kind`], so the façade itself never branches on the
//! concrete contract type beyond its token model.

pub mod invoke;
pub mod kind;
pub mod query;
pub mod system;

pub use invoke::{InitConfig, Registration};
pub use kind::{Capabilities, ContractKind, Operation, RegisterLayout, RegistryError, TokenModel};
pub use system::SystemContract;

use crate::chain::{Chain, ChainId, SubmitError};
use crate::confirm::ConfirmationError;
use crate::ids::{ContractId, IdentifierError, TokenId};
use crate::node::NetworkError;

/// Error type for contract operations
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// Identifier failed to decode or round-trip
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    /// Registry miss or unsupported operation
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Arguments rejected before building a request
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Address argument belongs to another network
    #[error("Address {address} is not on chain {expected}")]
    ChainMismatch { address: String, expected: ChainId },

    /// Signing or chain mismatch while submitting
    #[error("Submit error: {0}")]
    Submit(SubmitError),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Confirmation outcome
    #[error("Confirmation error: {0}")]
    Confirmation(#[from] ConfirmationError),
}

impl From<SubmitError> for ContractError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Network(e) => ContractError::Network(e),
            other => ContractError::Submit(other),
        }
    }
}

/// A deployed token contract bound to a chain
///
/// Immutable and cheap to clone; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    contract_id: ContractId,
    kind: ContractKind,
    chain: Chain,
}

impl ContractHandle {
    /// Bind a contract whose kind is already known
    pub fn new(contract_id: ContractId, kind: ContractKind, chain: Chain) -> Self {
        Self {
            contract_id,
            kind,
            chain,
        }
    }

    /// Resolve an existing contract by asking the node for its kind
    pub async fn from_contract_id(
        chain: &Chain,
        contract_id: ContractId,
    ) -> Result<Self, ContractError> {
        let info = chain.api().get_contract_info(&contract_id).await?;
        let kind = ContractKind::from_tag(&info.kind_tag)?;

        log::debug!("Resolved contract {} as {}", contract_id, kind);

        Ok(Self::new(contract_id, kind, chain.clone()))
    }

    pub fn contract_id(&self) -> &ContractId {
        &self.contract_id
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn capabilities(&self) -> &'static Capabilities {
        self.kind.capabilities()
    }
}

/// Contract owning a token id
#[derive(Debug, Clone)]
pub enum TokenContract {
    /// Native ledger token
    Native(SystemContract),

    /// Token issued by a deployed contract
    Issued(ContractHandle),
}

/// Resolve the contract behind a token id
///
/// Native token ids are matched by literal and resolved without a network
/// round trip. Anything else is decoded locally first, then the node is asked
/// for the contract's kind.
pub async fn from_token_id(chain: &Chain, token_id: &TokenId) -> Result<TokenContract, ContractError> {
    if token_id.is_mainnet_native() {
        return Ok(TokenContract::Native(SystemContract::for_mainnet(chain.clone())));
    }
    if token_id.is_testnet_native() {
        return Ok(TokenContract::Native(SystemContract::for_testnet(chain.clone())));
    }

    let (contract_id, _) = token_id.parts()?;

    let info = chain.api().get_token_info(token_id).await?;
    if info.contract_id != contract_id {
        return Err(NetworkError::MalformedResponse(format!(
            "token {} reported under contract {}, expected {}",
            token_id, info.contract_id, contract_id
        ))
        .into());
    }

    let kind = ContractKind::from_tag(&info.kind_tag)?;
    log::debug!("Resolved token {} to {} contract {}", token_id, kind, contract_id);

    Ok(TokenContract::Issued(ContractHandle::new(
        contract_id,
        kind,
        chain.clone(),
    )))
}
