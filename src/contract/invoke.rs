//! Contract Invocation Façade
//!
//! Builds and submits transaction requests against a [`ContractHandle`].
//! Every operation validates locally before anything is signed: capability
//! table, argument shape, address network and token id round trip. A failure
//! there means no network call was made. Ledger-side rules (issuer/maker checks, balances) are left to
//! the ledger and surface only through confirmation.

use crate::account::Signer;
use crate::chain::Chain;
use crate::contract::kind::{Operation, RegisterLayout, TokenModel};
use crate::contract::{ContractError, ContractHandle, ContractKind};
use crate::ids::{Address, ContractId, TokenId};
use crate::node::{BroadcastResponse, NetworkError};
use crate::types::{Call, CallOptions, DataEntry, TransactionRequest, Units};

/// Parameters for deploying a new contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitConfig {
    kind: ContractKind,
    max: u64,
    unit: u64,
    token_description: String,
    contract_description: String,
}

impl InitConfig {
    /// Non-fungible contract; unit is always 1
    pub fn nft(kind: ContractKind) -> Self {
        Self {
            kind,
            max: 0,
            unit: 1,
            token_description: String::new(),
            contract_description: String::new(),
        }
    }

    /// Fungible contract with a maximum supply and unit granularity
    pub fn token(kind: ContractKind, max: u64, unit: u64) -> Self {
        Self {
            kind,
            max,
            unit,
            token_description: String::new(),
            contract_description: String::new(),
        }
    }

    pub fn token_description(mut self, description: impl Into<String>) -> Self {
        self.token_description = description.into();
        self
    }

    pub fn contract_description(mut self, description: impl Into<String>) -> Self {
        self.contract_description = description.into();
        self
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    fn init_args(&self) -> Result<Vec<DataEntry>, ContractError> {
        let caps = self.kind.capabilities();

        match (caps.model, caps.register_layout) {
            (TokenModel::NonFungible, RegisterLayout::Empty) => {
                if self.unit != 1 {
                    return Err(ContractError::InvalidArgument(format!(
                        "{} requires unit 1, got {}",
                        self.kind, self.unit
                    )));
                }
                Ok(Vec::new())
            }
            (TokenModel::Fungible, RegisterLayout::SupplyUnitDescription) => {
                if self.max == 0 {
                    return Err(ContractError::InvalidArgument(
                        "max supply must be positive".to_string(),
                    ));
                }
                if self.unit == 0 {
                    return Err(ContractError::InvalidArgument(
                        "unit must be positive".to_string(),
                    ));
                }
                Ok(vec![
                    DataEntry::Amount(self.max),
                    DataEntry::Amount(self.unit),
                    DataEntry::ShortText(self.token_description.clone()),
                ])
            }
            (model, layout) => Err(ContractError::InvalidArgument(format!(
                "{} has no registration layout for {:?} with {:?}",
                self.kind, model, layout
            ))),
        }
    }
}

/// Result of a register broadcast
#[derive(Debug, Clone)]
pub struct Registration {
    /// Handle of the new contract; usable once the tx confirms
    pub contract: ContractHandle,

    /// Register transaction id
    pub tx_id: String,
}

impl ContractHandle {
    /// Deploy a new contract; `by` becomes both issuer and maker
    pub async fn register(
        chain: &Chain,
        by: &dyn Signer,
        config: InitConfig,
        options: &CallOptions,
    ) -> Result<Registration, ContractError> {
        let init_args = config.init_args()?;

        let call = Call::Register {
            kind: config.kind,
            init_args,
            description: config.contract_description.clone(),
        };
        let request = TransactionRequest::new(call, by.address().clone(), options);
        let response = chain.submit(by, request).await?;

        let contract_id = response.contract_id.ok_or_else(|| {
            NetworkError::MalformedResponse(format!(
                "register tx {} acknowledged without a contract id",
                response.id
            ))
        })?;

        log::info!(
            "Registered {} contract {} (tx {})",
            config.kind,
            contract_id,
            response.id
        );

        Ok(Registration {
            contract: ContractHandle::new(contract_id, config.kind, chain.clone()),
            tx_id: response.id,
        })
    }

    /// Hand the issuer role to `new_issuer`
    ///
    /// Only the current maker may do this; the ledger enforces it.
    pub async fn supersede(
        &self,
        by: &dyn Signer,
        new_issuer: &Address,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        let args = vec![DataEntry::Address(self.on_chain(new_issuer)?)];
        self.execute(by, Operation::Supersede, args, options).await
    }

    /// Mint new units
    ///
    /// Non-fungible kinds mint exactly one token under the next index, so
    /// `amount` must be 1. Fungible kinds mint `amount` of the contract token.
    pub async fn issue(
        &self,
        by: &dyn Signer,
        amount: u64,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        let caps = self.capabilities();
        caps.func_idx(Operation::Issue)?;

        let args = match caps.model {
            TokenModel::NonFungible => {
                if amount != 1 {
                    return Err(ContractError::InvalidArgument(format!(
                        "{} issues one token at a time, got amount {}",
                        self.kind(),
                        amount
                    )));
                }
                vec![
                    DataEntry::ShortText(options.token_description.clone().unwrap_or_default()),
                    DataEntry::ShortText(options.attachment.clone().unwrap_or_default()),
                ]
            }
            TokenModel::Fungible => vec![DataEntry::Amount(positive(amount)?)],
        };

        self.execute(by, Operation::Issue, args, options).await
    }

    /// Burn `amount` of the issuer's balance
    pub async fn destroy(
        &self,
        by: &dyn Signer,
        amount: u64,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        self.capabilities().func_idx(Operation::Destroy)?;
        let args = vec![DataEntry::Amount(positive(amount)?)];
        self.execute(by, Operation::Destroy, args, options).await
    }

    /// Change the token unit granularity
    pub async fn split(
        &self,
        by: &dyn Signer,
        new_unit: u64,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        self.capabilities().func_idx(Operation::Split)?;
        let args = vec![DataEntry::Amount(positive(new_unit)?)];
        self.execute(by, Operation::Split, args, options).await
    }

    /// Add `user` to or remove it from the contract's white/black list
    pub async fn update_list_user(
        &self,
        by: &dyn Signer,
        user: &Address,
        listed: bool,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        let args = vec![DataEntry::Address(self.on_chain(user)?), DataEntry::Boolean(listed)];
        self.execute(by, Operation::UpdateListUser, args, options).await
    }

    /// Move units from the signer's account to `recipient`
    pub async fn send(
        &self,
        by: &dyn Signer,
        recipient: &Address,
        units: Units,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        self.capabilities().func_idx(Operation::Send)?;
        let args = vec![
            DataEntry::Address(self.on_chain(recipient)?),
            self.units_entry(units)?,
        ];
        self.execute(by, Operation::Send, args, options).await
    }

    /// Move units from `from` to `to`
    ///
    /// The ledger rejects the transfer when `from` holds less than the
    /// transferred amount.
    pub async fn transfer(
        &self,
        by: &dyn Signer,
        from: &Address,
        to: &Address,
        units: Units,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        self.capabilities().func_idx(Operation::Transfer)?;
        let args = vec![
            DataEntry::Address(self.on_chain(from)?),
            DataEntry::Address(self.on_chain(to)?),
            self.units_entry(units)?,
        ];
        self.execute(by, Operation::Transfer, args, options).await
    }

    /// Move units from the signer's account into a contract account
    pub async fn deposit(
        &self,
        by: &dyn Signer,
        target: &ContractId,
        units: Units,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        self.capabilities().func_idx(Operation::Deposit)?;
        let args = vec![
            DataEntry::Address(by.address().clone()),
            DataEntry::ContractAccount(target.clone()),
            self.units_entry(units)?,
        ];
        self.execute(by, Operation::Deposit, args, options).await
    }

    /// Move units out of a contract account back to the signer
    pub async fn withdraw(
        &self,
        by: &dyn Signer,
        source: &ContractId,
        units: Units,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        self.capabilities().func_idx(Operation::Withdraw)?;
        let args = vec![
            DataEntry::ContractAccount(source.clone()),
            DataEntry::Address(by.address().clone()),
            self.units_entry(units)?,
        ];
        self.execute(by, Operation::Withdraw, args, options).await
    }

    /// Require `address` to belong to this contract's network
    fn on_chain(&self, address: &Address) -> Result<Address, ContractError> {
        let expected = self.chain().chain_id();
        if address.chain_id() != expected {
            return Err(ContractError::ChainMismatch {
                address: address.to_string(),
                expected,
            });
        }
        Ok(address.clone())
    }

    /// Turn `units` into the argument this kind expects
    ///
    /// The token id is resolved through the codec either way so an index that
    /// does not round-trip is rejected here.
    fn units_entry(&self, units: Units) -> Result<DataEntry, ContractError> {
        match (self.capabilities().model, units) {
            (TokenModel::NonFungible, Units::Token(index)) => {
                let token_id = TokenId::resolve(self.contract_id(), index)?;
                log::debug!("Token index {} resolves to {}", index, token_id);
                Ok(DataEntry::Int32(index))
            }
            (TokenModel::Fungible, Units::Amount(amount)) => {
                TokenId::resolve(self.contract_id(), 0)?;
                Ok(DataEntry::Amount(positive(amount)?))
            }
            (model, units) => Err(ContractError::InvalidArgument(format!(
                "{} ({:?}) cannot move {:?}",
                self.kind(),
                model,
                units
            ))),
        }
    }

    async fn execute(
        &self,
        by: &dyn Signer,
        op: Operation,
        args: Vec<DataEntry>,
        options: &CallOptions,
    ) -> Result<BroadcastResponse, ContractError> {
        let func_idx = self.capabilities().func_idx(op)?;

        let call = Call::Execute {
            contract_id: self.contract_id().clone(),
            func_idx,
            args,
        };
        let request = TransactionRequest::new(call, by.address().clone(), options);

        log::debug!("Submitting {} on {} contract {}", op, self.kind(), self.contract_id());

        Ok(self.chain().submit(by, request).await?)
    }
}

fn positive(amount: u64) -> Result<u64, ContractError> {
    if amount == 0 {
        return Err(ContractError::InvalidArgument(
            "amount must be positive".to_string(),
        ));
    }
    Ok(amount)
}
