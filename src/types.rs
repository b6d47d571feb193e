//! Shared request types
//!
//! Logical transaction requests built by the contract façade. Byte-level
//! argument encoding is the argument encoder's job; these types only carry the
//! values in the order each contract function expects them.

use serde::{Deserialize, Serialize};

use crate::contract::ContractKind;
use crate::ids::{Address, ContractId, TokenId, TokenIndex};

/// Default fee for registering a contract (100 native tokens, 8 decimals)
pub const DEFAULT_REGISTER_FEE: u64 = 100_0000_0000;

/// Default fee for executing a contract function
pub const DEFAULT_EXECUTE_FEE: u64 = 3000_0000;

/// A single logical contract argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DataEntry {
    Address(Address),
    ContractAccount(ContractId),
    Amount(u64),
    Int32(u32),
    ShortText(String),
    TokenId(TokenId),
    Boolean(bool),
}

/// What a transaction does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Call {
    /// Deploy a new contract
    Register {
        kind: ContractKind,
        init_args: Vec<DataEntry>,
        description: String,
    },

    /// Call a function of a deployed contract
    Execute {
        contract_id: ContractId,
        func_idx: u8,
        args: Vec<DataEntry>,
    },
}

impl Call {
    /// Short human-readable label for logs
    pub fn describe(&self) -> String {
        match self {
            Call::Register { kind, .. } => format!("register {}", kind),
            Call::Execute {
                contract_id,
                func_idx,
                ..
            } => format!("execute func {} on {}", func_idx, contract_id),
        }
    }
}

/// An unsigned transaction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub call: Call,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,

    /// Account the ledger attributes the transaction to
    pub sender: Address,

    pub fee: u64,

    /// Nanoseconds since the Unix epoch
    pub timestamp: i64,
}

impl TransactionRequest {
    pub fn new(call: Call, sender: Address, options: &CallOptions) -> Self {
        let default_fee = match call {
            Call::Register { .. } => DEFAULT_REGISTER_FEE,
            Call::Execute { .. } => DEFAULT_EXECUTE_FEE,
        };

        Self {
            call,
            attachment: options.attachment.clone(),
            sender,
            fee: options.fee.unwrap_or(default_fee),
            timestamp: now_nanos(),
        }
    }
}

fn now_nanos() -> i64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1000))
}

/// Per-call options shared by every contract operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Free-form attachment stored with the transaction
    pub attachment: Option<String>,

    /// Fee override
    pub fee: Option<u64>,

    /// Token description (NFT issuance only)
    pub token_description: Option<String>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn token_description(mut self, description: impl Into<String>) -> Self {
        self.token_description = Some(description.into());
        self
    }
}

/// What a send/transfer moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// One non-fungible token by index
    Token(TokenIndex),

    /// An amount of a fungible token
    Amount(u64),
}
