//! Contract Type Registry
//!
//! Maps each [`ContractKind`] to the capability table the façade uses to build
//! requests: which operations exist, their function indices, and the shape of
//! the registration arguments. The table is built once on first use and never
//! mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Error type for registry lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Tag reported by the node is not a known contract kind
    #[error("Unknown contract kind: {0}")]
    UnknownContractKind(String),

    /// Kind does not expose the requested operation
    #[error("{kind} does not support {operation}")]
    UnsupportedOperation {
        kind: ContractKind,
        operation: Operation,
    },
}

/// Token contract variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContractKind {
    Nft,
    NftV2Blacklist,
    NftV2Whitelist,
    TokenNoSplit,
    TokenWithSplit,
    TokenV2Whitelist,
    TokenV2Blacklist,
}

impl ContractKind {
    pub const ALL: [ContractKind; 7] = [
        ContractKind::Nft,
        ContractKind::NftV2Blacklist,
        ContractKind::NftV2Whitelist,
        ContractKind::TokenNoSplit,
        ContractKind::TokenWithSplit,
        ContractKind::TokenV2Whitelist,
        ContractKind::TokenV2Blacklist,
    ];

    /// Tag the node reports for this kind
    pub fn tag(self) -> &'static str {
        match self {
            ContractKind::Nft => "NonFungibleContract",
            ContractKind::NftV2Blacklist => "NFTContractWithBlacklist",
            ContractKind::NftV2Whitelist => "NFTContractWithWhitelist",
            ContractKind::TokenNoSplit => "TokenContract",
            ContractKind::TokenWithSplit => "TokenContractWithSplit",
            ContractKind::TokenV2Whitelist => "TokenContractWithWhitelist",
            ContractKind::TokenV2Blacklist => "TokenContractWithBlacklist",
        }
    }

    /// Resolve a node-reported tag
    pub fn from_tag(tag: &str) -> Result<Self, RegistryError> {
        TAGS.get(tag)
            .copied()
            .ok_or_else(|| RegistryError::UnknownContractKind(tag.to_string()))
    }

    /// Capability table for this kind
    pub fn capabilities(self) -> &'static Capabilities {
        // Every variant is inserted when the registry is built.
        &REGISTRY[&self]
    }

    pub fn model(self) -> TokenModel {
        self.capabilities().model
    }
}

impl FromStr for ContractKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl TryFrom<String> for ContractKind {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_tag(&value)
    }
}

impl From<ContractKind> for String {
    fn from(kind: ContractKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How a contract's tokens are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenModel {
    /// One unit per index, indices assigned on issue
    NonFungible,

    /// A single token (index 0) with an amount-based supply
    Fungible,
}

/// Operations a contract kind may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Supersede,
    Issue,
    Destroy,
    Split,
    UpdateListUser,
    Send,
    Transfer,
    Deposit,
    Withdraw,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Supersede => "supersede",
            Operation::Issue => "issue",
            Operation::Destroy => "destroy",
            Operation::Split => "split",
            Operation::UpdateListUser => "update_list_user",
            Operation::Send => "send",
            Operation::Transfer => "transfer",
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
        };
        f.write_str(name)
    }
}

/// Shape of the registration arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterLayout {
    /// No init arguments
    Empty,

    /// `[max supply, unit, token description]`
    SupplyUnitDescription,
}

/// Capability descriptor of one contract kind
#[derive(Debug)]
pub struct Capabilities {
    pub kind: ContractKind,
    pub model: TokenModel,
    pub register_layout: RegisterLayout,
    functions: &'static [(Operation, u8)],
}

impl Capabilities {
    /// Function index of `op`
    pub fn func_idx(&self, op: Operation) -> Result<u8, RegistryError> {
        self.functions
            .iter()
            .find(|(o, _)| *o == op)
            .map(|(_, idx)| *idx)
            .ok_or(RegistryError::UnsupportedOperation {
                kind: self.kind,
                operation: op,
            })
    }

    /// Operation bound to a function index
    pub fn operation_at(&self, func_idx: u8) -> Option<Operation> {
        self.functions
            .iter()
            .find(|(_, idx)| *idx == func_idx)
            .map(|(op, _)| *op)
    }

    pub fn supports(&self, op: Operation) -> bool {
        self.functions.iter().any(|(o, _)| *o == op)
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.functions.iter().map(|(op, _)| *op)
    }
}

const NFT_FUNCS: &[(Operation, u8)] = &[
    (Operation::Supersede, 0),
    (Operation::Issue, 1),
    (Operation::Send, 2),
    (Operation::Transfer, 3),
    (Operation::Deposit, 4),
    (Operation::Withdraw, 5),
];

const NFT_V2_FUNCS: &[(Operation, u8)] = &[
    (Operation::Supersede, 0),
    (Operation::Issue, 1),
    (Operation::UpdateListUser, 2),
    (Operation::Send, 4),
    (Operation::Transfer, 5),
    (Operation::Deposit, 6),
    (Operation::Withdraw, 7),
];

const TOKEN_NO_SPLIT_FUNCS: &[(Operation, u8)] = &[
    (Operation::Supersede, 0),
    (Operation::Issue, 1),
    (Operation::Destroy, 2),
    (Operation::Send, 3),
    (Operation::Transfer, 4),
    (Operation::Deposit, 5),
    (Operation::Withdraw, 6),
];

const TOKEN_WITH_SPLIT_FUNCS: &[(Operation, u8)] = &[
    (Operation::Supersede, 0),
    (Operation::Issue, 1),
    (Operation::Destroy, 2),
    (Operation::Split, 3),
    (Operation::Send, 4),
    (Operation::Transfer, 5),
    (Operation::Deposit, 6),
    (Operation::Withdraw, 7),
];

const TOKEN_V2_FUNCS: &[(Operation, u8)] = &[
    (Operation::Supersede, 0),
    (Operation::Issue, 1),
    (Operation::Destroy, 2),
    (Operation::UpdateListUser, 3),
    (Operation::Send, 5),
    (Operation::Transfer, 6),
    (Operation::Deposit, 7),
    (Operation::Withdraw, 8),
];

static REGISTRY: LazyLock<HashMap<ContractKind, Capabilities>> = LazyLock::new(|| {
    ContractKind::ALL
        .into_iter()
        .map(|kind| (kind, describe(kind)))
        .collect()
});

static TAGS: LazyLock<HashMap<&'static str, ContractKind>> = LazyLock::new(|| {
    ContractKind::ALL
        .into_iter()
        .map(|kind| (kind.tag(), kind))
        .collect()
});

fn describe(kind: ContractKind) -> Capabilities {
    let (model, register_layout, functions) = match kind {
        ContractKind::Nft => (TokenModel::NonFungible, RegisterLayout::Empty, NFT_FUNCS),
        ContractKind::NftV2Blacklist | ContractKind::NftV2Whitelist => {
            (TokenModel::NonFungible, RegisterLayout::Empty, NFT_V2_FUNCS)
        }
        ContractKind::TokenNoSplit => (
            TokenModel::Fungible,
            RegisterLayout::SupplyUnitDescription,
            TOKEN_NO_SPLIT_FUNCS,
        ),
        ContractKind::TokenWithSplit => (
            TokenModel::Fungible,
            RegisterLayout::SupplyUnitDescription,
            TOKEN_WITH_SPLIT_FUNCS,
        ),
        ContractKind::TokenV2Whitelist | ContractKind::TokenV2Blacklist => (
            TokenModel::Fungible,
            RegisterLayout::SupplyUnitDescription,
            TOKEN_V2_FUNCS,
        ),
    };

    Capabilities {
        kind,
        model,
        register_layout,
        functions,
    }
}
