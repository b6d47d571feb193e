//! Query Layer
//!
//! Read-only accessors against a contract. Each call is a fresh round trip;
//! nothing here submits transactions or caches results.

use crate::contract::kind::TokenModel;
use crate::contract::{ContractError, ContractHandle};
use crate::ids::{Address, TokenId, TokenIndex};
use crate::node::{ContractInfo, TokenInfo};

impl ContractHandle {
    async fn contract_info(&self) -> Result<ContractInfo, ContractError> {
        Ok(self
            .chain()
            .api()
            .get_contract_info(self.contract_id())
            .await?)
    }

    /// Current issuer
    pub async fn get_issuer(&self) -> Result<Address, ContractError> {
        Ok(self.contract_info().await?.issuer)
    }

    /// Current maker
    pub async fn get_maker(&self) -> Result<Address, ContractError> {
        Ok(self.contract_info().await?.maker)
    }

    /// Token unit granularity
    pub async fn get_unit(&self) -> Result<u64, ContractError> {
        Ok(self.contract_info().await?.unit)
    }

    /// Highest issued token index, `None` if nothing was issued yet
    pub async fn get_last_token_index(&self) -> Result<Option<TokenIndex>, ContractError> {
        Ok(self.contract_info().await?.last_index)
    }

    /// Token id for `index`; computed locally
    pub fn get_token_id(&self, index: TokenIndex) -> Result<TokenId, ContractError> {
        Ok(TokenId::resolve(self.contract_id(), index)?)
    }

    /// Balance of `token_id` held by `address`
    pub async fn get_balance(
        &self,
        address: &Address,
        token_id: &TokenId,
    ) -> Result<u64, ContractError> {
        Ok(self
            .chain()
            .api()
            .get_token_balance(address, token_id)
            .await?)
    }

    /// Maximum supply of a fungible contract token
    pub async fn get_max_supply(&self) -> Result<u64, ContractError> {
        Ok(self.fungible_token_info().await?.max)
    }

    /// Issued and not destroyed supply of a fungible contract token
    pub async fn get_total_supply(&self) -> Result<u64, ContractError> {
        Ok(self.fungible_token_info().await?.total)
    }

    async fn fungible_token_info(&self) -> Result<TokenInfo, ContractError> {
        if self.capabilities().model != TokenModel::Fungible {
            return Err(ContractError::InvalidArgument(format!(
                "{} has no contract-wide supply",
                self.kind()
            )));
        }

        let token_id = self.get_token_id(0)?;
        Ok(self.chain().api().get_token_info(&token_id).await?)
    }
}
