//! Contract Integration Test Helpers
//!
//! Register-and-confirm shortcuts shared by the contract test modules.

use vsys_token_client::{CallOptions, ContractHandle, ContractKind, InitConfig};

pub use crate::common::TestContext;

mod nft_contract_test;

/// Register a contract as `acnt0` and wait until the register tx succeeds
pub async fn register_confirmed(ctx: &TestContext, config: InitConfig) -> ContractHandle {
    let registration = ContractHandle::register(&ctx.chain, &ctx.acnt0, config, &CallOptions::new())
        .await
        .expect("Failed to register contract");

    ctx.wait_for_block();
    ctx.assert_tx_success(&registration.tx_id).await;

    registration.contract
}

/// Register a non-fungible contract of `kind`
pub async fn new_nft(ctx: &TestContext, kind: ContractKind) -> ContractHandle {
    register_confirmed(ctx, InitConfig::nft(kind)).await
}

/// Register a fungible contract of `kind`
pub async fn new_token(ctx: &TestContext, kind: ContractKind, max: u64, unit: u64) -> ContractHandle {
    let config = InitConfig::token(kind, max, unit).token_description("test token");
    register_confirmed(ctx, config).await
}

/// Issue `count` NFTs as `acnt0`, confirming each
pub async fn issue_nfts(ctx: &TestContext, nc: &ContractHandle, count: u32) {
    for _ in 0..count {
        let resp = nc
            .issue(&ctx.acnt0, 1, &CallOptions::new())
            .await
            .expect("Failed to issue NFT");
        ctx.wait_for_block();
        ctx.assert_tx_success(&resp.id).await;
    }
}
