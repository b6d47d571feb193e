//! NFT Contract Integration Tests
//!
//! Register, supersede, issue, send and transfer on non-fungible contracts,
//! plus the client-side checks that fail before anything is broadcast.

use vsys_token_client::contract::{Operation, RegistryError};
use vsys_token_client::{
    assert_success, Address, CallOptions, ChainId, ConfirmationError, ContractError, ContractId,
    ContractKind, InitConfig, RejectReason, Signer, Units,
};

use super::{issue_nfts, new_nft, TestContext};

/// Registration leaves the signer as both issuer and maker
///
/// Verifies:
/// - issuer and maker are the registering account
/// - unit is 1 for non-fungible contracts
/// - no token index is assigned before the first issue
#[tokio::test]
async fn test_register_sets_issuer_maker_and_unit() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;

    assert_eq!(&nc.get_issuer().await.unwrap(), ctx.acnt0.address());
    assert_eq!(&nc.get_maker().await.unwrap(), ctx.acnt0.address());
    assert_eq!(nc.get_unit().await.unwrap(), 1);
    assert_eq!(nc.get_last_token_index().await.unwrap(), None);
    assert_eq!(nc.kind(), ContractKind::Nft);
}

#[tokio::test]
async fn test_register_rejects_non_unit_nft_locally() {
    let ctx = TestContext::new();
    let before = ctx.node.call_count();

    let config = InitConfig::token(ContractKind::Nft, 10, 100);
    let result = vsys_token_client::ContractHandle::register(
        &ctx.chain,
        &ctx.acnt0,
        config,
        &CallOptions::new(),
    )
    .await;

    assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    assert_eq!(ctx.node.call_count(), before, "No network call expected");
}

/// Maker hands the issuer role to another account
#[tokio::test]
async fn test_supersede_by_maker() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;

    let resp = nc
        .supersede(&ctx.acnt0, ctx.acnt1.address(), &CallOptions::new())
        .await
        .expect("Failed to supersede");
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    assert_eq!(&nc.get_issuer().await.unwrap(), ctx.acnt1.address());
    assert_eq!(&nc.get_maker().await.unwrap(), ctx.acnt0.address());

    // The new issuer can mint, the old one cannot
    let resp = nc.issue(&ctx.acnt1, 1, &CallOptions::new()).await.unwrap();
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    let resp = nc.issue(&ctx.acnt0, 1, &CallOptions::new()).await.unwrap();
    ctx.wait_for_block();
    assert!(assert_success(&ctx.chain, &resp.id).await.is_err());
}

/// Supersede signed by someone other than the maker is rejected by the ledger
///
/// Verifies:
/// - the broadcast itself succeeds (authorization is a ledger rule)
/// - confirmation reports Failed with an Unauthorized reason
/// - the issuer is unchanged
#[tokio::test]
async fn test_supersede_by_non_maker_rejected() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;

    let resp = nc
        .supersede(&ctx.acnt1, ctx.acnt1.address(), &CallOptions::new())
        .await
        .expect("Broadcast should be accepted");
    ctx.wait_for_block();

    let err = assert_success(&ctx.chain, &resp.id).await.unwrap_err();
    match err {
        ConfirmationError::LedgerRejected { tx_id, reason } => {
            assert_eq!(tx_id, resp.id);
            assert_eq!(reason, RejectReason::Unauthorized);
        }
        other => panic!("Expected LedgerRejected, got {:?}", other),
    }

    assert_eq!(&nc.get_issuer().await.unwrap(), ctx.acnt0.address());
}

/// Each issue assigns the next index
#[tokio::test]
async fn test_issue_assigns_sequential_indices() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;

    issue_nfts(&ctx, &nc, 3).await;

    assert_eq!(nc.get_last_token_index().await.unwrap(), Some(2));

    for index in 0..3 {
        let token_id = nc.get_token_id(index).unwrap();
        let (ctrt, idx) = token_id.parts().unwrap();
        assert_eq!(&ctrt, nc.contract_id());
        assert_eq!(idx, index);

        assert_eq!(
            nc.get_balance(ctx.acnt0.address(), &token_id).await.unwrap(),
            1,
            "Issuer should hold token {}",
            index
        );
    }

    let unissued = nc.get_token_id(3).unwrap();
    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &unissued).await, 0);
}

#[tokio::test]
async fn test_issue_with_description_and_attachment() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::NftV2Blacklist).await;

    let options = CallOptions::new()
        .token_description("first edition")
        .attachment("minted in test");
    let resp = nc.issue(&ctx.acnt0, 1, &options).await.unwrap();
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    assert_eq!(nc.get_last_token_index().await.unwrap(), Some(0));
}

#[tokio::test]
async fn test_issue_by_non_issuer_rejected() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;

    let resp = nc.issue(&ctx.acnt1, 1, &CallOptions::new()).await.unwrap();
    ctx.wait_for_block();

    let err = assert_success(&ctx.chain, &resp.id).await.unwrap_err();
    assert!(matches!(
        err,
        ConfirmationError::LedgerRejected {
            reason: RejectReason::Unauthorized,
            ..
        }
    ));
    assert_eq!(nc.get_last_token_index().await.unwrap(), None);
}

/// Send moves a token from the signer to the recipient
#[tokio::test]
async fn test_send_moves_token() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;
    issue_nfts(&ctx, &nc, 1).await;

    let token_id = nc.get_token_id(0).unwrap();

    let resp = nc
        .send(&ctx.acnt0, ctx.acnt1.address(), Units::Token(0), &CallOptions::new())
        .await
        .expect("Failed to send");
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &token_id).await, 0);
    assert_eq!(ctx.get_tok_bal(ctx.acnt1.address(), &token_id).await, 1);
}

/// Transfer moves a token between explicit accounts
#[tokio::test]
async fn test_transfer_moves_token() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;
    issue_nfts(&ctx, &nc, 2).await;

    let token_id = nc.get_token_id(1).unwrap();

    let resp = nc
        .transfer(
            &ctx.acnt0,
            ctx.acnt0.address(),
            ctx.acnt2.address(),
            Units::Token(1),
            &CallOptions::new(),
        )
        .await
        .expect("Failed to transfer");
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &token_id).await, 0);
    assert_eq!(ctx.get_tok_bal(ctx.acnt2.address(), &token_id).await, 1);

    // Token 0 stays put
    let other = nc.get_token_id(0).unwrap();
    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &other).await, 1);
}

#[tokio::test]
async fn test_send_unowned_token_rejected() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;
    issue_nfts(&ctx, &nc, 1).await;

    let resp = nc
        .send(&ctx.acnt1, ctx.acnt2.address(), Units::Token(0), &CallOptions::new())
        .await
        .unwrap();
    ctx.wait_for_block();

    let err = assert_success(&ctx.chain, &resp.id).await.unwrap_err();
    assert!(matches!(
        err,
        ConfirmationError::LedgerRejected {
            reason: RejectReason::InsufficientBalance,
            ..
        }
    ));

    let token_id = nc.get_token_id(0).unwrap();
    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &token_id).await, 1);
    assert_eq!(ctx.get_tok_bal(ctx.acnt2.address(), &token_id).await, 0);
}

#[tokio::test]
async fn test_issue_amount_other_than_one_rejected_locally() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;
    let before = ctx.node.call_count();

    for amount in [0, 2, 100] {
        let result = nc.issue(&ctx.acnt0, amount, &CallOptions::new()).await;
        assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    }

    assert_eq!(ctx.node.call_count(), before, "No network call expected");
    assert_eq!(ctx.node.mempool_len(), 0);
}

/// Address arguments from another network are refused before signing
#[tokio::test]
async fn test_address_arguments_on_other_chain_rejected_locally() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::NftV2Whitelist).await;
    issue_nfts(&ctx, &nc, 1).await;

    let mainnet = Address::from_public_key_hash(ChainId::MainNet, [2; 20]);
    let before = ctx.node.call_count();

    let results = [
        nc.send(&ctx.acnt0, &mainnet, Units::Token(0), &CallOptions::new())
            .await,
        nc.transfer(
            &ctx.acnt0,
            ctx.acnt0.address(),
            &mainnet,
            Units::Token(0),
            &CallOptions::new(),
        )
        .await,
        nc.transfer(
            &ctx.acnt0,
            &mainnet,
            ctx.acnt1.address(),
            Units::Token(0),
            &CallOptions::new(),
        )
        .await,
        nc.supersede(&ctx.acnt0, &mainnet, &CallOptions::new()).await,
        nc.update_list_user(&ctx.acnt0, &mainnet, true, &CallOptions::new())
            .await,
    ];

    for result in results {
        assert!(
            matches!(
                result,
                Err(ContractError::ChainMismatch {
                    expected: ChainId::TestNet,
                    ..
                })
            ),
            "unexpected result {:?}",
            result
        );
    }
    assert_eq!(ctx.node.call_count(), before, "No network call expected");

    let token_id = nc.get_token_id(0).unwrap();
    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &token_id).await, 1);
}

#[tokio::test]
async fn test_amount_units_rejected_for_nft() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;
    let before = ctx.node.call_count();

    let result = nc
        .send(&ctx.acnt0, ctx.acnt1.address(), Units::Amount(5), &CallOptions::new())
        .await;

    assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    assert_eq!(ctx.node.call_count(), before);
}

#[tokio::test]
async fn test_unsupported_operation_rejected_locally() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;
    let before = ctx.node.call_count();

    let result = nc.destroy(&ctx.acnt0, 1, &CallOptions::new()).await;
    assert!(matches!(
        result,
        Err(ContractError::Registry(RegistryError::UnsupportedOperation {
            kind: ContractKind::Nft,
            operation: Operation::Destroy,
        }))
    ));

    let result = nc
        .update_list_user(&ctx.acnt0, ctx.acnt1.address(), true, &CallOptions::new())
        .await;
    assert!(matches!(result, Err(ContractError::Registry(_))));

    assert_eq!(ctx.node.call_count(), before, "No network call expected");
}

/// V2 contracts maintain a user list and still send under shifted indices
#[tokio::test]
async fn test_v2_update_list_user() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::NftV2Whitelist).await;

    let resp = nc
        .update_list_user(&ctx.acnt0, ctx.acnt1.address(), true, &CallOptions::new())
        .await
        .expect("Failed to update list");
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;
    assert!(ctx.node.is_listed(nc.contract_id(), ctx.acnt1.address()));

    let resp = nc
        .update_list_user(&ctx.acnt0, ctx.acnt1.address(), false, &CallOptions::new())
        .await
        .unwrap();
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;
    assert!(!ctx.node.is_listed(nc.contract_id(), ctx.acnt1.address()));

    issue_nfts(&ctx, &nc, 1).await;
    let resp = nc
        .send(&ctx.acnt0, ctx.acnt1.address(), Units::Token(0), &CallOptions::new())
        .await
        .unwrap();
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    let token_id = nc.get_token_id(0).unwrap();
    assert_eq!(ctx.get_tok_bal(ctx.acnt1.address(), &token_id).await, 1);
}

#[tokio::test]
async fn test_update_list_by_non_issuer_rejected() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::NftV2Blacklist).await;

    let resp = nc
        .update_list_user(&ctx.acnt1, ctx.acnt2.address(), true, &CallOptions::new())
        .await
        .unwrap();
    ctx.wait_for_block();

    assert!(assert_success(&ctx.chain, &resp.id).await.is_err());
    assert!(!ctx.node.is_listed(nc.contract_id(), ctx.acnt2.address()));
}

/// Deposit into a contract account and withdraw back out
#[tokio::test]
async fn test_deposit_and_withdraw() {
    let ctx = TestContext::new();
    let nc = new_nft(&ctx, ContractKind::Nft).await;
    issue_nfts(&ctx, &nc, 1).await;

    let token_id = nc.get_token_id(0).unwrap();
    let target = ContractId::from_hash([0x5c; 21]);

    let resp = nc
        .deposit(&ctx.acnt0, &target, Units::Token(0), &CallOptions::new())
        .await
        .expect("Failed to deposit");
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &token_id).await, 0);
    assert_eq!(ctx.node.contract_account_balance(&target, &token_id), 1);

    let resp = nc
        .withdraw(&ctx.acnt0, &target, Units::Token(0), &CallOptions::new())
        .await
        .expect("Failed to withdraw");
    ctx.wait_for_block();
    ctx.assert_tx_success(&resp.id).await;

    assert_eq!(ctx.get_tok_bal(ctx.acnt0.address(), &token_id).await, 1);
    assert_eq!(ctx.node.contract_account_balance(&target, &token_id), 0);
}
