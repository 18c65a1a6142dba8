use crate::common::*;
use alloy::primitives::{Bytes, U256};
use frontier_harness::{BlockTag, GenesisAccount, TransferRequest};

/// Test eth_sendRawTransaction with bytes that are not a transaction
#[tokio::test]
async fn test_malformed_raw_transaction() {
    let ctx = TestContext::new().await.expect("Failed to create test context");

    let (code, message) = ctx
        .probe()
        .send_raw_transaction(&Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]))
        .await
        .assert_node_rejected();

    assert!(code < 0, "Unexpected error code {code}: {message}");
}

/// Test a correctly signed transfer from an account with no funds
#[tokio::test]
async fn test_unfunded_sender_rejected() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    let sender = GenesisAccount::from_private_key(UNFUNDED_PRIVATE_KEY, None)
        .expect("Failed to load unfunded key");
    let recipient = unique_account("rpc-unfunded");

    let signed = TransferRequest::new(recipient, U256::from(HIGH_TRANSFER_VALUE))
        .with_chain_id(ctx.harness().chain_id())
        .resolve(sender.address(), ctx.probe())
        .await
        .expect("Failed to resolve transfer")
        .sign(&sender)
        .expect("Failed to sign transfer");

    ctx.probe().send_raw_transaction(&signed.raw).await.assert_node_rejected();

    let balance = ctx
        .probe()
        .get_balance(recipient, BlockTag::Pending)
        .await
        .expect("Failed to get balance");
    assert_eq!(balance, U256::ZERO);
}

/// Test a transfer signed for another chain
#[tokio::test]
async fn test_wrong_chain_id_rejected() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    let sender = GenesisAccount::from_private_key(UNFUNDED_PRIVATE_KEY, None)
        .expect("Failed to load unfunded key");

    let signed = TransferRequest::new(unique_account("rpc-chain"), U256::from(1u64))
        .with_nonce(0)
        .with_chain_id(ctx.harness().chain_id() + 1)
        .sign(&sender)
        .expect("Failed to sign transfer");

    ctx.probe().send_raw_transaction(&signed.raw).await.assert_node_rejected();
}

/// Test calling a method the node does not expose
#[tokio::test]
async fn test_unknown_method() {
    let ctx = TestContext::new().await.expect("Failed to create test context");

    ctx.probe().call_raw("eth_definitelyNotAMethod", vec![]).await.assert_error_code(-32601);
}
