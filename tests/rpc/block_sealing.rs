use crate::common::*;

/// Test engine_createBlock with immediate finalization
#[tokio::test]
async fn test_finalize_block_advances_head() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    let before = ctx.probe().block_number().await.expect("Failed to get block number");

    let first = ctx.harness().finalize_block().await.expect("Failed to seal block");
    let second = ctx.harness().finalize_block().await.expect("Failed to seal block");

    // other tests in this suite may seal concurrently
    let after = ctx.probe().block_number().await.expect("Failed to get block number");
    assert!(after >= before + 2, "Head did not advance: {before} -> {after}");
    assert_ne!(first, second);
}

/// Test engine_createBlock without finalization followed by engine_finalizeBlock
#[tokio::test]
async fn test_create_then_finalize() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    let driver = ctx.harness().driver();

    let created = driver.create_block(false).await.expect("Failed to create block");
    assert!(!created.hash.is_zero(), "Created block has no hash");

    driver.finalize(created.hash).await.expect("Failed to finalize block");
}

/// Sealing empty blocks does not move funds
#[tokio::test]
async fn test_empty_block_keeps_balances() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    let genesis = ctx.harness().genesis_address();

    let before = assert_views_agree(ctx.probe(), genesis).await;
    ctx.harness().finalize_block().await.expect("Failed to seal block");
    let after = assert_views_agree(ctx.probe(), genesis).await;

    assert_eq!(before, after);
}
