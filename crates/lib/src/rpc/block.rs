use alloy::primitives::B256;
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tracing::info;

use crate::{
    constant::methods::{ENGINE_CREATE_BLOCK, ENGINE_FINALIZE_BLOCK},
    error::HarnessError,
    rpc::{probe::RpcProbe, types::CreatedBlock},
};

pub type BlockId = B256;

/// Seals blocks on a node running with manual sealing.
pub struct BlockDriver {
    probe: Arc<RpcProbe>,
    settle_delay: Duration,
    timeout: Duration,
}

impl BlockDriver {
    pub fn new(probe: Arc<RpcProbe>, settle_delay: Duration, timeout: Duration) -> Self {
        Self { probe, settle_delay, timeout }
    }

    /// Seals every pending transaction into a new finalized block and returns
    /// its hash once the node has acknowledged it.
    pub async fn finalize_block(&self) -> Result<BlockId, HarnessError> {
        Ok(self.create_block(true).await?.hash)
    }

    /// `engine_createBlock(create_empty = true, finalize, parent_hash = null)`
    pub async fn create_block(&self, finalize: bool) -> Result<CreatedBlock, HarnessError> {
        let params = vec![json!(true), json!(finalize), Value::Null];
        let created: Option<CreatedBlock> =
            tokio::time::timeout(self.timeout, self.probe.call(ENGINE_CREATE_BLOCK, params))
                .await??;

        let created = created.ok_or_else(|| {
            HarnessError::InvalidResponse(format!("{ENGINE_CREATE_BLOCK} returned no block"))
        })?;

        info!(hash = %created.hash, finalize, "sealed block");
        self.settle().await;
        Ok(created)
    }

    /// Finalizes a block created with `create_block(false)`.
    pub async fn finalize(&self, hash: BlockId) -> Result<(), HarnessError> {
        let finalized: bool = tokio::time::timeout(
            self.timeout,
            self.probe.call(ENGINE_FINALIZE_BLOCK, vec![json!(hash)]),
        )
        .await??;

        if !finalized {
            return Err(HarnessError::InvalidResponse(format!(
                "{ENGINE_FINALIZE_BLOCK} refused to finalize {hash}"
            )));
        }

        info!(%hash, "finalized block");
        self.settle().await;
        Ok(())
    }

    // The node's RPC view lags the import notification slightly.
    async fn settle(&self) {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
    }
}
