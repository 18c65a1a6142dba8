//! The per-suite test context.
//!
//! A `Harness` owns the one RPC connection of a test suite together with the
//! block driver, the genesis signer and the expected-balance ledger. Steps run
//! strictly one after another; `step` bounds each of them.

use alloy::primitives::{Address, B256, U256};
use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    account::GenesisAccount,
    assertion::assert_balance,
    balance::{BalanceLedger, FeeModel, TransferOutcome},
    config::HarnessConfig,
    error::HarnessError,
    rpc::{get_rpc_probe, BlockDriver, BlockId, BlockTag, RpcProbe},
    transfer::{SignedTransfer, TransferRequest},
};

pub struct Harness {
    config: HarnessConfig,
    probe: Arc<RpcProbe>,
    driver: BlockDriver,
    genesis: GenesisAccount,
    fee_model: FeeModel,
    chain_id: u64,
    step_timeout: Duration,
    ledger: Mutex<BalanceLedger>,
}

/// What a submitted transfer was expected to do.
#[derive(Debug, Clone)]
pub struct SubmittedTransfer {
    pub signed: SignedTransfer,
    pub outcome: TransferOutcome,
}

impl SubmittedTransfer {
    pub fn hash(&self) -> B256 {
        self.signed.hash
    }
}

impl Harness {
    /// Opens the RPC connection described by `config` and seeds the ledger
    /// with the genesis balance. Fails if the node does not answer
    /// `eth_chainId` (unless the profile pins a chain id).
    pub async fn connect(config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;

        let genesis = config.genesis.load_account()?;
        let fee_model = config.fees.fee_model()?;
        let probe = get_rpc_probe(&config.node.rpc_url, config.node.request_timeout())?;
        let driver =
            BlockDriver::new(probe.clone(), config.node.settle_delay(), config.node.request_timeout());

        let chain_id = match config.node.chain_id {
            Some(chain_id) => chain_id,
            None => probe.chain_id().await?,
        };

        let mut ledger = BalanceLedger::new();
        ledger.seed(genesis.address(), config.genesis.balance);

        info!(url = %probe.url(), chain_id, genesis = %genesis.address(), "harness connected");

        Ok(Self {
            step_timeout: config.node.step_timeout(),
            config,
            probe,
            driver,
            genesis,
            fee_model,
            chain_id,
            ledger: Mutex::new(ledger),
        })
    }

    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn probe(&self) -> &Arc<RpcProbe> {
        &self.probe
    }

    pub fn driver(&self) -> &BlockDriver {
        &self.driver
    }

    pub fn fee_model(&self) -> &FeeModel {
        &self.fee_model
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn genesis_address(&self) -> Address {
        self.genesis.address()
    }

    /// Adds `address` to the accounts `verify_balances` checks, starting at 0.
    pub fn track(&self, address: Address) -> Result<(), HarnessError> {
        self.ledger()?.track(address);
        Ok(())
    }

    pub fn expected_balance(&self, address: &Address) -> Result<U256, HarnessError> {
        Ok(self.ledger()?.expected(address))
    }

    /// Signs a transfer from the genesis account with the profile's gas
    /// settings, submits it and records its expected effect.
    pub async fn transfer(
        &self,
        to: Address,
        value: U256,
    ) -> Result<SubmittedTransfer, HarnessError> {
        let from = self.genesis.address();

        // The ledger only changes once the node has accepted the transaction.
        let mut staged = self.ledger()?.clone();
        let outcome =
            staged.apply_transfer(&self.fee_model, from, to, value, self.fee_model.transfer_gas)?;

        let request = TransferRequest::new(to, value)
            .with_gas_price(self.fee_model.gas_price)
            .with_gas_limit(self.config.fees.gas_limit)
            .with_chain_id(self.chain_id)
            .resolve(from, &self.probe)
            .await?;

        let signed = request.sign(&self.genesis)?;
        let hash = self.probe.send_raw_transaction(&signed.raw).await?;
        if hash != signed.hash {
            return Err(HarnessError::InvalidResponse(format!(
                "node returned hash {hash} for transaction {}",
                signed.hash
            )));
        }

        *self.ledger()? = staged;

        info!(
            %hash,
            %to,
            %value,
            nonce = signed.nonce,
            credited = outcome.credited,
            "submitted transfer"
        );
        Ok(SubmittedTransfer { signed, outcome })
    }

    /// Checks every tracked account at `tag`, stopping at the first mismatch.
    pub async fn verify_balances(&self, tag: BlockTag) -> Result<(), HarnessError> {
        let expected: Vec<(Address, U256)> =
            self.ledger()?.tracked().map(|(address, balance)| (*address, *balance)).collect();

        for (address, balance) in expected {
            assert_balance(&self.probe, address, tag, balance).await?;
        }
        Ok(())
    }

    pub async fn finalize_block(&self) -> Result<BlockId, HarnessError> {
        self.driver.finalize_block().await
    }

    /// Runs `fut` as the step `name`, failing with `StepTimeout` when it does
    /// not complete within the step timeout.
    pub async fn step<T, F>(&self, name: &str, fut: F) -> Result<T, HarnessError>
    where
        F: Future<Output = Result<T, HarnessError>>,
    {
        info!(step = name, "running step");
        match tokio::time::timeout(self.step_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(step = name, timeout = ?self.step_timeout, "step timed out");
                Err(HarnessError::StepTimeout { step: name.to_string(), timeout: self.step_timeout })
            }
        }
    }

    /// Submit, check pending state, seal, check finalized state.
    pub async fn transfer_and_verify(
        &self,
        to: Address,
        value: U256,
    ) -> Result<SubmittedTransfer, HarnessError> {
        self.track(to)?;
        let submitted = self.step("submit transfer", self.transfer(to, value)).await?;
        self.step("verify pending balances", self.verify_balances(BlockTag::Pending)).await?;
        self.step("finalize block", self.finalize_block()).await?;
        self.step("verify latest balances", self.verify_balances(BlockTag::Latest)).await?;
        Ok(submitted)
    }

    fn ledger(&self) -> Result<MutexGuard<'_, BalanceLedger>, HarnessError> {
        self.ledger
            .lock()
            .map_err(|e| HarnessError::InternalError(format!("ledger lock poisoned: {e}")))
    }
}
