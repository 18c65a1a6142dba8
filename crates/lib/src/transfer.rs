use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    primitives::{Address, Bytes, TxKind, B256, U256},
    signers::SignerSync,
};
use tracing::debug;

use crate::{
    account::GenesisAccount,
    constant::{DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE},
    error::HarnessError,
    rpc::{BlockTag, RpcProbe},
};

/// A plain value transfer, not yet signed. Nonce and chain id may be left
/// unset and resolved from the node at signing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub to: Address,
    pub value: U256,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub nonce: Option<u64>,
    pub chain_id: Option<u64>,
}

/// A signed legacy (EIP-155) transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransfer {
    pub raw: Bytes,
    pub hash: B256,
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub nonce: u64,
    pub gas_price: u128,
}

impl TransferRequest {
    pub fn new(to: Address, value: U256) -> Self {
        Self {
            to,
            value,
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit: DEFAULT_GAS_LIMIT,
            nonce: None,
            chain_id: None,
        }
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Fills a missing nonce from the sender's pending transaction count and
    /// a missing chain id from `eth_chainId`.
    pub async fn resolve(mut self, from: Address, probe: &RpcProbe) -> Result<Self, HarnessError> {
        if self.nonce.is_none() {
            self.nonce = Some(probe.transaction_count(from, BlockTag::Pending).await?);
        }
        if self.chain_id.is_none() {
            self.chain_id = Some(probe.chain_id().await?);
        }
        Ok(self)
    }

    pub fn sign(&self, account: &GenesisAccount) -> Result<SignedTransfer, HarnessError> {
        let nonce = self
            .nonce
            .ok_or_else(|| HarnessError::SigningError("transfer has no nonce".to_string()))?;
        let chain_id = self
            .chain_id
            .ok_or_else(|| HarnessError::SigningError("transfer has no chain id".to_string()))?;

        let tx = TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: Bytes::new(),
        };

        let signature = account.signer().sign_hash_sync(&tx.signature_hash())?;
        let signed = tx.into_signed(signature);
        let hash = *signed.hash();
        let raw = Bytes::from(TxEnvelope::from(signed).encoded_2718());

        debug!(%hash, nonce, chain_id, "signed transfer");

        Ok(SignedTransfer {
            raw,
            hash,
            from: account.address(),
            to: self.to,
            value: self.value,
            nonce,
            gas_price: self.gas_price,
        })
    }
}
