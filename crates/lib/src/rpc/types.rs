use alloy::primitives::{Address, B256, U256, U64};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Which view of state a query reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    /// Finalized state (the head the node reports as `latest`)
    Latest,
    /// Includes submitted but not yet sealed transactions
    Pending,
    Earliest,
    Number(u64),
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Pending => f.write_str("pending"),
            BlockTag::Earliest => f.write_str("earliest"),
            BlockTag::Number(n) => write!(f, "{n:#x}"),
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `engine_createBlock` result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedBlock {
    pub hash: B256,
    #[serde(default)]
    pub aux: ImportedAux,
}

/// Import flags reported by the manual-seal engine (snake_case on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportedAux {
    pub header_only: bool,
    pub clear_justification_requests: bool,
    pub needs_justification: bool,
    pub bad_justification: bool,
    pub is_new_best: bool,
}

/// The subset of `eth_getTransactionReceipt` the harness reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_hash: Option<B256>,
    pub block_number: Option<U64>,
    pub from: Address,
    pub to: Option<Address>,
    pub gas_used: U256,
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s == U64::from(1)).unwrap_or(false)
    }

    pub fn gas_used(&self) -> u64 {
        self.gas_used.saturating_to()
    }
}
