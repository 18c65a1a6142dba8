use std::time::Duration;

// Node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:19932";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

// Genesis (frontier dev chain)
pub const GENESIS_ACCOUNT: &str = "0x6be02d1d3665660d22ff9624b7be0551ee1ac91b";
pub const GENESIS_ACCOUNT_PRIVATE_KEY: &str =
    "0x99B3C12287537E38C90A9219D4CB074A89A16E9CDB20BF85728EBD97C343E342";
pub const GENESIS_ACCOUNT_BALANCE: &str = "34028236692093846346337460743176821095500000000";

// Fees
pub const TRANSFER_GAS: u64 = 21_000;
pub const DEFAULT_GAS_LIMIT: u64 = 0x100000;
pub const DEFAULT_GAS_PRICE: u128 = 1_000_000_000; // BASE_FEE
pub const DEFAULT_EXISTENTIAL_DEPOSIT: u64 = 500;
pub const DEFAULT_DEPOSIT_SCALE: u64 = 100_000_000;

pub mod methods {
    pub const ETH_GET_BALANCE: &str = "eth_getBalance";
    pub const ETH_SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";
    pub const ETH_CHAIN_ID: &str = "eth_chainId";
    pub const ETH_GET_TRANSACTION_COUNT: &str = "eth_getTransactionCount";
    pub const ETH_BLOCK_NUMBER: &str = "eth_blockNumber";
    pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
    pub const ENGINE_CREATE_BLOCK: &str = "engine_createBlock";
    pub const ENGINE_FINALIZE_BLOCK: &str = "engine_finalizeBlock";
}
