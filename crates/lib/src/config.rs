use alloy::primitives::{Address, U256};
use serde::{Deserialize, Deserializer};
use std::{fs, path::Path, str::FromStr, time::Duration};

use crate::{
    account::GenesisAccount,
    balance::FeeModel,
    constant::{
        DEFAULT_DEPOSIT_SCALE, DEFAULT_EXISTENTIAL_DEPOSIT, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE,
        DEFAULT_REQUEST_TIMEOUT, DEFAULT_RPC_URL, DEFAULT_SETTLE_DELAY, DEFAULT_STEP_TIMEOUT,
        GENESIS_ACCOUNT, GENESIS_ACCOUNT_BALANCE, GENESIS_ACCOUNT_PRIVATE_KEY, TRANSFER_GAS,
    },
    error::HarnessError,
    sanitize_error,
};

pub const RPC_URL_ENV: &str = "HARNESS_RPC_URL";
pub const GENESIS_ACCOUNT_ENV: &str = "GENESIS_ACCOUNT";
pub const GENESIS_PRIVATE_KEY_ENV: &str = "GENESIS_PRIVATE_KEY";

/// A network profile: where the node is, who owns genesis funds and which
/// fee constants the node applies.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub genesis: GenesisConfig,
    #[serde(default)]
    pub fees: FeeConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_step_timeout_secs")]
    pub step_timeout_secs: u64,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Signs with this chain id instead of asking the node
    pub chain_id: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            request_timeout_secs: default_request_timeout_secs(),
            step_timeout_secs: default_step_timeout_secs(),
            settle_delay_ms: default_settle_delay_ms(),
            chain_id: None,
        }
    }
}

impl NodeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenesisConfig {
    pub account: Address,
    pub private_key: String,
    #[serde(deserialize_with = "deserialize_u256")]
    pub balance: U256,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            account: Address::from_str(GENESIS_ACCOUNT).unwrap_or_default(),
            private_key: GENESIS_ACCOUNT_PRIVATE_KEY.to_string(),
            balance: U256::from_str(GENESIS_ACCOUNT_BALANCE).unwrap_or_default(),
        }
    }
}

impl GenesisConfig {
    pub fn load_account(&self) -> Result<GenesisAccount, HarnessError> {
        GenesisAccount::from_private_key(&self.private_key, Some(self.account))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FeeConfig {
    #[serde(default = "default_gas_price", deserialize_with = "deserialize_u256")]
    pub gas_price: U256,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    #[serde(default = "default_transfer_gas")]
    pub transfer_gas: u64,
    #[serde(default = "default_existential_deposit")]
    pub existential_deposit: u64,
    #[serde(default = "default_deposit_scale")]
    pub deposit_scale: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            gas_price: default_gas_price(),
            gas_limit: default_gas_limit(),
            transfer_gas: default_transfer_gas(),
            existential_deposit: default_existential_deposit(),
            deposit_scale: default_deposit_scale(),
        }
    }
}

impl FeeConfig {
    pub fn fee_model(&self) -> Result<FeeModel, HarnessError> {
        let gas_price: u128 = self.gas_price.try_into().map_err(|_| {
            HarnessError::ConfigError(format!("gas_price {} does not fit in u128", self.gas_price))
        })?;

        Ok(FeeModel {
            gas_price,
            transfer_gas: self.transfer_gas,
            existential_deposit: U256::from(self.existential_deposit),
            deposit_scale: U256::from(self.deposit_scale),
        })
    }
}

impl HarnessConfig {
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HarnessConfig, HarnessError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            HarnessError::ConfigError(format!("Failed to read config file: {}", sanitize_error!(e)))
        })?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<HarnessConfig, HarnessError> {
        let config: HarnessConfig = toml::from_str(contents).map_err(|e| {
            HarnessError::ConfigError(format!(
                "Failed to parse config file: {}",
                sanitize_error!(e)
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Applies `HARNESS_RPC_URL`, `GENESIS_ACCOUNT` and `GENESIS_PRIVATE_KEY`
    /// from the process environment (or `.env`) on top of the file values.
    pub fn with_env_overrides(mut self) -> Result<HarnessConfig, HarnessError> {
        dotenv::dotenv().ok();

        if let Ok(rpc_url) = std::env::var(RPC_URL_ENV) {
            self.node.rpc_url = rpc_url;
        }
        if let Ok(account) = std::env::var(GENESIS_ACCOUNT_ENV) {
            self.genesis.account = Address::from_str(account.trim()).map_err(|e| {
                HarnessError::ConfigError(format!("Invalid {GENESIS_ACCOUNT_ENV}: {e}"))
            })?;
        }
        if let Ok(private_key) = std::env::var(GENESIS_PRIVATE_KEY_ENV) {
            self.genesis.private_key = private_key.trim().to_string();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.node.rpc_url.is_empty() {
            return Err(HarnessError::ConfigError("node.rpc_url must not be empty".to_string()));
        }
        if self.node.request_timeout_secs == 0 || self.node.step_timeout_secs == 0 {
            return Err(HarnessError::ConfigError("node timeouts must be non-zero".to_string()));
        }
        if self.fees.gas_limit < self.fees.transfer_gas {
            return Err(HarnessError::ConfigError(format!(
                "fees.gas_limit {} is below fees.transfer_gas {}",
                self.fees.gas_limit, self.fees.transfer_gas
            )));
        }
        self.fees.fee_model()?.threshold()?;
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Number(u64),
    Text(String),
}

/// Accepts TOML integers as well as decimal or `0x` strings, since balances
/// overflow TOML's i64.
fn deserialize_u256<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    match QuantityRepr::deserialize(deserializer)? {
        QuantityRepr::Number(n) => Ok(U256::from(n)),
        QuantityRepr::Text(s) => U256::from_str(s.trim()).map_err(serde::de::Error::custom),
    }
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_step_timeout_secs() -> u64 {
    DEFAULT_STEP_TIMEOUT.as_secs()
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY.as_millis() as u64
}

fn default_gas_price() -> U256 {
    U256::from(DEFAULT_GAS_PRICE)
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_transfer_gas() -> u64 {
    TRANSFER_GAS
}

fn default_existential_deposit() -> u64 {
    DEFAULT_EXISTENTIAL_DEPOSIT
}

fn default_deposit_scale() -> u64 {
    DEFAULT_DEPOSIT_SCALE
}
