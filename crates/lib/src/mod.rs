pub mod account;
pub mod assertion;
pub mod balance;
pub mod config;
pub mod constant;
pub mod error;
pub mod harness;
pub mod log;
pub mod rpc;
pub mod sanitize;
pub mod transfer;
pub use account::GenesisAccount;
pub use balance::{BalanceLedger, FeeModel};
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use harness::Harness;
pub use rpc::{BlockDriver, BlockTag, RpcProbe};
pub use transfer::{SignedTransfer, TransferRequest};
