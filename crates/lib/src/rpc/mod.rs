pub mod block;
pub mod probe;
pub mod types;

pub use block::{BlockDriver, BlockId};
pub use probe::RpcProbe;
pub use types::{BlockTag, CreatedBlock, TransactionReceipt};

use std::{sync::Arc, time::Duration};

use crate::error::HarnessError;

pub fn get_rpc_probe(rpc_url: &str, request_timeout: Duration) -> Result<Arc<RpcProbe>, HarnessError> {
    Ok(Arc::new(RpcProbe::new(rpc_url, request_timeout)?))
}
