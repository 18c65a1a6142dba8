use alloy::primitives::{Address, U256};

use crate::{
    error::HarnessError,
    rpc::{BlockTag, RpcProbe},
};

/// Compares two balances and reports both as decimal strings on mismatch.
pub fn check_balance(
    address: Address,
    tag: BlockTag,
    expected: U256,
    actual: U256,
) -> Result<(), HarnessError> {
    if expected == actual {
        return Ok(());
    }

    Err(HarnessError::BalanceMismatch {
        address: address.to_string(),
        tag: tag.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// Reads the balance of `address` at `tag` and checks it against `expected`.
/// Returns the observed balance.
pub async fn assert_balance(
    probe: &RpcProbe,
    address: Address,
    tag: BlockTag,
    expected: U256,
) -> Result<U256, HarnessError> {
    let actual = probe.get_balance(address, tag).await?;
    check_balance(address, tag, expected, actual)?;
    Ok(actual)
}
