//! Expected-balance bookkeeping.
//!
//! The node's fee and existential-deposit rules are external, so the ledger
//! encodes them as a fixed model and every test compares the node against it:
//!
//! - `fee = gas_used * gas_price`
//! - `threshold = existential_deposit * deposit_scale`
//! - a transfer that would leave the recipient below `threshold` is dropped:
//!   the sender pays only `fee`
//! - otherwise the sender pays `value + fee`; a recipient that did not exist
//!   yet is credited `value - threshold`, an existing one `value`

use alloy::primitives::{Address, U256};
use std::collections::BTreeMap;

use crate::error::HarnessError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeModel {
    pub gas_price: u128,
    pub transfer_gas: u64,
    pub existential_deposit: U256,
    pub deposit_scale: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub sender_debit: U256,
    pub recipient_credit: U256,
    pub credited: bool,
}

impl FeeModel {
    pub fn threshold(&self) -> Result<U256, HarnessError> {
        self.existential_deposit.checked_mul(self.deposit_scale).ok_or_else(|| {
            HarnessError::ArithmeticError("existential deposit threshold overflows".to_string())
        })
    }

    pub fn fee(&self, gas_used: u64) -> Result<U256, HarnessError> {
        U256::from(gas_used)
            .checked_mul(U256::from(self.gas_price))
            .ok_or_else(|| HarnessError::ArithmeticError("fee overflows".to_string()))
    }

    /// Outcome of a plain value transfer that consumed `gas_used`.
    pub fn transfer_outcome(
        &self,
        value: U256,
        gas_used: u64,
        recipient_before: U256,
    ) -> Result<TransferOutcome, HarnessError> {
        let fee = self.fee(gas_used)?;
        let threshold = self.threshold()?;

        let resulting = recipient_before.checked_add(value).ok_or_else(|| {
            HarnessError::ArithmeticError("recipient balance overflows".to_string())
        })?;

        if resulting < threshold {
            return Ok(TransferOutcome {
                sender_debit: fee,
                recipient_credit: U256::ZERO,
                credited: false,
            });
        }

        let sender_debit = value
            .checked_add(fee)
            .ok_or_else(|| HarnessError::ArithmeticError("sender debit overflows".to_string()))?;

        let recipient_credit = if recipient_before.is_zero() {
            // resulting >= threshold and recipient_before == 0, so value >= threshold
            value - threshold
        } else {
            value
        };

        Ok(TransferOutcome { sender_debit, recipient_credit, credited: true })
    }

    /// Outcome for a standard transfer (`transfer_gas` used).
    pub fn simple_transfer(
        &self,
        value: U256,
        recipient_before: U256,
    ) -> Result<TransferOutcome, HarnessError> {
        self.transfer_outcome(value, self.transfer_gas, recipient_before)
    }
}

/// Expected balances of every account a test touches. Untracked accounts are
/// assumed empty.
#[derive(Debug, Clone, Default)]
pub struct BalanceLedger {
    balances: BTreeMap<Address, U256>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, address: Address, balance: U256) {
        self.balances.insert(address, balance);
    }

    /// Starts tracking `address` at zero if it is not tracked yet.
    pub fn track(&mut self, address: Address) {
        self.balances.entry(address).or_insert(U256::ZERO);
    }

    pub fn expected(&self, address: &Address) -> U256 {
        self.balances.get(address).copied().unwrap_or(U256::ZERO)
    }

    pub fn tracked(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter()
    }

    /// Applies a transfer from `from` to `to` and returns what happened.
    /// Nothing is written if the sender cannot cover the debit.
    pub fn apply_transfer(
        &mut self,
        model: &FeeModel,
        from: Address,
        to: Address,
        value: U256,
        gas_used: u64,
    ) -> Result<TransferOutcome, HarnessError> {
        let recipient_before = self.expected(&to);
        let outcome = model.transfer_outcome(value, gas_used, recipient_before)?;

        let sender_after =
            self.expected(&from).checked_sub(outcome.sender_debit).ok_or_else(|| {
                HarnessError::ArithmeticError(format!(
                    "{from} cannot cover a debit of {}",
                    outcome.sender_debit
                ))
            })?;

        self.balances.insert(from, sender_after);
        // self-transfer: sender_after already reflects the debit
        let recipient_after =
            self.expected(&to).checked_add(outcome.recipient_credit).ok_or_else(|| {
                HarnessError::ArithmeticError(format!("{to} balance overflows"))
            })?;
        self.balances.insert(to, recipient_after);

        Ok(outcome)
    }
}
