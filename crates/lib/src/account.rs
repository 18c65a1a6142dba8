use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use std::{fmt, str::FromStr};

use crate::error::HarnessError;

/// A funded account whose key the harness holds.
#[derive(Clone)]
pub struct GenesisAccount {
    signer: PrivateKeySigner,
}

impl GenesisAccount {
    /// Parses a hex private key (with or without `0x`). When `expected` is given
    /// the derived address must match it, which catches profiles whose key and
    /// account were edited independently.
    pub fn from_private_key(
        private_key: &str,
        expected: Option<Address>,
    ) -> Result<Self, HarnessError> {
        let signer = PrivateKeySigner::from_str(private_key.trim()).map_err(|_| {
            HarnessError::ConfigError("Invalid genesis private key".to_string())
        })?;

        if let Some(expected) = expected {
            if signer.address() != expected {
                return Err(HarnessError::ConfigError(format!(
                    "Genesis private key belongs to {}, not {expected}",
                    signer.address()
                )));
            }
        }

        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

// Never print the key.
impl fmt::Debug for GenesisAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenesisAccount").field("address", &self.address()).finish()
    }
}
