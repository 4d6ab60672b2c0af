//! Outbound value-transfer medium.
//!
//! The vault calls into an external medium to move funds out on the
//! execute and emergency paths. A failed transfer fails the whole
//! operation; the vault rolls its state back.

use thiserror::Error;

use crate::vault::Vault;
use vault_types::{AccountId, Amount};

/// Reported by the transfer medium when an outbound movement fails.
#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct TransferError(pub String);

impl TransferError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Moves value out of the vault's custody.
///
/// The medium receives a handle back to the vault because a real medium is
/// external code: it may attempt to re-enter before the original operation
/// finishes. The vault's reentrancy guard rejects any such mutating call.
pub trait ValueTransfer {
    fn transfer(
        &mut self,
        to: &AccountId,
        amount: Amount,
        vault: &mut Vault,
    ) -> Result<(), TransferError>;
}

/// An in-memory transfer medium that records outgoing transfers.
///
/// Succeeds by default; can be scripted to fail every call.
#[derive(Default)]
pub struct NullTransfer {
    /// Successful outgoing transfers in call order.
    pub sent: Vec<(AccountId, Amount)>,
    fail_with: Option<String>,
}

impl NullTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A medium that rejects every transfer with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Vec::new(),
            fail_with: Some(reason.into()),
        }
    }

    /// Total value successfully sent through this medium.
    pub fn total_sent(&self) -> Amount {
        self.sent
            .iter()
            .fold(Amount::ZERO, |acc, (_, amount)| acc.saturating_add(*amount))
    }
}

impl ValueTransfer for NullTransfer {
    fn transfer(
        &mut self,
        to: &AccountId,
        amount: Amount,
        _vault: &mut Vault,
    ) -> Result<(), TransferError> {
        if let Some(reason) = &self.fail_with {
            return Err(TransferError(reason.clone()));
        }
        self.sent.push((to.clone(), amount));
        Ok(())
    }
}
