//! Administrator identity and the global pause flag.
//!
//! Access control is an explicit comparison against a stored administrator
//! field plus a plain boolean — no role hierarchy.

use crate::error::VaultError;
use vault_types::AccountId;

/// Owns the pause flag and the single administrator identity.
///
/// Gates which vault operations are callable: normal mutators are rejected
/// while paused, and the emergency path is only callable while paused.
#[derive(Clone, Debug)]
pub struct AccessController {
    admin: AccountId,
    paused: bool,
}

impl AccessController {
    /// The administrator is fixed at construction; the vault starts active.
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            paused: false,
        }
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reject callers other than the administrator.
    pub fn ensure_admin(&self, caller: &AccountId) -> Result<(), VaultError> {
        if caller != &self.admin {
            return Err(VaultError::Unauthorized(caller.clone()));
        }
        Ok(())
    }

    /// Gate for the normal mutators: fails while paused.
    pub fn ensure_active(&self) -> Result<(), VaultError> {
        if self.paused {
            return Err(VaultError::Paused);
        }
        Ok(())
    }

    /// Gate for the emergency path: fails unless paused.
    pub fn ensure_paused(&self) -> Result<(), VaultError> {
        if !self.paused {
            return Err(VaultError::NotPaused);
        }
        Ok(())
    }

    /// Set the pause flag. Pausing an already-paused vault is an
    /// invalid-state error, not a no-op.
    pub fn pause(&mut self, caller: &AccountId) -> Result<(), VaultError> {
        self.ensure_admin(caller)?;
        if self.paused {
            return Err(VaultError::Paused);
        }
        self.paused = true;
        Ok(())
    }

    /// Clear the pause flag. Unpausing an active vault is an invalid-state
    /// error, not a no-op.
    pub fn unpause(&mut self, caller: &AccountId) -> Result<(), VaultError> {
        self.ensure_admin(caller)?;
        if !self.paused {
            return Err(VaultError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }
}
