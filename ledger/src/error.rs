use thiserror::Error;

use crate::request::RequestId;
use crate::transfer::TransferError;
use vault_types::{AccountId, Amount, Timestamp};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("amount must be positive and representable")]
    InvalidAmount,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("lock duration {secs}s outside allowed range [{min}s, {max}s]")]
    LockDurationOutOfRange { secs: u64, min: u64, max: u64 },

    #[error("request index {index} out of range (account has {count} requests)")]
    InvalidRequestIndex { index: RequestId, count: u64 },

    #[error("request {0} already executed")]
    AlreadyExecuted(RequestId),

    #[error("request {0} already cancelled")]
    AlreadyCancelled(RequestId),

    #[error("lock not elapsed: unlocks at {unlock_at}, now {now}")]
    LockNotElapsed { unlock_at: Timestamp, now: Timestamp },

    #[error("lock already elapsed: unlocked at {unlock_at}, now {now}")]
    LockAlreadyElapsed { unlock_at: Timestamp, now: Timestamp },

    #[error("vault is paused")]
    Paused,

    #[error("vault is not paused")]
    NotPaused,

    #[error("account {0} is not the administrator")]
    Unauthorized(AccountId),

    #[error("transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("reentrant call while another operation is in progress")]
    ReentrantCall,
}
