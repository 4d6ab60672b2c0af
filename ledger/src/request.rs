//! Scheduled withdrawal requests.

use serde::{Deserialize, Serialize};
use vault_types::{Amount, Timestamp};

/// Index of a request within an account's queue.
///
/// Ids are 0-based, assigned monotonically in creation order, and stable
/// forever: terminal requests keep their slot, only their flags flip.
pub type RequestId = u64;

/// A single scheduled withdrawal.
///
/// `amount` and `unlock_at` are fixed at creation. The request transitions
/// at most once, to either executed or cancelled; both states are terminal
/// and mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// Value reserved from the account's balance when the request was created.
    pub amount: Amount,
    /// Absolute time after which the request becomes executable (and stops
    /// being cancellable).
    pub unlock_at: Timestamp,
    pub executed: bool,
    pub cancelled: bool,
}

impl WithdrawalRequest {
    pub fn new(amount: Amount, unlock_at: Timestamp) -> Self {
        Self {
            amount,
            unlock_at,
            executed: false,
            cancelled: false,
        }
    }

    /// Neither executed nor cancelled — the reserved amount is still held.
    pub fn is_pending(&self) -> bool {
        !self.executed && !self.cancelled
    }

    /// Whether the unlock time has been reached.
    pub fn is_unlocked(&self, now: Timestamp) -> bool {
        now >= self.unlock_at
    }
}
