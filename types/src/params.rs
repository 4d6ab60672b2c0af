//! Vault policy parameters.

use serde::{Deserialize, Serialize};

/// Lock-duration policy for withdrawal requests.
///
/// A request's lock duration must fall inside the closed range
/// `[min_lock_secs, max_lock_secs]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultParams {
    /// Minimum lock duration in seconds. Default: 1 hour.
    pub min_lock_secs: u64,
    /// Maximum lock duration in seconds. Default: 365 days.
    pub max_lock_secs: u64,
}

impl VaultParams {
    /// The intended production policy: locks between 1 hour and 365 days.
    pub fn standard() -> Self {
        Self {
            min_lock_secs: 3600,
            max_lock_secs: 365 * 24 * 3600,
        }
    }

    /// Whether `lock_secs` falls inside the closed policy range.
    pub fn allows_lock(&self, lock_secs: u64) -> bool {
        lock_secs >= self.min_lock_secs && lock_secs <= self.max_lock_secs
    }
}

/// Default is the standard production policy.
impl Default for VaultParams {
    fn default() -> Self {
        Self::standard()
    }
}
