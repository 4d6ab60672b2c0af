//! Timelock vault core.
//!
//! A custodial ledger of per-account balances plus per-account queues of
//! scheduled, cancellable withdrawal requests, each gated by an absolute
//! unlock time. An administrator can pause the vault and, while paused,
//! drain custodial funds through the emergency path.
//!
//! The vault never reads a clock or moves value itself: callers pass the
//! current time into each operation and supply a [`ValueTransfer`] medium
//! for the outbound paths.

pub mod access;
pub mod error;
pub mod event;
pub mod request;
pub mod transfer;
pub mod vault;

pub use access::AccessController;
pub use error::VaultError;
pub use event::{EventBus, VaultEvent};
pub use request::{RequestId, WithdrawalRequest};
pub use transfer::{NullTransfer, TransferError, ValueTransfer};
pub use vault::Vault;
