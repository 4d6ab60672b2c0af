//! Fundamental types for the timelock vault.
//!
//! This crate defines the core types shared across the workspace:
//! account identities, amounts, timestamps, and vault policy parameters.

pub mod account;
pub mod amount;
pub mod params;
pub mod time;

pub use account::AccountId;
pub use amount::Amount;
pub use params::VaultParams;
pub use time::Timestamp;
