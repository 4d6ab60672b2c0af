//! Nullable infrastructure for deterministic testing.
//!
//! The vault core takes the current time as an explicit parameter; the
//! [`NullClock`] here is the deterministic source tests read it from.

pub mod clock;

pub use clock::NullClock;
