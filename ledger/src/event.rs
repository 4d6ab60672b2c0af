//! Events emitted on each successful state change for subscribers.

use crate::request::RequestId;
use vault_types::{AccountId, Amount, Timestamp};

/// Vault-level events that observers can subscribe to via the [`EventBus`].
///
/// One event per successful mutating operation, carrying exactly the fields
/// of that state change. Failed operations emit nothing.
#[derive(Clone, Debug)]
pub enum VaultEvent {
    /// Value was deposited into an account's spendable balance.
    Deposited { account: AccountId, amount: Amount },
    /// A withdrawal was scheduled and its amount reserved.
    WithdrawalRequested {
        account: AccountId,
        amount: Amount,
        unlock_at: Timestamp,
        request_id: RequestId,
    },
    /// A matured request was executed and its amount transferred out.
    WithdrawalExecuted {
        account: AccountId,
        amount: Amount,
        request_id: RequestId,
    },
    /// A pending request was cancelled and its amount restored.
    WithdrawalCancelled {
        account: AccountId,
        request_id: RequestId,
    },
    /// The administrator drained custodial funds while paused.
    EmergencyWithdrawal { admin: AccountId, amount: Amount },
    /// The administrator paused the vault.
    Paused { admin: AccountId },
    /// The administrator unpaused the vault.
    Unpaused { admin: AccountId },
}

/// Synchronous fan-out event bus for vault events.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast
/// to avoid stalling vault operations.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&VaultEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&VaultEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &VaultEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn test_account() -> AccountId {
        AccountId::new("acct_1")
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        let event = VaultEvent::Deposited {
            account: test_account(),
            amount: Amount::new(5),
        };
        bus.emit(&event);

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        let event = VaultEvent::Paused {
            admin: test_account(),
        };
        bus.emit(&event); // should not panic
    }

    #[test]
    fn listener_receives_correct_event_variant() {
        let saw_requested = Arc::new(AtomicUsize::new(0));
        let saw_cancelled = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let sr = Arc::clone(&saw_requested);
        let sc = Arc::clone(&saw_cancelled);
        bus.subscribe(Box::new(move |event| match event {
            VaultEvent::WithdrawalRequested { .. } => {
                sr.fetch_add(1, Ordering::SeqCst);
            }
            VaultEvent::WithdrawalCancelled { .. } => {
                sc.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));

        bus.emit(&VaultEvent::WithdrawalRequested {
            account: test_account(),
            amount: Amount::new(5),
            unlock_at: Timestamp::new(100),
            request_id: 0,
        });
        bus.emit(&VaultEvent::WithdrawalCancelled {
            account: test_account(),
            request_id: 0,
        });

        assert_eq!(saw_requested.load(Ordering::SeqCst), 1);
        assert_eq!(saw_cancelled.load(Ordering::SeqCst), 1);
    }
}
