//! The vault — balances, scheduled withdrawals, and the emergency path.
//!
//! Every mutating operation follows the same shape: reentrancy guard first,
//! then the pause gate, then the operation's own guards, then state
//! mutation, then (execute/emergency only) the outbound transfer, then the
//! event. State that feeds a guard condition is committed before the
//! external call; a failed transfer rolls the operation back completely.

use std::collections::HashMap;

use tracing::info;

use crate::access::AccessController;
use crate::error::VaultError;
use crate::event::{EventBus, VaultEvent};
use crate::request::{RequestId, WithdrawalRequest};
use crate::transfer::ValueTransfer;
use vault_types::{AccountId, Amount, Timestamp, VaultParams};

/// A time-locked custodial ledger with a single administrator.
pub struct Vault {
    access: AccessController,
    params: VaultParams,
    balances: HashMap<AccountId, Amount>,
    /// Append-only per-account request queues. Indices are request ids:
    /// stable, never reused, never removed.
    requests: HashMap<AccountId, Vec<WithdrawalRequest>>,
    /// Total custodial value held, across spendable balances and pending
    /// reservations. Emergency withdrawals debit only this counter.
    total_held: Amount,
    events: EventBus,
    /// In-progress flag: set on entry and cleared on exit of every mutating
    /// operation, checked before anything else.
    entered: bool,
}

impl Vault {
    pub fn new(admin: AccountId) -> Self {
        Self::with_params(admin, VaultParams::default())
    }

    pub fn with_params(admin: AccountId, params: VaultParams) -> Self {
        Self {
            access: AccessController::new(admin),
            params,
            balances: HashMap::new(),
            requests: HashMap::new(),
            total_held: Amount::ZERO,
            events: EventBus::new(),
            entered: false,
        }
    }

    /// Subscribe to vault events. Listeners run inline on each emit.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&VaultEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Mutating operations ──────────────────────────────────────────────

    /// Credit `amount` to `account`'s spendable balance.
    ///
    /// The matching inbound value movement is the caller's responsibility.
    pub fn deposit(&mut self, account: AccountId, amount: Amount) -> Result<(), VaultError> {
        self.enter()?;
        let result = self.deposit_inner(account, amount);
        self.exit();
        result
    }

    /// Schedule a withdrawal of `amount`, locked for `lock_secs` from `now`.
    ///
    /// The amount is reserved (removed from the spendable balance)
    /// immediately; it leaves custody only on execution. Returns the new
    /// request's id: the previous length of the account's queue.
    pub fn request_withdrawal(
        &mut self,
        account: AccountId,
        amount: Amount,
        lock_secs: u64,
        now: Timestamp,
    ) -> Result<RequestId, VaultError> {
        self.enter()?;
        let result = self.request_inner(account, amount, lock_secs, now);
        self.exit();
        result
    }

    /// Execute a matured request, transferring its amount to `account`.
    pub fn execute_withdrawal(
        &mut self,
        account: &AccountId,
        request_id: RequestId,
        now: Timestamp,
        transfer: &mut dyn ValueTransfer,
    ) -> Result<(), VaultError> {
        self.enter()?;
        let result = self.execute_inner(account, request_id, now, transfer);
        self.exit();
        result
    }

    /// Cancel a still-locked request, restoring its amount to the balance.
    pub fn cancel_withdrawal(
        &mut self,
        account: &AccountId,
        request_id: RequestId,
        now: Timestamp,
    ) -> Result<(), VaultError> {
        self.enter()?;
        let result = self.cancel_inner(account, request_id, now);
        self.exit();
        result
    }

    /// Administrator-only, paused-only: drain `amount` of custodial value
    /// to the administrator, bypassing per-account balances and locks.
    ///
    /// No account balance is adjusted — the drained value is reconciled
    /// out-of-band by the embedding system.
    pub fn emergency_withdrawal(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        transfer: &mut dyn ValueTransfer,
    ) -> Result<(), VaultError> {
        self.enter()?;
        let result = self.emergency_inner(caller, amount, transfer);
        self.exit();
        result
    }

    /// Administrator-only: pause the vault. Fails if already paused.
    pub fn pause(&mut self, caller: &AccountId) -> Result<(), VaultError> {
        self.enter()?;
        let result = self.pause_inner(caller);
        self.exit();
        result
    }

    /// Administrator-only: unpause the vault. Fails if not paused.
    pub fn unpause(&mut self, caller: &AccountId) -> Result<(), VaultError> {
        self.enter()?;
        let result = self.unpause_inner(caller);
        self.exit();
        result
    }

    // ── Read-only accessors ──────────────────────────────────────────────

    /// Spendable balance for `account`; zero for unknown accounts.
    pub fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// Look up a request by account and id.
    pub fn request(
        &self,
        account: &AccountId,
        request_id: RequestId,
    ) -> Result<&WithdrawalRequest, VaultError> {
        let count = self.request_count(account);
        self.requests
            .get(account)
            .and_then(|queue| queue.get(request_id as usize))
            .ok_or(VaultError::InvalidRequestIndex {
                index: request_id,
                count,
            })
    }

    /// Number of requests ever created for `account` (terminal ones included).
    pub fn request_count(&self, account: &AccountId) -> u64 {
        self.requests.get(account).map_or(0, |queue| queue.len() as u64)
    }

    /// Total custodial value held by the vault.
    pub fn total_held(&self) -> Amount {
        self.total_held
    }

    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    pub fn admin(&self) -> &AccountId {
        self.access.admin()
    }

    pub fn params(&self) -> &VaultParams {
        &self.params
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn enter(&mut self) -> Result<(), VaultError> {
        if self.entered {
            return Err(VaultError::ReentrantCall);
        }
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) {
        self.entered = false;
    }

    fn request_mut(
        &mut self,
        account: &AccountId,
        request_id: RequestId,
    ) -> Result<&mut WithdrawalRequest, VaultError> {
        let count = self.request_count(account);
        self.requests
            .get_mut(account)
            .and_then(|queue| queue.get_mut(request_id as usize))
            .ok_or(VaultError::InvalidRequestIndex {
                index: request_id,
                count,
            })
    }

    fn deposit_inner(&mut self, account: AccountId, amount: Amount) -> Result<(), VaultError> {
        self.access.ensure_active()?;
        if amount.is_zero() {
            return Err(VaultError::InvalidAmount);
        }
        let new_balance = self
            .balance(&account)
            .checked_add(amount)
            .ok_or(VaultError::InvalidAmount)?;
        let new_total = self
            .total_held
            .checked_add(amount)
            .ok_or(VaultError::InvalidAmount)?;

        self.balances.insert(account.clone(), new_balance);
        self.total_held = new_total;

        info!(account = %account, amount = %amount, "deposit");
        self.events.emit(&VaultEvent::Deposited { account, amount });
        Ok(())
    }

    fn request_inner(
        &mut self,
        account: AccountId,
        amount: Amount,
        lock_secs: u64,
        now: Timestamp,
    ) -> Result<RequestId, VaultError> {
        self.access.ensure_active()?;
        if amount.is_zero() {
            return Err(VaultError::InvalidAmount);
        }
        if !self.params.allows_lock(lock_secs) {
            return Err(VaultError::LockDurationOutOfRange {
                secs: lock_secs,
                min: self.params.min_lock_secs,
                max: self.params.max_lock_secs,
            });
        }
        let balance = self.balance(&account);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            })?;

        let unlock_at = now.saturating_add_secs(lock_secs);
        let queue = self.requests.entry(account.clone()).or_default();
        let request_id = queue.len() as RequestId;
        queue.push(WithdrawalRequest::new(amount, unlock_at));
        self.balances.insert(account.clone(), remaining);

        info!(
            account = %account,
            amount = %amount,
            unlock_at = %unlock_at,
            request_id,
            "withdrawal requested"
        );
        self.events.emit(&VaultEvent::WithdrawalRequested {
            account,
            amount,
            unlock_at,
            request_id,
        });
        Ok(request_id)
    }

    fn execute_inner(
        &mut self,
        account: &AccountId,
        request_id: RequestId,
        now: Timestamp,
        transfer: &mut dyn ValueTransfer,
    ) -> Result<(), VaultError> {
        self.access.ensure_active()?;
        let amount = {
            let req = self.request_mut(account, request_id)?;
            if req.executed {
                return Err(VaultError::AlreadyExecuted(request_id));
            }
            if req.cancelled {
                return Err(VaultError::AlreadyCancelled(request_id));
            }
            if !req.is_unlocked(now) {
                return Err(VaultError::LockNotElapsed {
                    unlock_at: req.unlock_at,
                    now,
                });
            }
            // Committed before the external call: a re-entering callee that
            // somehow bypassed the guard would still see the terminal state.
            req.executed = true;
            req.amount
        };
        let prev_total = self.total_held;
        self.total_held = prev_total.saturating_sub(amount);

        if let Err(err) = transfer.transfer(account, amount, self) {
            self.total_held = prev_total;
            if let Ok(req) = self.request_mut(account, request_id) {
                req.executed = false;
            }
            return Err(VaultError::TransferFailed(err));
        }

        info!(account = %account, amount = %amount, request_id, "withdrawal executed");
        self.events.emit(&VaultEvent::WithdrawalExecuted {
            account: account.clone(),
            amount,
            request_id,
        });
        Ok(())
    }

    fn cancel_inner(
        &mut self,
        account: &AccountId,
        request_id: RequestId,
        now: Timestamp,
    ) -> Result<(), VaultError> {
        self.access.ensure_active()?;
        let amount = {
            let req = self.request(account, request_id)?;
            if req.executed {
                return Err(VaultError::AlreadyExecuted(request_id));
            }
            if req.cancelled {
                return Err(VaultError::AlreadyCancelled(request_id));
            }
            if req.is_unlocked(now) {
                // The cancellation window closes exactly at unlock time.
                return Err(VaultError::LockAlreadyElapsed {
                    unlock_at: req.unlock_at,
                    now,
                });
            }
            req.amount
        };
        let new_balance = self
            .balance(account)
            .checked_add(amount)
            .ok_or(VaultError::InvalidAmount)?;

        self.request_mut(account, request_id)?.cancelled = true;
        self.balances.insert(account.clone(), new_balance);

        info!(account = %account, amount = %amount, request_id, "withdrawal cancelled");
        self.events.emit(&VaultEvent::WithdrawalCancelled {
            account: account.clone(),
            request_id,
        });
        Ok(())
    }

    fn emergency_inner(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        transfer: &mut dyn ValueTransfer,
    ) -> Result<(), VaultError> {
        self.access.ensure_admin(caller)?;
        self.access.ensure_paused()?;
        if amount.is_zero() {
            return Err(VaultError::InvalidAmount);
        }
        if amount > self.total_held {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: self.total_held,
            });
        }
        let prev_total = self.total_held;
        self.total_held = prev_total.saturating_sub(amount);

        if let Err(err) = transfer.transfer(caller, amount, self) {
            self.total_held = prev_total;
            return Err(VaultError::TransferFailed(err));
        }

        info!(admin = %caller, amount = %amount, "emergency withdrawal");
        self.events.emit(&VaultEvent::EmergencyWithdrawal {
            admin: caller.clone(),
            amount,
        });
        Ok(())
    }

    fn pause_inner(&mut self, caller: &AccountId) -> Result<(), VaultError> {
        self.access.pause(caller)?;
        info!(admin = %caller, "vault paused");
        self.events.emit(&VaultEvent::Paused {
            admin: caller.clone(),
        });
        Ok(())
    }

    fn unpause_inner(&mut self, caller: &AccountId) -> Result<(), VaultError> {
        self.access.unpause(caller)?;
        info!(admin = %caller, "vault unpaused");
        self.events.emit(&VaultEvent::Unpaused {
            admin: caller.clone(),
        });
        Ok(())
    }
}
