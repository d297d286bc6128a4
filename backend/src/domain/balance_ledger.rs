//! Balance lifecycle and guarded mutation.
//!
//! All balance invariants live here. [`BalanceLedger`] provisions rows and
//! serves unlocked reads; [`LockedLedger`] wraps the unit of work lent by a
//! [`TransactionCoordinator`](crate::domain::ports::TransactionCoordinator)
//! and is the only way the engines touch balance rows.
//!
//! Invariants:
//! - at most one balance row per user, created with the seed amount;
//! - a balance never goes below zero, because every debit is a conditional
//!   decrement even when the caller already holds the row lock.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    BalanceProvisioning, BalanceRepository, BalanceRepositoryError, UnitOfWork, UnitOfWorkError,
};
use crate::domain::{Coins, GoodId, StoreError, UserId};

/// Balance every new account starts with.
pub const START_BALANCE: Coins = Coins::new(1000);

pub(crate) fn map_balance_repository_error(error: BalanceRepositoryError) -> StoreError {
    match error {
        BalanceRepositoryError::Connection { message } => {
            StoreError::internal(format!("balance repository unavailable: {message}"))
        }
        BalanceRepositoryError::Query { message } => {
            StoreError::internal(format!("balance repository error: {message}"))
        }
    }
}

fn map_unit_of_work_error(error: UnitOfWorkError) -> StoreError {
    match error {
        UnitOfWorkError::Connection { message } => {
            StoreError::internal(format!("ledger connection lost: {message}"))
        }
        UnitOfWorkError::Query { message } => {
            StoreError::internal(format!("ledger statement failed: {message}"))
        }
    }
}

fn missing_balance(user_id: UserId) -> StoreError {
    error!(%user_id, "balance row missing; provisioning invariant violated");
    StoreError::balance_not_found(user_id)
}

/// Provisioning and unlocked reads over balance rows.
pub struct BalanceLedger<B> {
    balances: Arc<B>,
    seed: Coins,
}

impl<B> Clone for BalanceLedger<B> {
    fn clone(&self) -> Self {
        Self {
            balances: Arc::clone(&self.balances),
            seed: self.seed,
        }
    }
}

impl<B> BalanceLedger<B> {
    /// Create a ledger seeding new rows with [`START_BALANCE`].
    pub fn new(balances: Arc<B>) -> Self {
        Self::with_seed(balances, START_BALANCE)
    }

    /// Create a ledger seeding new rows with `seed`.
    pub fn with_seed(balances: Arc<B>, seed: Coins) -> Self {
        Self { balances, seed }
    }
}

impl<B> BalanceLedger<B>
where
    B: BalanceRepository,
{
    /// Current balance without a row lock.
    ///
    /// # Errors
    ///
    /// [`StoreError::BalanceNotFound`] when the row is absent.
    pub async fn balance(&self, user_id: UserId) -> Result<Coins, StoreError> {
        self.balances
            .find_balance(user_id)
            .await
            .map_err(map_balance_repository_error)?
            .ok_or_else(|| missing_balance(user_id))
    }
}

#[async_trait]
impl<B> BalanceProvisioning for BalanceLedger<B>
where
    B: BalanceRepository,
{
    /// Insert the user's row with the seed amount unless it already exists.
    ///
    /// Calling this repeatedly is safe; the first successful call wins.
    async fn ensure_created(&self, user_id: UserId) -> Result<(), StoreError> {
        self.balances
            .insert_if_absent(user_id, self.seed)
            .await
            .map_err(map_balance_repository_error)
    }
}

/// Guarded ledger operations bound to one open unit of work.
pub struct LockedLedger<'tx> {
    uow: &'tx mut dyn UnitOfWork,
}

impl<'tx> LockedLedger<'tx> {
    /// Wrap the unit of work lent by the coordinator.
    pub fn new(uow: &'tx mut dyn UnitOfWork) -> Self {
        Self { uow }
    }

    /// Read a balance and hold its row lock until the transaction ends.
    pub async fn lock_and_get_balance(&mut self, user_id: UserId) -> Result<Coins, StoreError> {
        self.uow
            .lock_balance(user_id)
            .await
            .map_err(map_unit_of_work_error)?
            .ok_or_else(|| missing_balance(user_id))
    }

    /// Lock two balance rows in one statement ordered by user id.
    ///
    /// Returns the balances in argument order, not lock order.
    pub async fn lock_pair(
        &mut self,
        first: UserId,
        second: UserId,
    ) -> Result<(Coins, Coins), StoreError> {
        let locked = self
            .uow
            .lock_balances(vec![first, second])
            .await
            .map_err(map_unit_of_work_error)?;
        let find = |user_id: UserId| {
            locked
                .iter()
                .find(|(id, _)| *id == user_id)
                .map(|(_, balance)| *balance)
                .ok_or_else(|| missing_balance(user_id))
        };
        Ok((find(first)?, find(second)?))
    }

    /// Subtract `amount` when the balance covers it.
    ///
    /// # Errors
    ///
    /// [`StoreError::InsufficientBalance`] when the conditional decrement
    /// matched no row.
    pub async fn debit(&mut self, user_id: UserId, amount: Coins) -> Result<(), StoreError> {
        let affected = self
            .uow
            .decrement_balance(user_id, amount)
            .await
            .map_err(map_unit_of_work_error)?;
        if affected == 0 {
            debug!(%user_id, %amount, "guarded debit matched no row");
            return Err(StoreError::insufficient_balance(user_id));
        }
        Ok(())
    }

    /// Add `amount`. Credits cannot make a balance negative, so no guard.
    pub async fn credit(&mut self, user_id: UserId, amount: Coins) -> Result<(), StoreError> {
        let affected = self
            .uow
            .increment_balance(user_id, amount)
            .await
            .map_err(map_unit_of_work_error)?;
        if affected == 0 {
            return Err(missing_balance(user_id));
        }
        Ok(())
    }

    /// Append a purchase receipt in the same unit of work as its debit.
    pub async fn record_purchase(&mut self, user_id: UserId, good_id: GoodId) -> Result<(), StoreError> {
        self.uow
            .record_purchase(user_id, good_id)
            .await
            .map_err(map_unit_of_work_error)
    }

    /// Append a transfer entry in the same unit of work as both mutations.
    pub async fn record_transfer(
        &mut self,
        from: UserId,
        to: UserId,
        amount: Coins,
    ) -> Result<(), StoreError> {
        self.uow
            .record_transfer(from, to, amount)
            .await
            .map_err(map_unit_of_work_error)
    }
}
