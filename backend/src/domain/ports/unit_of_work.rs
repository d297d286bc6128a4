//! Query capability scoped to one open transaction.
//!
//! A [`UnitOfWork`] is only ever produced by a
//! [`TransactionCoordinator`](super::TransactionCoordinator) and lent to the
//! caller's closure for the lifetime of the transaction. Row locks taken
//! through it are held until the coordinator commits or rolls back.

use async_trait::async_trait;

use crate::domain::{Coins, GoodId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by statements executed inside a unit of work.
    pub enum UnitOfWorkError {
        /// The connection backing the transaction failed.
        Connection { message: String } => "unit of work connection failed: {message}",
        /// A statement failed during execution.
        Query { message: String } => "unit of work query failed: {message}",
    }
}

/// Statements the ledger may run inside an open transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send {
    /// Read one balance and hold an exclusive row lock on it.
    ///
    /// Returns `None` when the row does not exist.
    async fn lock_balance(&mut self, user_id: UserId) -> Result<Option<Coins>, UnitOfWorkError>;

    /// Lock several balance rows in one statement, ordered by ascending user
    /// id so concurrent lockers always acquire them in the same order.
    ///
    /// Missing rows are simply absent from the result.
    async fn lock_balances(
        &mut self,
        user_ids: Vec<UserId>,
    ) -> Result<Vec<(UserId, Coins)>, UnitOfWorkError>;

    /// Subtract `amount` only if the balance covers it. Returns affected rows.
    async fn decrement_balance(
        &mut self,
        user_id: UserId,
        amount: Coins,
    ) -> Result<usize, UnitOfWorkError>;

    /// Add `amount` unconditionally. Returns affected rows.
    async fn increment_balance(
        &mut self,
        user_id: UserId,
        amount: Coins,
    ) -> Result<usize, UnitOfWorkError>;

    /// Append a purchase receipt.
    async fn record_purchase(&mut self, user_id: UserId, good_id: GoodId)
    -> Result<(), UnitOfWorkError>;

    /// Append a transfer ledger entry.
    async fn record_transfer(
        &mut self,
        from: UserId,
        to: UserId,
        amount: Coins,
    ) -> Result<(), UnitOfWorkError>;
}
