//! Port for balance provisioning and unlocked reads.
//!
//! Locked reads and mutations go through [`UnitOfWork`](super::UnitOfWork);
//! this port covers what may run outside a transaction.

use async_trait::async_trait;

use crate::domain::{Coins, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by balance repository adapters.
    pub enum BalanceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "balance repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "balance repository query failed: {message}",
    }
}

/// Port for balance rows outside a unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceRepository: Send + Sync {
    /// Insert a balance row seeded with `seed` unless one already exists.
    ///
    /// Existing rows are left untouched and no error is reported for them.
    async fn insert_if_absent(&self, user_id: UserId, seed: Coins)
    -> Result<(), BalanceRepositoryError>;

    /// Read the current balance without locking.
    async fn find_balance(&self, user_id: UserId) -> Result<Option<Coins>, BalanceRepositoryError>;
}

/// Fixture repository where every account holds the same balance.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBalanceRepository;

#[async_trait]
impl BalanceRepository for FixtureBalanceRepository {
    async fn insert_if_absent(
        &self,
        _user_id: UserId,
        _seed: Coins,
    ) -> Result<(), BalanceRepositoryError> {
        Ok(())
    }

    async fn find_balance(&self, _user_id: UserId) -> Result<Option<Coins>, BalanceRepositoryError> {
        Ok(Some(Coins::new(1000)))
    }
}
