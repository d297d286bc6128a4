//! Read ports over the append-only purchase and transfer ledgers.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{RawTransferHistory, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ledger history adapters.
    pub enum HistoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "history repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "history repository query failed: {message}",
    }
}

/// Purchase receipts grouped by good.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseHistoryRepository: Send + Sync {
    /// Map each purchased good's name to the number of receipts.
    async fn inventory(&self, user_id: UserId)
    -> Result<BTreeMap<String, u64>, HistoryRepositoryError>;
}

/// Transfer entries touching one account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferHistoryRepository: Send + Sync {
    /// Incoming and outgoing transfers keyed by counterpart id.
    async fn transfers(&self, user_id: UserId) -> Result<RawTransferHistory, HistoryRepositoryError>;
}

/// Fixture history with no purchases and no transfers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHistoryRepository;

#[async_trait]
impl PurchaseHistoryRepository for FixtureHistoryRepository {
    async fn inventory(
        &self,
        _user_id: UserId,
    ) -> Result<BTreeMap<String, u64>, HistoryRepositoryError> {
        Ok(BTreeMap::new())
    }
}

#[async_trait]
impl TransferHistoryRepository for FixtureHistoryRepository {
    async fn transfers(&self, _user_id: UserId) -> Result<RawTransferHistory, HistoryRepositoryError> {
        Ok(RawTransferHistory::default())
    }
}
