//! Driving port for the aggregated account view.

use async_trait::async_trait;

use crate::domain::{AccountInfo, Coins, StoreError, UserId};

/// Domain use-case port for reading an account summary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Balance, inventory and named transfer history for one account.
    async fn account_info(&self, user_id: UserId) -> Result<AccountInfo, StoreError>;
}

/// Fixture query returning a fresh account holding the start balance.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountQuery;

#[async_trait]
impl AccountQuery for FixtureAccountQuery {
    async fn account_info(&self, _user_id: UserId) -> Result<AccountInfo, StoreError> {
        Ok(AccountInfo {
            balance: Coins::new(1000),
            ..AccountInfo::default()
        })
    }
}
