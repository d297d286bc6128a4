//! Driving port for buying catalog items.

use async_trait::async_trait;

use crate::domain::{StoreError, UserId};

/// Domain use-case port for purchases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseCommand: Send + Sync {
    /// Debit the buyer by the good's price and record one receipt, atomically.
    async fn buy_item(&self, user_id: UserId, good_name: &str) -> Result<(), StoreError>;
}

/// Fixture command accepting every purchase.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePurchaseCommand;

#[async_trait]
impl PurchaseCommand for FixturePurchaseCommand {
    async fn buy_item(&self, _user_id: UserId, _good_name: &str) -> Result<(), StoreError> {
        Ok(())
    }
}
