//! Driving port for lazy balance provisioning.
//!
//! Inbound adapters call this once per authenticated request so every caller
//! has a balance row before any money-moving use case runs.

use async_trait::async_trait;

use crate::domain::{StoreError, UserId};

/// Domain use-case port for idempotent balance creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceProvisioning: Send + Sync {
    /// Create the caller's balance row with the start balance if absent.
    async fn ensure_created(&self, user_id: UserId) -> Result<(), StoreError>;
}

/// Fixture provisioning that accepts every user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBalanceProvisioning;

#[async_trait]
impl BalanceProvisioning for FixtureBalanceProvisioning {
    async fn ensure_created(&self, _user_id: UserId) -> Result<(), StoreError> {
        Ok(())
    }
}
