//! Driving port for peer-to-peer transfers.

use async_trait::async_trait;

use crate::domain::{Coins, StoreError, UserId, Username};

/// Input for [`TransferCommand::send_coins`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCoinsRequest {
    pub from: UserId,
    pub to: Username,
    pub amount: Coins,
}

/// Domain use-case port for transfers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferCommand: Send + Sync {
    /// Move `amount` from the caller to the named user, atomically.
    async fn send_coins(&self, request: SendCoinsRequest) -> Result<(), StoreError>;
}

/// Fixture command accepting every transfer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTransferCommand;

#[async_trait]
impl TransferCommand for FixtureTransferCommand {
    async fn send_coins(&self, _request: SendCoinsRequest) -> Result<(), StoreError> {
        Ok(())
    }
}
