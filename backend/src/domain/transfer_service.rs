//! Peer-to-peer transfer use case.
//!
//! The destination username is resolved and its balance provisioned before
//! the transaction opens. Inside the transaction both balance rows are locked
//! in one statement ordered by user id, so two transfers racing in opposite
//! directions always acquire the locks in the same order and cannot deadlock.
//! The guarded debit still applies as a second line of defence.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{Instrument, info, info_span};

use crate::domain::balance_ledger::{BalanceLedger, LockedLedger};
use crate::domain::ports::{
    BalanceProvisioning, BalanceRepository, IdentityResolver, IdentityResolverError,
    SendCoinsRequest, TransactionCoordinator, TransferCommand,
};
use crate::domain::{StoreError, UserId, Username};

pub(crate) fn map_identity_error(error: IdentityResolverError) -> StoreError {
    match error {
        IdentityResolverError::Timeout { message } => {
            StoreError::internal(format!("identity service timed out: {message}"))
        }
        IdentityResolverError::Transport { message } => {
            StoreError::internal(format!("identity service unreachable: {message}"))
        }
        IdentityResolverError::Status { status, message } => {
            StoreError::internal(format!("identity service returned {status}: {message}"))
        }
        IdentityResolverError::Decode { message } => {
            StoreError::internal(format!("identity service response invalid: {message}"))
        }
    }
}

/// Transfer service implementing [`TransferCommand`].
#[derive(Clone)]
pub struct TransferService<C, B, I> {
    coordinator: Arc<C>,
    ledger: BalanceLedger<B>,
    identities: Arc<I>,
}

impl<C, B, I> TransferService<C, B, I> {
    /// Create a new service.
    pub fn new(coordinator: Arc<C>, ledger: BalanceLedger<B>, identities: Arc<I>) -> Self {
        Self {
            coordinator,
            ledger,
            identities,
        }
    }
}

impl<C, B, I> TransferService<C, B, I>
where
    C: TransactionCoordinator,
    B: BalanceRepository,
    I: IdentityResolver,
{
    async fn resolve_recipient(&self, username: &Username) -> Result<UserId, StoreError> {
        self.identities
            .resolve_user_id(username)
            .await
            .map_err(map_identity_error)?
            .ok_or_else(|| StoreError::user_not_found(username.as_str()))
    }
}

#[async_trait]
impl<C, B, I> TransferCommand for TransferService<C, B, I>
where
    C: TransactionCoordinator,
    B: BalanceRepository,
    I: IdentityResolver,
{
    async fn send_coins(&self, request: SendCoinsRequest) -> Result<(), StoreError> {
        let SendCoinsRequest { from, to, amount } = request;
        let span = info_span!("send_coins", from = %from, to = %to, %amount);
        async move {
            if amount.is_zero() {
                return Err(StoreError::invalid_arguments("amount must be positive"));
            }

            let recipient = self.resolve_recipient(&to).await?;
            if recipient == from {
                return Err(StoreError::invalid_arguments(
                    "sender and recipient must differ",
                ));
            }

            // Row existence is independent of money movement; a later failure
            // may leave the recipient provisioned.
            self.ledger.ensure_created(recipient).await?;

            self.coordinator
                .run(move |uow| {
                    async move {
                        let mut ledger = LockedLedger::new(uow);
                        let (source_balance, target_balance) =
                            ledger.lock_pair(from, recipient).await?;
                        if source_balance.checked_sub(amount).is_none() {
                            return Err(StoreError::insufficient_balance(from));
                        }
                        if target_balance.checked_add(amount).is_none() {
                            return Err(StoreError::invalid_arguments(
                                "recipient balance cannot hold the amount",
                            ));
                        }
                        ledger.debit(from, amount).await?;
                        ledger.credit(recipient, amount).await?;
                        ledger.record_transfer(from, recipient, amount).await
                    }
                    .boxed()
                })
                .await?;

            info!(recipient = %recipient, "transfer committed");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "transfer_service_tests.rs"]
mod tests;
