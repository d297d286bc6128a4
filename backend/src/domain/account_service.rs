//! Account aggregation use case.
//!
//! Balance, inventory and raw transfer history are fetched concurrently with
//! `try_join!`: the first failure drops the other in-flight reads and is
//! returned on its own, so callers never see a partially filled view.
//! Counterpart ids are then resolved in a single batch call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, info_span, warn};

use crate::domain::balance_ledger::BalanceLedger;
use crate::domain::ports::{
    AccountQuery, BalanceRepository, HistoryRepositoryError, IdentityResolver,
    PurchaseHistoryRepository, TransferHistoryRepository,
};
use crate::domain::transfer_service::map_identity_error;
use crate::domain::{
    AccountInfo, NamedTransfer, RawTransfer, StoreError, TransferHistory, UserId, Username,
};

/// Read ports consumed by [`AccountService`].
pub struct AccountReadPorts<B, P, T, I> {
    pub ledger: BalanceLedger<B>,
    pub purchases: Arc<P>,
    pub transfers: Arc<T>,
    pub identities: Arc<I>,
}

/// Account service implementing [`AccountQuery`].
#[derive(Clone)]
pub struct AccountService<B, P, T, I> {
    ledger: BalanceLedger<B>,
    purchases: Arc<P>,
    transfers: Arc<T>,
    identities: Arc<I>,
}

impl<B, P, T, I> AccountService<B, P, T, I> {
    /// Create a new service from its read ports.
    pub fn new(ports: AccountReadPorts<B, P, T, I>) -> Self {
        let AccountReadPorts {
            ledger,
            purchases,
            transfers,
            identities,
        } = ports;
        Self {
            ledger,
            purchases,
            transfers,
            identities,
        }
    }
}

fn map_history_error(error: HistoryRepositoryError) -> StoreError {
    match error {
        HistoryRepositoryError::Connection { message } => {
            StoreError::internal(format!("history repository unavailable: {message}"))
        }
        HistoryRepositoryError::Query { message } => {
            StoreError::internal(format!("history repository error: {message}"))
        }
    }
}

fn name_transfers(
    transfers: Vec<RawTransfer>,
    names: &HashMap<UserId, Username>,
) -> Vec<NamedTransfer> {
    transfers
        .into_iter()
        .map(|transfer| NamedTransfer {
            counterpart: names
                .get(&transfer.counterpart)
                .map(|name| name.as_str().to_owned())
                .unwrap_or_default(),
            amount: transfer.amount,
        })
        .collect()
}

#[async_trait]
impl<B, P, T, I> AccountQuery for AccountService<B, P, T, I>
where
    B: BalanceRepository,
    P: PurchaseHistoryRepository,
    T: TransferHistoryRepository,
    I: IdentityResolver,
{
    async fn account_info(&self, user_id: UserId) -> Result<AccountInfo, StoreError> {
        let span = info_span!("account_info", %user_id);
        async move {
            let (balance, inventory, raw) = tokio::try_join!(
                self.ledger.balance(user_id),
                async {
                    self.purchases
                        .inventory(user_id)
                        .await
                        .map_err(map_history_error)
                },
                async {
                    self.transfers
                        .transfers(user_id)
                        .await
                        .map_err(map_history_error)
                },
            )?;

            let counterparts = raw.counterparts();
            let names = if counterparts.is_empty() {
                HashMap::new()
            } else {
                self.identities
                    .resolve_usernames(&counterparts)
                    .await
                    .map_err(map_identity_error)?
            };

            let unresolved: Vec<_> = counterparts
                .iter()
                .filter(|id| !names.contains_key(id))
                .map(|id| id.get())
                .collect();
            if !unresolved.is_empty() {
                warn!(?unresolved, "counterparts without usernames rendered as empty");
            }

            Ok(AccountInfo {
                balance,
                inventory,
                transfers: TransferHistory {
                    incoming: name_transfers(raw.incoming, &names),
                    outgoing: name_transfers(raw.outgoing, &names),
                },
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
