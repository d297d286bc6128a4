//! Purchase use case.
//!
//! The good is looked up before any transaction opens. The debit and the
//! receipt are then written in one unit of work, so a purchase is either
//! fully visible or not at all.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{Instrument, info, info_span};

use crate::domain::balance_ledger::LockedLedger;
use crate::domain::ports::{
    GoodsRepository, GoodsRepositoryError, PurchaseCommand, TransactionCoordinator,
};
use crate::domain::{StoreError, UserId};

/// Purchase service implementing [`PurchaseCommand`].
#[derive(Clone)]
pub struct PurchaseService<C, G> {
    coordinator: Arc<C>,
    goods: Arc<G>,
}

impl<C, G> PurchaseService<C, G> {
    /// Create a new service.
    pub fn new(coordinator: Arc<C>, goods: Arc<G>) -> Self {
        Self { coordinator, goods }
    }
}

impl<C, G> PurchaseService<C, G>
where
    C: TransactionCoordinator,
    G: GoodsRepository,
{
    fn map_goods_error(error: GoodsRepositoryError) -> StoreError {
        match error {
            GoodsRepositoryError::Connection { message } => {
                StoreError::internal(format!("goods repository unavailable: {message}"))
            }
            GoodsRepositoryError::Query { message } => {
                StoreError::internal(format!("goods repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<C, G> PurchaseCommand for PurchaseService<C, G>
where
    C: TransactionCoordinator,
    G: GoodsRepository,
{
    async fn buy_item(&self, user_id: UserId, good_name: &str) -> Result<(), StoreError> {
        let span = info_span!("buy_item", %user_id, good = good_name);
        async move {
            let good = self
                .goods
                .find_by_name(good_name)
                .await
                .map_err(Self::map_goods_error)?
                .ok_or_else(|| StoreError::good_not_found(good_name))?;

            let price = good.price;
            let good_id = good.id;
            self.coordinator
                .run(move |uow| {
                    async move {
                        let mut ledger = LockedLedger::new(uow);
                        let balance = ledger.lock_and_get_balance(user_id).await?;
                        if balance.checked_sub(price).is_none() {
                            return Err(StoreError::insufficient_balance(user_id));
                        }
                        ledger.debit(user_id, price).await?;
                        ledger.record_purchase(user_id, good_id).await
                    }
                    .boxed()
                })
                .await?;

            info!(%price, "purchase committed");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "purchase_service_tests.rs"]
mod tests;
