//! PostgreSQL-backed purchase and transfer history.
//!
//! Both ports read append-only tables, so each query runs on its own pooled
//! connection without a transaction.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::dsl::count;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    HistoryRepositoryError, PurchaseHistoryRepository, TransferHistoryRepository,
};
use crate::domain::{RawTransfer, RawTransferHistory, UserId};

use super::diesel_basic_error_mapping::{coins_from_db, map_basic_diesel_error, map_basic_pool_error};
use super::models::TransferRow;
use super::pool::{DbPool, PoolError};
use super::schema::{goods, purchases, transfers};

/// Diesel-backed implementation of both history ports.
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: DbPool,
}

impl DieselHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HistoryRepositoryError {
    map_basic_pool_error(error, HistoryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HistoryRepositoryError {
    map_basic_diesel_error(
        error,
        HistoryRepositoryError::query,
        HistoryRepositoryError::connection,
    )
}

fn counts_to_inventory(
    rows: Vec<(String, i64)>,
) -> Result<BTreeMap<String, u64>, HistoryRepositoryError> {
    rows.into_iter()
        .map(|(name, quantity)| {
            u64::try_from(quantity)
                .map(|quantity| (name, quantity))
                .map_err(|_| HistoryRepositoryError::query("negative purchase count"))
        })
        .collect()
}

/// Split rows touching `user_id` into incoming and outgoing entries,
/// preserving insertion order.
fn split_transfers(
    user_id: UserId,
    rows: Vec<TransferRow>,
) -> Result<RawTransferHistory, HistoryRepositoryError> {
    let owner = user_id.get();
    let mut history = RawTransferHistory::default();
    for row in rows {
        let amount = coins_from_db(row.amount).map_err(HistoryRepositoryError::query)?;
        if row.from_user_id == owner {
            history.outgoing.push(RawTransfer {
                counterpart: UserId::new(row.to_user_id),
                amount,
            });
        } else if row.to_user_id == owner {
            history.incoming.push(RawTransfer {
                counterpart: UserId::new(row.from_user_id),
                amount,
            });
        }
    }
    Ok(history)
}

#[async_trait]
impl PurchaseHistoryRepository for DieselHistoryRepository {
    async fn inventory(
        &self,
        user_id: UserId,
    ) -> Result<BTreeMap<String, u64>, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, i64)> = purchases::table
            .inner_join(goods::table)
            .filter(purchases::user_id.eq(user_id.get()))
            .group_by(goods::name)
            .select((goods::name, count(purchases::id)))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        counts_to_inventory(rows)
    }
}

#[async_trait]
impl TransferHistoryRepository for DieselHistoryRepository {
    async fn transfers(&self, user_id: UserId) -> Result<RawTransferHistory, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TransferRow> = transfers::table
            .filter(
                transfers::from_user_id
                    .eq(user_id.get())
                    .or(transfers::to_user_id.eq(user_id.get())),
            )
            .order(transfers::id.asc())
            .select(TransferRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        split_transfers(user_id, rows)
    }
}
