//! PostgreSQL-backed `BalanceRepository`.
//!
//! Provisioning is a single `INSERT .. ON CONFLICT (user_id) DO NOTHING`, so
//! racing first requests for the same user both succeed and the first seed
//! wins.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{BalanceRepository, BalanceRepositoryError};
use crate::domain::{Coins, UserId};

use super::diesel_basic_error_mapping::{
    coins_from_db, coins_to_db, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::NewBalanceRow;
use super::pool::{DbPool, PoolError};
use super::schema::balances;

/// Diesel-backed implementation of the `BalanceRepository` port.
#[derive(Clone)]
pub struct DieselBalanceRepository {
    pool: DbPool,
}

impl DieselBalanceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BalanceRepositoryError {
    map_basic_pool_error(error, BalanceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BalanceRepositoryError {
    map_basic_diesel_error(
        error,
        BalanceRepositoryError::query,
        BalanceRepositoryError::connection,
    )
}

#[async_trait]
impl BalanceRepository for DieselBalanceRepository {
    async fn insert_if_absent(
        &self,
        user_id: UserId,
        seed: Coins,
    ) -> Result<(), BalanceRepositoryError> {
        let row = NewBalanceRow {
            user_id: user_id.get(),
            balance: coins_to_db(seed).map_err(BalanceRepositoryError::query)?,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(balances::table)
            .values(&row)
            .on_conflict(balances::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if inserted > 0 {
            debug!(%user_id, %seed, "balance provisioned");
        }
        Ok(())
    }

    async fn find_balance(&self, user_id: UserId) -> Result<Option<Coins>, BalanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored: Option<i64> = balances::table
            .filter(balances::user_id.eq(user_id.get()))
            .select(balances::balance)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        stored
            .map(coins_from_db)
            .transpose()
            .map_err(BalanceRepositoryError::query)
    }
}
