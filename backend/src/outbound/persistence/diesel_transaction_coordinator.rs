//! PostgreSQL `TransactionCoordinator` and its `UnitOfWork`.
//!
//! Each unit of work runs on one pooled connection inside a read-committed
//! transaction. Row locks come from `SELECT .. FOR UPDATE`; multi-row locks
//! are taken by a single statement ordered by `user_id`. Debits are guarded
//! in SQL (`balance >= amount`) so the `CHECK (balance >= 0)` constraint is
//! never the first line of defence.
//!
//! If the caller drops the future mid-transaction the pooled connection is
//! released with the transaction still open; the bb8 manager treats it as
//! broken and closes it, so Postgres rolls the work back.
//!
//! A failed rollback is logged and the caller's own error is returned.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, RunQueryDsl, TransactionManager};
use tracing::error;

use crate::domain::ports::{
    TransactionCoordinator, TransactionError, UnitOfWork, UnitOfWorkError, UnitOfWorkFuture,
};
use crate::domain::{Coins, GoodId, UserId};

use super::diesel_basic_error_mapping::{
    coins_from_db, coins_to_db, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewPurchaseRow, NewTransferRow};
use super::pool::DbPool;
use super::schema::{balances, purchases, transfers};

/// Diesel-backed implementation of the `TransactionCoordinator` port.
#[derive(Clone)]
pub struct DieselTransactionCoordinator {
    pool: DbPool,
}

impl DieselTransactionCoordinator {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_transaction_error(error: diesel::result::Error) -> TransactionError {
    map_basic_diesel_error(error, TransactionError::query, TransactionError::connection)
}

fn map_statement_error(error: diesel::result::Error) -> UnitOfWorkError {
    map_basic_diesel_error(error, UnitOfWorkError::query, UnitOfWorkError::connection)
}

#[async_trait]
impl TransactionCoordinator for DieselTransactionCoordinator {
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<TransactionError> + Send + 'static,
        F: for<'a> FnOnce(&'a mut dyn UnitOfWork) -> UnitOfWorkFuture<'a, T, E> + Send + 'static,
    {
        let mut pooled = self
            .pool
            .get()
            .await
            .map_err(|error| E::from(map_basic_pool_error(error, TransactionError::connection)))?;
        let conn: &mut AsyncPgConnection = &mut pooled;

        AnsiTransactionManager::begin_transaction(conn)
            .await
            .map_err(|error| E::from(map_transaction_error(error)))?;

        let outcome = {
            let mut uow = PgUnitOfWork { conn: &mut *conn };
            work(&mut uow).await
        };

        match outcome {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(conn)
                    .await
                    .map_err(|error| E::from(map_transaction_error(error)))?;
                Ok(value)
            }
            Err(work_error) => {
                match AnsiTransactionManager::rollback_transaction(conn).await {
                    Ok(()) | Err(diesel::result::Error::NotInTransaction) => {}
                    Err(rollback_error) => {
                        error!(error = %rollback_error, "rollback failed");
                    }
                }
                Err(work_error)
            }
        }
    }
}

/// Unit of work bound to one open transaction.
struct PgUnitOfWork<'c> {
    conn: &'c mut AsyncPgConnection,
}

fn amount_to_db(amount: Coins) -> Result<i64, UnitOfWorkError> {
    coins_to_db(amount).map_err(UnitOfWorkError::query)
}

fn amount_from_db(amount: i64) -> Result<Coins, UnitOfWorkError> {
    coins_from_db(amount).map_err(UnitOfWorkError::query)
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork<'_> {
    async fn lock_balance(&mut self, user_id: UserId) -> Result<Option<Coins>, UnitOfWorkError> {
        let stored: Option<i64> = balances::table
            .filter(balances::user_id.eq(user_id.get()))
            .select(balances::balance)
            .for_update()
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(map_statement_error)?;

        stored.map(amount_from_db).transpose()
    }

    async fn lock_balances(
        &mut self,
        user_ids: Vec<UserId>,
    ) -> Result<Vec<(UserId, Coins)>, UnitOfWorkError> {
        let ids: Vec<i64> = user_ids.into_iter().map(UserId::get).collect();

        let rows: Vec<(i64, i64)> = balances::table
            .filter(balances::user_id.eq_any(ids))
            .order(balances::user_id.asc())
            .select((balances::user_id, balances::balance))
            .for_update()
            .load(&mut *self.conn)
            .await
            .map_err(map_statement_error)?;

        rows.into_iter()
            .map(|(id, balance)| Ok((UserId::new(id), amount_from_db(balance)?)))
            .collect()
    }

    async fn decrement_balance(
        &mut self,
        user_id: UserId,
        amount: Coins,
    ) -> Result<usize, UnitOfWorkError> {
        let amount = amount_to_db(amount)?;

        diesel::update(
            balances::table
                .filter(balances::user_id.eq(user_id.get()))
                .filter(balances::balance.ge(amount)),
        )
        .set(balances::balance.eq(balances::balance - amount))
        .execute(&mut *self.conn)
        .await
        .map_err(map_statement_error)
    }

    async fn increment_balance(
        &mut self,
        user_id: UserId,
        amount: Coins,
    ) -> Result<usize, UnitOfWorkError> {
        let amount = amount_to_db(amount)?;

        diesel::update(balances::table.filter(balances::user_id.eq(user_id.get())))
            .set(balances::balance.eq(balances::balance + amount))
            .execute(&mut *self.conn)
            .await
            .map_err(map_statement_error)
    }

    async fn record_purchase(
        &mut self,
        user_id: UserId,
        good_id: GoodId,
    ) -> Result<(), UnitOfWorkError> {
        let row = NewPurchaseRow {
            user_id: user_id.get(),
            good_id: good_id.get(),
        };

        diesel::insert_into(purchases::table)
            .values(&row)
            .execute(&mut *self.conn)
            .await
            .map(|_| ())
            .map_err(map_statement_error)
    }

    async fn record_transfer(
        &mut self,
        from: UserId,
        to: UserId,
        amount: Coins,
    ) -> Result<(), UnitOfWorkError> {
        let row = NewTransferRow {
            from_user_id: from.get(),
            to_user_id: to.get(),
            amount: amount_to_db(amount)?,
        };

        diesel::insert_into(transfers::table)
            .values(&row)
            .execute(&mut *self.conn)
            .await
            .map(|_| ())
            .map_err(map_statement_error)
    }
}
