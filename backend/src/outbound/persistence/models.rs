//! Internal Diesel row structs for the ledger tables.
//!
//! These never leave the persistence layer; adapters convert them to domain
//! types at the boundary.

use diesel::prelude::*;

use super::schema::{balances, goods, purchases, transfers};

/// Row read from `goods`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = goods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GoodRow {
    pub id: i32,
    pub name: String,
    pub price: i64,
}

/// Insertable balance row used for first-contact provisioning.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = balances)]
pub(crate) struct NewBalanceRow {
    pub user_id: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = purchases)]
pub(crate) struct NewPurchaseRow {
    pub user_id: i64,
    pub good_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transfers)]
pub(crate) struct NewTransferRow {
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub amount: i64,
}

/// Row read from `transfers` when assembling history.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transfers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransferRow {
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub amount: i64,
}
