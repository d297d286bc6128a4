//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the ledger's storage ports, backed by
//! `diesel-async` connections pooled with `bb8`.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Adapters only translate between rows and domain types; balance rules
//!   live in the domain.
//! - Database errors are mapped to the owning port's error type and never
//!   carry SQL text.
//!
//! # Example
//!
//! ```ignore
//! use merch_store::outbound::persistence::{DbPool, DieselBalanceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/store")).await?;
//! let balances = DieselBalanceRepository::new(pool);
//! ```

mod diesel_balance_repository;
mod diesel_basic_error_mapping;
mod diesel_goods_repository;
mod diesel_history_repository;
mod diesel_transaction_coordinator;
mod models;
mod pool;
mod schema;

pub use diesel_balance_repository::DieselBalanceRepository;
pub use diesel_goods_repository::DieselGoodsRepository;
pub use diesel_history_repository::DieselHistoryRepository;
pub use diesel_transaction_coordinator::DieselTransactionCoordinator;
pub use pool::{DbPool, PoolConfig, PoolError};
