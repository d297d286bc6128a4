//! Port scoping a unit of work.
//!
//! The coordinator begins a transaction, lends the caller a
//! [`UnitOfWork`] for its duration, commits when the caller returns `Ok` and
//! rolls back on `Err`. Dropping the returned future before it completes
//! abandons the transaction, which must also roll back.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use super::{UnitOfWork, define_port_error};

define_port_error! {
    /// Errors raised while opening or finishing a transaction.
    pub enum TransactionError {
        /// No connection could be obtained for the transaction.
        Connection { message: String } => "transaction connection failed: {message}",
        /// Begin, commit or an uncategorised statement failed.
        Query { message: String } => "transaction failed: {message}",
    }
}

/// Future returned by a unit-of-work closure.
pub type UnitOfWorkFuture<'a, T, E> = BoxFuture<'a, Result<T, E>>;

/// Port for running closures atomically against the ledger store.
#[async_trait]
pub trait TransactionCoordinator: Send + Sync {
    /// Run `work` inside one transaction.
    ///
    /// The error type is chosen by the caller; coordinator failures are
    /// folded into it through `From<TransactionError>`.
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<TransactionError> + Send + 'static,
        F: for<'a> FnOnce(&'a mut dyn UnitOfWork) -> UnitOfWorkFuture<'a, T, E> + Send + 'static;
}
