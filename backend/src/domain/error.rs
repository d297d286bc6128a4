//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses through [`StoreError::code`].

use super::UserId;
use super::ports::{TransactionError, define_port_error};

/// Stable machine-readable category describing a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request is malformed or names something that does not exist in
    /// the catalog.
    InvalidRequest,
    /// A referenced user does not exist.
    NotFound,
    /// The request is well formed but the account state forbids it.
    FailedPrecondition,
    /// The caller's deadline elapsed before the operation finished.
    DeadlineExceeded,
    /// An unexpected error occurred inside the service.
    InternalError,
}

define_port_error! {
    /// Closed set of failures produced by the ledger use cases.
    pub enum StoreError {
        /// No identity exists for the given username.
        UserNotFound { username: String } => "user `{username}` not found",
        /// No catalog item has the given name.
        GoodNotFound { name: String } => "item `{name}` not found",
        /// A balance row is missing. Provisioning should make this impossible.
        BalanceNotFound { user_id: UserId } => "balance for user {user_id} not found",
        /// The account cannot cover the requested debit.
        InsufficientBalance { user_id: UserId } => "user {user_id} has insufficient funds",
        /// Self-transfer, zero amount or similar caller mistakes.
        InvalidArguments { message: String } => "{message}",
        /// The request deadline elapsed; any open unit of work was abandoned.
        DeadlineExceeded => "deadline exceeded",
        /// Storage or transport failure.
        Internal { message: String } => "internal error: {message}",
    }
}

impl StoreError {
    /// Category used by inbound adapters to pick a status code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::GoodNotFound { .. } | Self::InvalidArguments { .. } => ErrorCode::InvalidRequest,
            Self::UserNotFound { .. } => ErrorCode::NotFound,
            Self::InsufficientBalance { .. } => ErrorCode::FailedPrecondition,
            Self::DeadlineExceeded => ErrorCode::DeadlineExceeded,
            Self::BalanceNotFound { .. } | Self::Internal { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<TransactionError> for StoreError {
    fn from(error: TransactionError) -> Self {
        match error {
            TransactionError::Connection { message } => {
                Self::internal(format!("transaction unavailable: {message}"))
            }
            TransactionError::Query { message } => {
                Self::internal(format!("transaction failed: {message}"))
            }
        }
    }
}
