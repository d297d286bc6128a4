//! Domain primitives, ports and use cases of the coin ledger.
//!
//! Purpose: hold the rules for balances, purchases and transfers independent
//! of HTTP and SQL. Adapters in `inbound` and `outbound` depend on this
//! module; it depends on neither.
//!
//! Public surface:
//! - Identifiers and amounts: [`UserId`], [`Username`], [`Coins`].
//! - Catalog entries: [`Good`], [`GoodId`].
//! - Read model: [`AccountInfo`] and its transfer history types.
//! - Use cases: [`PurchaseService`], [`TransferService`], [`AccountService`]
//!   and the provisioning side of [`BalanceLedger`].
//! - Errors: [`StoreError`] with its [`ErrorCode`] category.

mod account;
mod account_info;
pub mod account_service;
pub mod balance_ledger;
pub mod error;
mod goods;
#[cfg(test)]
pub(crate) mod memory_ledger;
pub mod ports;
pub mod purchase_service;
pub mod transfer_service;

pub use self::account::{Coins, UserId, Username, UsernameValidationError};
pub use self::account_info::{
    AccountInfo, NamedTransfer, RawTransfer, RawTransferHistory, TransferHistory,
};
pub use self::account_service::{AccountReadPorts, AccountService};
pub use self::balance_ledger::{BalanceLedger, LockedLedger, START_BALANCE};
pub use self::error::{ErrorCode, StoreError};
pub use self::goods::{Good, GoodId};
pub use self::purchase_service::PurchaseService;
pub use self::transfer_service::TransferService;

/// Result alias used by the ledger use cases.
///
/// # Examples
/// ```
/// use merch_store::domain::{StoreError, StoreResult};
///
/// fn reject() -> StoreResult<()> {
///     Err(StoreError::invalid_arguments("amount must be positive"))
/// }
/// assert!(reject().is_err());
/// ```
pub type StoreResult<T> = Result<T, StoreError>;
