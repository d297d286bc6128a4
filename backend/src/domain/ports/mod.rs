//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_query;
mod balance_provisioning;
mod balance_repository;
mod goods_repository;
mod history_repository;
mod identity_resolver;
mod purchase_command;
mod transaction_coordinator;
mod transfer_command;
mod unit_of_work;

#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::{AccountQuery, FixtureAccountQuery};
#[cfg(test)]
pub use balance_provisioning::MockBalanceProvisioning;
pub use balance_provisioning::{BalanceProvisioning, FixtureBalanceProvisioning};
#[cfg(test)]
pub use balance_repository::MockBalanceRepository;
pub use balance_repository::{
    BalanceRepository, BalanceRepositoryError, FixtureBalanceRepository,
};
#[cfg(test)]
pub use goods_repository::MockGoodsRepository;
pub use goods_repository::{FixtureGoodsRepository, GoodsRepository, GoodsRepositoryError};
#[cfg(test)]
pub use history_repository::{MockPurchaseHistoryRepository, MockTransferHistoryRepository};
pub use history_repository::{
    FixtureHistoryRepository, HistoryRepositoryError, PurchaseHistoryRepository,
    TransferHistoryRepository,
};
#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::{FixtureIdentityResolver, IdentityResolver, IdentityResolverError};
#[cfg(test)]
pub use purchase_command::MockPurchaseCommand;
pub use purchase_command::{FixturePurchaseCommand, PurchaseCommand};
pub use transaction_coordinator::{TransactionCoordinator, TransactionError, UnitOfWorkFuture};
#[cfg(test)]
pub use transfer_command::MockTransferCommand;
pub use transfer_command::{FixtureTransferCommand, SendCoinsRequest, TransferCommand};
#[cfg(test)]
pub use unit_of_work::MockUnitOfWork;
pub use unit_of_work::{UnitOfWork, UnitOfWorkError};
