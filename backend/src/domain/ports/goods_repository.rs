//! Port for catalog lookups.

use async_trait::async_trait;

use crate::domain::{Coins, Good, GoodId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by goods repository adapters.
    pub enum GoodsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "goods repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "goods repository query failed: {message}",
    }
}

/// Read-only access to the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoodsRepository: Send + Sync {
    /// Find a good by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Good>, GoodsRepositoryError>;
}

/// Fixture catalog containing a single `cup` priced at 20.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGoodsRepository;

#[async_trait]
impl GoodsRepository for FixtureGoodsRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Good>, GoodsRepositoryError> {
        Ok((name == "cup").then(|| Good {
            id: GoodId::new(1),
            name: name.to_owned(),
            price: Coins::new(20),
        }))
    }
}
