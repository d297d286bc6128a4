//! PostgreSQL-backed `GoodsRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GoodsRepository, GoodsRepositoryError};
use crate::domain::{Good, GoodId};

use super::diesel_basic_error_mapping::{coins_from_db, map_basic_diesel_error, map_basic_pool_error};
use super::models::GoodRow;
use super::pool::{DbPool, PoolError};
use super::schema::goods;

/// Diesel-backed catalog lookup.
#[derive(Clone)]
pub struct DieselGoodsRepository {
    pool: DbPool,
}

impl DieselGoodsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GoodsRepositoryError {
    map_basic_pool_error(error, GoodsRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GoodsRepositoryError {
    map_basic_diesel_error(
        error,
        GoodsRepositoryError::query,
        GoodsRepositoryError::connection,
    )
}

fn row_to_good(row: GoodRow) -> Result<Good, GoodsRepositoryError> {
    Ok(Good {
        id: GoodId::new(row.id),
        price: coins_from_db(row.price).map_err(GoodsRepositoryError::query)?,
        name: row.name,
    })
}

#[async_trait]
impl GoodsRepository for DieselGoodsRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Good>, GoodsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<GoodRow> = goods::table
            .filter(goods::name.eq(name))
            .select(GoodRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_good).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coins;
    use rstest::rstest;

    #[rstest]
    fn row_converts_to_domain_good() {
        let good = row_to_good(GoodRow {
            id: 7,
            name: "umbrella".to_owned(),
            price: 200,
        })
        .expect("valid row");

        assert_eq!(good.id, GoodId::new(7));
        assert_eq!(good.name, "umbrella");
        assert_eq!(good.price, Coins::new(200));
    }

    #[rstest]
    fn negative_price_is_rejected() {
        let error = row_to_good(GoodRow {
            id: 1,
            name: "cup".to_owned(),
            price: -5,
        })
        .expect_err("negative price");

        assert!(matches!(error, GoodsRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::build("bad url"));

        assert_eq!(error, GoodsRepositoryError::connection("bad url"));
    }
}
