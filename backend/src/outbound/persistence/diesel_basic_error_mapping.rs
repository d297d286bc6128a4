//! Shared Diesel error mapping for the ledger adapters.
//!
//! Every ledger port error has the same `Connection`/`Query` shape, so the
//! adapters pass their constructors in and share one classification.

use tracing::debug;

use crate::domain::Coins;

use super::pool::PoolError;

/// Map pool errors through a port's connection constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors through a port's query and connection constructors.
///
/// Database messages are logged at `debug` and replaced by fixed strings so
/// SQL details never reach callers.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("ledger constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            query("transaction serialization failure")
        }
        _ => query("database error"),
    }
}

/// Amount as stored in a `BIGINT` column.
pub(crate) fn coins_to_db(amount: Coins) -> Result<i64, &'static str> {
    i64::try_from(amount.get()).map_err(|_| "amount exceeds storable range")
}

/// Amount read back from a `BIGINT` column.
pub(crate) fn coins_from_db(amount: i64) -> Result<Coins, &'static str> {
    u64::try_from(amount)
        .map(Coins::new)
        .map_err(|_| "negative amount stored")
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Probe {
        Query(&'static str),
        Connection(String),
    }

    struct Info;

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "new row violates check constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("balances")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some("balances_balance_check")
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn classify(error: DieselError) -> Probe {
        map_basic_diesel_error(error, Probe::Query, |message: &'static str| {
            Probe::Connection(message.to_owned())
        })
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(classify(DieselError::NotFound), Probe::Query("record not found"));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, Box::new(Info));
        assert_eq!(
            classify(error),
            Probe::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    fn check_violation_hides_the_sql_message() {
        let error = DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, Box::new(Info));
        assert_eq!(classify(error), Probe::Query("ledger constraint violated"));
    }

    #[rstest]
    fn pool_errors_use_the_connection_constructor() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Probe::Connection);
        assert_eq!(mapped, Probe::Connection("timed out".to_owned()));
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(1_000, Some(1_000))]
    #[case(-1, None)]
    fn stored_amounts_must_be_non_negative(#[case] stored: i64, #[case] expected: Option<u64>) {
        assert_eq!(coins_from_db(stored).ok().map(Coins::get), expected);
    }

    #[rstest]
    fn oversized_amounts_are_rejected_before_sql() {
        assert!(coins_to_db(Coins::new(u64::MAX)).is_err());
        assert_eq!(coins_to_db(Coins::new(42)), Ok(42));
    }
}
