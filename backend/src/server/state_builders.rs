//! Wiring of Diesel and identity adapters into the HTTP state.

use std::sync::Arc;

use merch_store::domain::{
    AccountReadPorts, AccountService, BalanceLedger, PurchaseService, TransferService,
};
use merch_store::inbound::http::state::{HttpState, HttpStatePorts};
use merch_store::outbound::persistence::{
    DieselBalanceRepository, DieselGoodsRepository, DieselHistoryRepository,
    DieselTransactionCoordinator,
};

use super::ServerConfig;

/// Build the handler state backed by Postgres and the identity service.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let pool = &config.db_pool;
    let coordinator = Arc::new(DieselTransactionCoordinator::new(pool.clone()));
    let ledger = BalanceLedger::with_seed(
        Arc::new(DieselBalanceRepository::new(pool.clone())),
        config.start_balance,
    );
    let history = Arc::new(DieselHistoryRepository::new(pool.clone()));
    let identities = Arc::new(config.identity.clone());

    let ports = HttpStatePorts {
        provisioning: Arc::new(ledger.clone()),
        purchases: Arc::new(PurchaseService::new(
            Arc::clone(&coordinator),
            Arc::new(DieselGoodsRepository::new(pool.clone())),
        )),
        transfers: Arc::new(TransferService::new(
            coordinator,
            ledger.clone(),
            Arc::clone(&identities),
        )),
        accounts: Arc::new(AccountService::new(AccountReadPorts {
            ledger,
            purchases: Arc::clone(&history),
            transfers: history,
            identities,
        })),
    };
    HttpState::new(ports, config.request_timeout)
}
