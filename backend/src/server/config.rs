//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use merch_store::domain::{Coins, START_BALANCE};
use merch_store::inbound::http::state::DEFAULT_REQUEST_TIMEOUT;
use merch_store::outbound::identity::IdentityHttpClient;
use merch_store::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) identity: IdentityHttpClient,
    pub(crate) request_timeout: Duration,
    pub(crate) start_balance: Coins,
}

impl ServerConfig {
    /// Construct a configuration with the default deadline and seed balance.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, identity: IdentityHttpClient) -> Self {
        Self {
            bind_addr,
            db_pool,
            identity,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            start_balance: START_BALANCE,
        }
    }

    /// Override the per-request deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Override the balance given to new users.
    #[must_use]
    pub fn with_start_balance(mut self, start_balance: Coins) -> Self {
        self.start_balance = start_balance;
        self
    }
}
