//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised without a database.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    AccountQuery, BalanceProvisioning, FixtureAccountQuery, FixtureBalanceProvisioning,
    FixturePurchaseCommand, FixtureTransferCommand, PurchaseCommand, TransferCommand,
};

/// Default per-request deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Driving ports used by the store handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub provisioning: Arc<dyn BalanceProvisioning>,
    pub purchases: Arc<dyn PurchaseCommand>,
    pub transfers: Arc<dyn TransferCommand>,
    pub accounts: Arc<dyn AccountQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            provisioning: Arc::new(FixtureBalanceProvisioning),
            purchases: Arc::new(FixturePurchaseCommand),
            transfers: Arc::new(FixtureTransferCommand),
            accounts: Arc::new(FixtureAccountQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub provisioning: Arc<dyn BalanceProvisioning>,
    pub purchases: Arc<dyn PurchaseCommand>,
    pub transfers: Arc<dyn TransferCommand>,
    pub accounts: Arc<dyn AccountQuery>,
    /// Deadline applied to each use-case call, provisioning included.
    pub request_timeout: Duration,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts, request_timeout: Duration) -> Self {
        let HttpStatePorts {
            provisioning,
            purchases,
            transfers,
            accounts,
        } = ports;
        Self {
            provisioning,
            purchases,
            transfers,
            accounts,
            request_timeout,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, DEFAULT_REQUEST_TIMEOUT)
    }
}
