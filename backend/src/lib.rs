//! Merch store coin ledger.
//!
//! Employees hold coin balances, buy catalog goods and send coins to each
//! other. The crate is split into a transport-free [`domain`], inbound HTTP
//! adapters and outbound Postgres and identity-service adapters.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
