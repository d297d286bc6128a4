//! Outbound adapters implementing the ledger's driven ports.
//!
//! - **persistence**: PostgreSQL via Diesel, covering balances, the catalog,
//!   history and the transaction coordinator.
//! - **identity**: HTTP client for the identity service.
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

pub mod identity;
pub mod persistence;
