//! Shared helpers for the Postgres-backed integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module is pulled in with `mod support;` so the cluster policy and schema
//! setup stay identical across suites.

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;

pub use cluster_skip::{handle_cluster_setup_failure, pg_tests_enabled};
pub use embedded_postgres::provision_template_database;
pub use pg_embed::shared_cluster;
