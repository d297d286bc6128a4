//! HTTP inbound adapter exposing the store endpoints.

pub mod auth;
pub mod deadline;
pub mod error;
pub mod health;
pub mod state;
pub mod store;

pub use error::{ApiError, ApiResult};
