//! Identity service client.
//!
//! Thin reqwest implementation of the `IdentityResolver` port.

mod dto;
mod http_client;

pub use http_client::IdentityHttpClient;
