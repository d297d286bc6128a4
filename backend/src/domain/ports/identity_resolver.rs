//! Port for the external identity service.
//!
//! The identity service owns usernames; the ledger only stores numeric ids and
//! resolves names when it needs to talk to people.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use crate::domain::{UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity resolver adapters.
    pub enum IdentityResolverError {
        /// The identity service did not answer in time.
        Timeout { message: String } => "identity service timed out: {message}",
        /// The request could not be delivered.
        Transport { message: String } => "identity service unreachable: {message}",
        /// The identity service answered with an unexpected status.
        Status { status: u16, message: String } =>
            "identity service returned {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "identity service response invalid: {message}",
    }
}

/// Username and id resolution against the identity service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a username to its id. `None` when the username is unknown.
    async fn resolve_user_id(
        &self,
        username: &Username,
    ) -> Result<Option<UserId>, IdentityResolverError>;

    /// Resolve many ids in one call. Unknown ids are omitted from the result.
    async fn resolve_usernames(
        &self,
        user_ids: &BTreeSet<UserId>,
    ) -> Result<HashMap<UserId, Username>, IdentityResolverError>;
}

/// Fixture directory that knows no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityResolver;

#[async_trait]
impl IdentityResolver for FixtureIdentityResolver {
    async fn resolve_user_id(
        &self,
        _username: &Username,
    ) -> Result<Option<UserId>, IdentityResolverError> {
        Ok(None)
    }

    async fn resolve_usernames(
        &self,
        _user_ids: &BTreeSet<UserId>,
    ) -> Result<HashMap<UserId, Username>, IdentityResolverError> {
        Ok(HashMap::new())
    }
}
