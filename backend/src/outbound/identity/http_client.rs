//! Reqwest-backed identity resolver.
//!
//! Owns transport details only: URL building, the per-call timeout, status
//! mapping and JSON decoding.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::dto::{UserIdDto, UsernamesRequestDto, UsernamesResponseDto};
use crate::domain::ports::{IdentityResolver, IdentityResolverError};
use crate::domain::{UserId, Username};

/// Identity service client rooted at one base URL.
#[derive(Clone)]
pub struct IdentityHttpClient {
    client: Client,
    base: Url,
}

impl IdentityHttpClient {
    /// Build a client whose every call is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, IdentityResolverError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                IdentityResolverError::transport(format!(
                    "identity base url `{}` cannot carry a path",
                    self.base
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl IdentityResolver for IdentityHttpClient {
    async fn resolve_user_id(
        &self,
        username: &Username,
    ) -> Result<Option<UserId>, IdentityResolverError> {
        let url = self.endpoint(&["users", "by-name", username.as_str()])?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            debug!(%username, "identity service does not know username");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: UserIdDto = serde_json::from_slice(&body).map_err(|error| {
            IdentityResolverError::decode(format!("invalid user id payload: {error}"))
        })?;
        Ok(Some(UserId::new(decoded.id)))
    }

    async fn resolve_usernames(
        &self,
        user_ids: &BTreeSet<UserId>,
    ) -> Result<HashMap<UserId, Username>, IdentityResolverError> {
        let url = self.endpoint(&["users", "names"])?;
        let response = self
            .client
            .post(url)
            .json(&UsernamesRequestDto::from_ids(user_ids))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_usernames(body.as_ref())
    }
}

fn parse_usernames(body: &[u8]) -> Result<HashMap<UserId, Username>, IdentityResolverError> {
    let decoded: UsernamesResponseDto = serde_json::from_slice(body).map_err(|error| {
        IdentityResolverError::decode(format!("invalid usernames payload: {error}"))
    })?;
    decoded.into_domain().map_err(IdentityResolverError::decode)
}

fn map_transport_error(error: reqwest::Error) -> IdentityResolverError {
    if error.is_timeout() {
        IdentityResolverError::timeout(error.to_string())
    } else {
        IdentityResolverError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityResolverError {
    IdentityResolverError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
