//! Caller identity extraction.
//!
//! Authentication happens upstream; the gateway forwards the verified caller
//! as `X-User-Id` and `X-Username`. Extracting [`AuthenticatedUser`] also
//! provisions the caller's balance so every handler runs against an existing
//! row.

use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{StoreError, UserId, Username};

use super::deadline::with_deadline;
use super::error::ApiError;
use super::state::HttpState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USERNAME_HEADER: &str = "x-username";

/// Verified caller of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: Option<Username>,
}

fn parse_identity(headers: &HeaderMap) -> Result<AuthenticatedUser, ApiError> {
    let raw_id = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| ApiError::unauthenticated("missing caller identity"))?;
    let id = raw_id
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|raw| *raw > 0)
        .map(UserId::new)
        .ok_or_else(|| ApiError::unauthenticated("malformed caller identity"))?;
    let username = headers
        .get(USERNAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Username::new(value).ok());
    Ok(AuthenticatedUser { id, username })
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = parse_identity(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let user = identity?;
            let state = state
                .ok_or_else(|| ApiError::from(StoreError::internal("http state not configured")))?;
            with_deadline(
                state.request_timeout,
                state.provisioning.ensure_created(user.id),
            )
            .await?;
            debug!(user_id = %user.id, "caller provisioned");
            Ok(user)
        })
    }
}
