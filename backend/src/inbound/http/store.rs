//! Store HTTP handlers.
//!
//! ```text
//! GET  /api/info
//! POST /api/sendCoin
//! GET  /api/buy/{item}
//! ```

use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::SendCoinsRequest;
use crate::domain::{AccountInfo, Coins, NamedTransfer, StoreError, Username};

use super::auth::AuthenticatedUser;
use super::deadline::with_deadline;
use super::error::{ApiError, ApiResult, ErrorBody};
use super::state::HttpState;

/// One inventory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemDto {
    #[serde(rename = "type")]
    #[schema(example = "cup")]
    pub item_type: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedCoinsDto {
    pub from_user: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentCoinsDto {
    pub to_user: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct CoinHistoryDto {
    pub received: Vec<ReceivedCoinsDto>,
    pub sent: Vec<SentCoinsDto>,
}

/// Account view returned by `GET /api/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub balance: u64,
    pub inventory: Vec<InventoryItemDto>,
    pub coin_history: CoinHistoryDto,
}

impl From<AccountInfo> for InfoResponse {
    fn from(info: AccountInfo) -> Self {
        let AccountInfo {
            balance,
            inventory,
            transfers,
        } = info;
        Self {
            balance: balance.get(),
            inventory: inventory
                .into_iter()
                .map(|(item_type, quantity)| InventoryItemDto {
                    item_type,
                    quantity,
                })
                .collect(),
            coin_history: CoinHistoryDto {
                received: transfers
                    .incoming
                    .into_iter()
                    .map(|NamedTransfer { counterpart, amount }| ReceivedCoinsDto {
                        from_user: counterpart,
                        amount: amount.get(),
                    })
                    .collect(),
                sent: transfers
                    .outgoing
                    .into_iter()
                    .map(|NamedTransfer { counterpart, amount }| SentCoinsDto {
                        to_user: counterpart,
                        amount: amount.get(),
                    })
                    .collect(),
            },
        }
    }
}

/// Request payload for `POST /api/sendCoin`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    #[schema(example = "bob")]
    pub to_user: String,
    #[schema(example = 150)]
    pub amount: u64,
}

fn parse_send_coin(
    user: &AuthenticatedUser,
    payload: SendCoinRequest,
) -> Result<SendCoinsRequest, StoreError> {
    let to = Username::new(payload.to_user)
        .map_err(|error| StoreError::invalid_arguments(format!("toUser: {error}")))?;
    Ok(SendCoinsRequest {
        from: user.id,
        to,
        amount: Coins::new(payload.amount),
    })
}

fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(%error, "rejected request body");
    ApiError::bad_request("invalid request body").into()
}

/// Register the store routes under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(get_info)
            .service(send_coin)
            .service(buy_item),
    );
}

/// Balance, inventory and coin history of the caller.
#[utoipa::path(
    get,
    path = "/api/info",
    params(
        ("X-User-Id" = i64, Header, description = "Caller id forwarded by the gateway")
    ),
    responses(
        (status = 200, description = "Account view", body = InfoResponse),
        (status = 401, description = "Missing caller identity", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 504, description = "Deadline exceeded", body = ErrorBody)
    ),
    tags = ["store"],
    operation_id = "getInfo"
)]
#[get("/info")]
pub async fn get_info(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let account =
        with_deadline(state.request_timeout, state.accounts.account_info(user.id)).await?;
    Ok(HttpResponse::Ok().json(InfoResponse::from(account)))
}

/// Transfer coins to another user.
#[utoipa::path(
    post,
    path = "/api/sendCoin",
    request_body = SendCoinRequest,
    params(
        ("X-User-Id" = i64, Header, description = "Caller id forwarded by the gateway")
    ),
    responses(
        (status = 200, description = "Transfer committed"),
        (status = 400, description = "Invalid transfer or insufficient funds", body = ErrorBody),
        (status = 401, description = "Missing caller identity", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 504, description = "Deadline exceeded", body = ErrorBody)
    ),
    tags = ["store"],
    operation_id = "sendCoin"
)]
#[post("/sendCoin")]
pub async fn send_coin(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<SendCoinRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_send_coin(&user, payload.into_inner())?;
    with_deadline(state.request_timeout, state.transfers.send_coins(request)).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Buy one unit of a catalog item.
#[utoipa::path(
    get,
    path = "/api/buy/{item}",
    params(
        ("item" = String, Path, description = "Catalog item name"),
        ("X-User-Id" = i64, Header, description = "Caller id forwarded by the gateway")
    ),
    responses(
        (status = 200, description = "Purchase committed"),
        (status = 400, description = "Unknown item or insufficient funds", body = ErrorBody),
        (status = 401, description = "Missing caller identity", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 504, description = "Deadline exceeded", body = ErrorBody)
    ),
    tags = ["store"],
    operation_id = "buyItem"
)]
#[get("/buy/{item}")]
pub async fn buy_item(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    item: web::Path<String>,
) -> ApiResult<HttpResponse> {
    with_deadline(
        state.request_timeout,
        state.purchases.buy_item(user.id, item.as_str()),
    )
    .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
