//! OpenAPI documentation for the store API.
//!
//! [`ApiDoc`] registers the store endpoints, the health probes and the DTO
//! schemas. The caller identity travels in gateway-set headers, described
//! by the `CallerId` security scheme.

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::store::{
    CoinHistoryDto, InfoResponse, InventoryItemDto, ReceivedCoinsDto, SendCoinRequest,
    SentCoinsDto,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Register the caller identity header as an API key scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "CallerId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "Authenticated user id forwarded by the gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the store API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Merch store API",
        description = "Coin balances, purchases and transfers between employees."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("CallerId" = [])),
    paths(
        crate::inbound::http::store::get_info,
        crate::inbound::http::store::send_coin,
        crate::inbound::http::store::buy_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        InfoResponse,
        InventoryItemDto,
        CoinHistoryDto,
        ReceivedCoinsDto,
        SentCoinsDto,
        SendCoinRequest,
        ErrorBody
    )),
    tags(
        (name = "store", description = "Balance, purchase and transfer operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
