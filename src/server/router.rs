use axum::{routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{account, purchase},
    state::AppState,
};

/// Path the generated OpenAPI document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "paywall", description = "Premium content purchases and referral commissions"),
    tags(
        (name = "purchase", description = "Buying and fulfilling premium content"),
        (name = "account", description = "Balances, referral codes and commission earnings")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(purchase::create_purchase, purchase::get_purchases))
        .routes(routes!(purchase::complete_purchase))
        .routes(routes!(account::get_account))
        .routes(routes!(account::create_referral_code))
        .routes(routes!(account::link_referrer))
        .routes(routes!(account::get_commissions))
        .routes(routes!(account::get_referrals))
        .split_for_parts();

    router.route(
        OPENAPI_PATH,
        get(move || {
            let api = api.clone();
            async move { Json(api) }
        }),
    )
}
