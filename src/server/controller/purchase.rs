use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        purchase::{PurchaseCreateDto, PurchaseDto},
    },
    server::{
        error::{purchase::PurchaseError, AppError},
        middleware::auth::AuthGuard,
        service::purchase::PurchaseService,
        state::AppState,
    },
};

/// Tag for grouping purchase endpoints in OpenAPI documentation
pub static PURCHASE_TAG: &str = "purchase";

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

#[derive(Deserialize)]
pub struct PurchaseListParams {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Buy a premium post.
///
/// Debits the authenticated account by the post's price, records the purchase and
/// pays referral commissions to up to three levels of referrers, all or nothing.
///
/// # Access Control
/// - Any authenticated account; the buyer is always the session's account
///
/// # Arguments
/// - `state` - Application state containing the database connection and purchase settings
/// - `session` - Account's session for authentication
/// - `payload` - The post to buy
///
/// # Returns
/// - `201 Created` - Purchase committed
/// - `400 Bad Request` - Malformed body or non-positive post ID
/// - `401 Unauthorized` - Not authenticated
/// - `404 Not Found` - Post does not exist
/// - `409 Conflict` - Post is free, already purchased, or balance too low
/// - `503 Service Unavailable` - Transaction kept conflicting; retry later
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/purchases",
    tag = PURCHASE_TAG,
    request_body = PurchaseCreateDto,
    responses(
        (status = 201, description = "Purchase committed", body = PurchaseDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 409, description = "Not premium, already purchased, or insufficient funds", body = ErrorDto),
        (status = 503, description = "Transaction conflict, retry later", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<PurchaseCreateDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let buyer = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if payload.post_id <= 0 {
        return Err(AppError::BadRequest(
            "post_id must be a positive integer".to_string(),
        ));
    }

    let service = PurchaseService::new(&state.db, &state.purchase_settings);

    let record = service.buy_content(&buyer, payload.post_id).await?;

    Ok((StatusCode::CREATED, Json(record.into_dto())))
}

/// List the authenticated account's purchases.
///
/// Newest purchases first. `limit` defaults to 20 and is capped at 100.
///
/// # Returns
/// - `200 OK` - Page of purchases
/// - `401 Unauthorized` - Not authenticated
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/purchases",
    tag = PURCHASE_TAG,
    params(
        ("limit" = Option<u64>, Query, description = "Maximum number of purchases (default: 20, max: 100)"),
        ("offset" = Option<u64>, Query, description = "Number of purchases to skip (default: 0)")
    ),
    responses(
        (status = 200, description = "Page of purchases", body = Vec<PurchaseDto>),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_purchases(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PurchaseListParams>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PurchaseService::new(&state.db, &state.purchase_settings);

    let limit = params.limit.clamp(1, MAX_LIMIT);
    let records = service
        .list_purchases(account.id, limit, params.offset)
        .await?;

    let dtos: Vec<PurchaseDto> = records.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Mark a purchase as completed.
///
/// Idempotent; completing a completed purchase returns it unchanged. Purchases owned
/// by another account are reported as not found unless the caller is an admin.
///
/// # Returns
/// - `200 OK` - The completed purchase
/// - `401 Unauthorized` - Not authenticated
/// - `404 Not Found` - No such purchase visible to the caller
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/purchases/{purchase_id}/complete",
    tag = PURCHASE_TAG,
    params(
        ("purchase_id" = i32, Path, description = "Purchase ID")
    ),
    responses(
        (status = 200, description = "Purchase completed", body = PurchaseDto),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 404, description = "Purchase not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_purchase(
    State(state): State<AppState>,
    session: Session,
    Path(purchase_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PurchaseService::new(&state.db, &state.purchase_settings);

    let Some(record) = service.get_purchase(purchase_id).await? else {
        return Err(PurchaseError::PurchaseNotFound(purchase_id).into());
    };

    if record.account_id != account.id && !account.admin {
        return Err(PurchaseError::PurchaseNotFound(purchase_id).into());
    }

    let record = service.complete_purchase(purchase_id).await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}
