use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        account::{AccountDto, LinkReferrerDto},
        api::ErrorDto,
        commission::CommissionDto,
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::referral::ReferralService,
        state::AppState,
    },
};

/// Tag for grouping account endpoints in OpenAPI documentation
pub static ACCOUNT_TAG: &str = "account";

/// Get the authenticated account.
///
/// # Returns
/// - `200 OK` - Account with its current balance and referral data
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/accounts/me",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Authenticated account", body = AccountDto),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_account(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// Get or create the authenticated account's referral code.
///
/// Idempotent; an account keeps its first code.
#[utoipa::path(
    post,
    path = "/accounts/me/referral-code",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Account with its referral code", body = AccountDto),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_referral_code(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let account = ReferralService::new(&state.db)
        .assign_referral_code(&account)
        .await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// Link the authenticated account to the owner of a referral code.
///
/// An account can be linked once. Links that would make the account its own
/// referrer, directly or through its referral chain, are rejected.
///
/// # Returns
/// - `200 OK` - Account with `referred_by` set
/// - `400 Bad Request` - Malformed body, already linked, or link would form a cycle
/// - `401 Unauthorized` - Not authenticated
/// - `404 Not Found` - Unknown referral code
#[utoipa::path(
    put,
    path = "/accounts/me/referrer",
    tag = ACCOUNT_TAG,
    request_body = LinkReferrerDto,
    responses(
        (status = 200, description = "Referrer linked", body = AccountDto),
        (status = 400, description = "Invalid or disallowed referral link", body = ErrorDto),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 404, description = "Referral code not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn link_referrer(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<LinkReferrerDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let account = ReferralService::new(&state.db)
        .link_referrer(&account, &payload.referral_code)
        .await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// List commissions credited to the authenticated account, newest first.
#[utoipa::path(
    get,
    path = "/accounts/me/commissions",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Commissions earned", body = Vec<CommissionDto>),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_commissions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let records = ReferralService::new(&state.db)
        .commission_earnings(account.id)
        .await?;

    let dtos: Vec<CommissionDto> = records.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// List the accounts that joined with the authenticated account's referral code.
///
/// Only direct referrals are returned, oldest first.
#[utoipa::path(
    get,
    path = "/accounts/me/referrals",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Directly referred accounts", body = Vec<AccountDto>),
        (status = 401, description = "Account not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_referrals(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let accounts = ReferralService::new(&state.db)
        .referred_accounts(account.id)
        .await?;

    let dtos: Vec<AccountDto> = accounts.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
