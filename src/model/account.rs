use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AccountDto {
    pub id: i32,
    pub name: String,
    pub balance: i64,
    pub referral_code: Option<String>,
    pub referred_by: Option<i32>,
}

/// Body of `PUT /accounts/me/referrer`.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct LinkReferrerDto {
    pub referral_code: String,
}
