use crate::server::{
    data::purchase::PurchaseRepository,
    model::purchase::{CreatePurchaseParams, PurchaseStatus},
};
use sea_orm::{DbErr, SqlErr};
use test_utils::{builder::TestBuilder, factory};

mod get_by_account;
