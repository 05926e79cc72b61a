use crate::server::data::account::AccountRepository;
use sea_orm::{DbErr, SqlErr};
use test_utils::{builder::TestBuilder, factory, factory::account::AccountFactory};

mod find_by_referral_code;
mod set_referral_code;
