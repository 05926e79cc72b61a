use crate::server::{
    error::AppError,
    model::account::Account,
    service::referral::{ReferralService, ReferralWalker, MAX_REFERRAL_DEPTH},
};
use test_utils::{builder::TestBuilder, factory, factory::account::AccountFactory};

mod link_referrer;
