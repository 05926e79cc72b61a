//! The in-memory test database is a single-connection pool, so the joined purchases
//! interleave at connection acquisition and their transactions run one after the other.
//! These tests pin the outcome of overlapping requests; the database guards (conditional
//! debit, unique purchase index) are covered directly by the ledger and purchase store
//! tests.

use super::*;

/// Tests two simultaneous purchases of the same post by the same buyer.
///
/// The second request is rejected by the ownership check once the first commits.
///
/// Expected: exactly one success, the other AlreadyPurchased, buyer charged once
#[tokio::test]
async fn concurrent_duplicate_purchase_charges_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = Account::from_entity(factory::create_account(db, 100).await?);
    let post = factory::create_premium_post(db, 40).await?;

    let settings = PurchaseSettings::default();
    let service = PurchaseService::new(db, &settings);

    let (first, second) = tokio::join!(
        service.buy_content(&buyer, post.id),
        service.buy_content(&buyer, post.id)
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!([first, second]
        .into_iter()
        .any(|r| matches!(r, Err(PurchaseError::AlreadyPurchased { .. }))));

    assert_eq!(balance_of(db, buyer.id).await, 60);

    Ok(())
}

/// Tests two simultaneous purchases that together exceed the balance.
///
/// The second request re-reads the balance after the first commits.
///
/// Expected: exactly one success, the other InsufficientFunds, balance never negative
#[tokio::test]
async fn concurrent_purchases_never_overdraw() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = Account::from_entity(factory::create_account(db, 50).await?);
    let first_post = factory::create_premium_post(db, 40).await?;
    let second_post = factory::create_premium_post(db, 40).await?;

    let settings = PurchaseSettings::default();
    let service = PurchaseService::new(db, &settings);

    let (first, second) = tokio::join!(
        service.buy_content(&buyer, first_post.id),
        service.buy_content(&buyer, second_post.id)
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!([first, second]
        .into_iter()
        .any(|r| matches!(r, Err(PurchaseError::InsufficientFunds { .. }))));

    assert_eq!(balance_of(db, buyer.id).await, 10);

    Ok(())
}

/// Tests concurrent purchases by two buyers sharing a referrer.
///
/// Expected: both succeed and the shared referrer is credited twice
#[tokio::test]
async fn concurrent_buyers_share_referrer_credits() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let referrer = factory::create_account(db, 0).await?;
    let first_buyer = factory::account::AccountFactory::new(db)
        .balance(1000)
        .referred_by(Some(referrer.id))
        .build()
        .await?;
    let second_buyer = factory::account::AccountFactory::new(db)
        .balance(1000)
        .referred_by(Some(referrer.id))
        .build()
        .await?;
    let post = factory::create_premium_post(db, 1000).await?;

    let first_buyer = Account::from_entity(first_buyer);
    let second_buyer = Account::from_entity(second_buyer);

    let settings = PurchaseSettings::default();
    let service = PurchaseService::new(db, &settings);

    let (first, second) = tokio::join!(
        service.buy_content(&first_buyer, post.id),
        service.buy_content(&second_buyer, post.id)
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(balance_of(db, referrer.id).await, 60);

    Ok(())
}
