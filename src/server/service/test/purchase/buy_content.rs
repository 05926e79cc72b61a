use super::*;

/// Tests a purchase by a buyer with a three-level referral chain.
///
/// Balance 100, price 40: the buyer is left with 60, R1 earns floor(1.2) = 1, R2 and
/// R3 earn floor(0.8) = floor(0.4) = 0.
///
/// Expected: Ok(PurchaseRecord) completed, balances 60 / 1 / 0 / 0
#[tokio::test]
async fn debits_buyer_and_pays_chain() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (buyer, chain) = factory::helpers::create_buyer_with_referral_chain(db, 100, 3).await?;
    let post = factory::create_premium_post(db, 40).await?;

    let settings = PurchaseSettings::default();
    let record = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer.clone()), post.id)
        .await?;

    assert_eq!(record.account_id, buyer.id);
    assert_eq!(record.post_id, post.id);
    assert_eq!(record.status, PurchaseStatus::Completed);

    assert_eq!(balance_of(db, buyer.id).await, 60);
    assert_eq!(balance_of(db, chain[0].id).await, 1);
    assert_eq!(balance_of(db, chain[1].id).await, 0);
    assert_eq!(balance_of(db, chain[2].id).await, 0);

    let commissions = CommissionRepository::new(db)
        .get_by_purchase(record.id)
        .await?;
    assert_eq!(
        commissions.iter().map(|c| c.amount).collect::<Vec<_>>(),
        vec![1, 0, 0]
    );

    Ok(())
}

/// Tests the full commission rates on a larger price.
///
/// Expected: buyer 0, R1 +30, R2 +20, R3 +10, R4 untouched
#[tokio::test]
async fn pays_three_levels_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (buyer, chain) = factory::helpers::create_buyer_with_referral_chain(db, 1000, 4).await?;
    let post = factory::create_premium_post(db, 1000).await?;

    let settings = PurchaseSettings::default();
    PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer.clone()), post.id)
        .await?;

    assert_eq!(balance_of(db, buyer.id).await, 0);
    assert_eq!(balance_of(db, chain[0].id).await, 30);
    assert_eq!(balance_of(db, chain[1].id).await, 20);
    assert_eq!(balance_of(db, chain[2].id).await, 10);
    assert_eq!(balance_of(db, chain[3].id).await, 0);

    Ok(())
}

/// Tests a buyer with a single referrer.
///
/// Expected: only R1 credited
#[tokio::test]
async fn pays_short_chain() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (buyer, chain) = factory::helpers::create_buyer_with_referral_chain(db, 500, 1).await?;
    let post = factory::create_premium_post(db, 500).await?;

    let settings = PurchaseSettings::default();
    let record = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer.clone()), post.id)
        .await?;

    assert_eq!(balance_of(db, buyer.id).await, 0);
    assert_eq!(balance_of(db, chain[0].id).await, 15);

    let commissions = CommissionRepository::new(db)
        .get_by_purchase(record.id)
        .await?;
    assert_eq!(commissions.len(), 1);

    Ok(())
}

/// Tests a buyer whose referrer refers back to the buyer.
///
/// Expected: Ok, the referrer is paid once and the buyer is never credited
#[tokio::test]
async fn terminates_on_referral_cycle() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (buyer, chain) = factory::helpers::create_buyer_with_referral_chain(db, 1000, 1).await?;
    factory::helpers::set_referrer(db, chain[0].clone(), Some(buyer.id)).await?;
    let post = factory::create_premium_post(db, 1000).await?;

    let settings = PurchaseSettings::default();
    let record = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer.clone()), post.id)
        .await?;

    assert_eq!(balance_of(db, buyer.id).await, 0);
    assert_eq!(balance_of(db, chain[0].id).await, 30);

    let commissions = CommissionRepository::new(db)
        .get_by_purchase(record.id)
        .await?;
    assert_eq!(commissions.len(), 1);

    Ok(())
}

/// Tests a buyer who cannot afford the post.
///
/// Expected: Err(InsufficientFunds), balance 5, no record
#[tokio::test]
async fn rejects_insufficient_funds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_account(db, 5).await?;
    let post = factory::create_premium_post(db, 10).await?;

    let settings = PurchaseSettings::default();
    let result = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer.clone()), post.id)
        .await;

    assert!(matches!(
        result,
        Err(PurchaseError::InsufficientFunds { price: 10, .. })
    ));
    assert_eq!(balance_of(db, buyer.id).await, 5);

    let record = PurchaseRepository::new(db)
        .find_by_account_and_post(buyer.id, post.id)
        .await?;
    assert!(record.is_none());

    Ok(())
}

/// Tests buying a post that does not exist.
///
/// Expected: Err(PostNotFound)
#[tokio::test]
async fn rejects_missing_post() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_account(db, 100).await?;

    let settings = PurchaseSettings::default();
    let result = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer), 404)
        .await;

    assert!(matches!(result, Err(PurchaseError::PostNotFound(404))));

    Ok(())
}

/// Tests buying free content.
///
/// The buyer also lacks funds, but the premium check comes first.
///
/// Expected: Err(NotPurchasable)
#[tokio::test]
async fn rejects_free_post_before_checking_funds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_account(db, 0).await?;
    let post = factory::post::PostFactory::new(db, buyer.id)
        .premium(false)
        .price(50)
        .build()
        .await?;

    let settings = PurchaseSettings::default();
    let result = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer), post.id)
        .await;

    assert!(matches!(result, Err(PurchaseError::NotPurchasable(_))));

    Ok(())
}

/// Tests buying the same post twice.
///
/// Expected: second call Err(AlreadyPurchased), buyer charged once
#[tokio::test]
async fn rejects_repeat_purchase() -> Result<(), AppError> {
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

    service.buy_content(&buyer, post.id).await?;
    let result = service.buy_content(&buyer, post.id).await;

    assert!(matches!(result, Err(PurchaseError::AlreadyPurchased { .. })));
    assert_eq!(balance_of(db, buyer.id).await, 60);

    Ok(())
}

/// Tests that ownership is reported before affordability.
///
/// The buyer already owns the post and has no money left.
///
/// Expected: Err(AlreadyPurchased)
#[tokio::test]
async fn reports_ownership_before_funds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_account(db, 0).await?;
    let post = factory::create_premium_post(db, 40).await?;
    factory::create_purchase(db, buyer.id, post.id, true).await?;

    let settings = PurchaseSettings::default();
    let result = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer), post.id)
        .await;

    assert!(matches!(result, Err(PurchaseError::AlreadyPurchased { .. })));

    Ok(())
}

/// Tests that a failure late in the transaction undoes every earlier step.
///
/// The commission table is missing, so recording the level 1 payout fails after the
/// buyer was debited, the purchase was inserted and R1 was credited.
///
/// Expected: Err(Database), all balances unchanged, no purchase record
#[tokio::test]
async fn rolls_back_everything_on_failure() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables_without_commission()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (buyer, chain) = factory::helpers::create_buyer_with_referral_chain(db, 1000, 1).await?;
    let post = factory::create_premium_post(db, 1000).await?;

    let settings = PurchaseSettings::default();
    let result = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer.clone()), post.id)
        .await;

    assert!(matches!(result, Err(PurchaseError::Database { .. })));

    assert_eq!(balance_of(db, buyer.id).await, 1000);
    assert_eq!(balance_of(db, chain[0].id).await, 0);

    let record = PurchaseRepository::new(db)
        .find_by_account_and_post(buyer.id, post.id)
        .await?;
    assert!(record.is_none());

    Ok(())
}

/// Tests decoupled fulfillment.
///
/// Expected: Ok(PurchaseRecord) pending, buyer still debited
#[tokio::test]
async fn creates_pending_record_when_fulfillment_required() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_account(db, 100).await?;
    let post = factory::create_premium_post(db, 40).await?;

    let settings = PurchaseSettings {
        requires_fulfillment: true,
        ..Default::default()
    };
    let record = PurchaseService::new(db, &settings)
        .buy_content(&Account::from_entity(buyer.clone()), post.id)
        .await?;

    assert_eq!(record.status, PurchaseStatus::Pending);
    assert_eq!(balance_of(db, buyer.id).await, 60);

    Ok(())
}
