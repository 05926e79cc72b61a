use super::*;

/// Tests linking an account to the owner of a referral code.
///
/// The code is matched case-insensitively.
///
/// Expected: Ok(Account) with `referred_by` set
#[tokio::test]
async fn links_to_code_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let referrer = AccountFactory::new(db).referral_code("REF00001").build().await?;
    let account = Account::from_entity(factory::create_account(db, 0).await?);

    let account = ReferralService::new(db)
        .link_referrer(&account, " ref00001 ")
        .await?;

    assert_eq!(account.referred_by, Some(referrer.id));

    Ok(())
}

/// Tests linking with a code nobody owns.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_unknown_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = Account::from_entity(factory::create_account(db, 0).await?);

    let result = ReferralService::new(db)
        .link_referrer(&account, "NOPE0000")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that an account cannot change its referrer.
///
/// Expected: Err(AppError::BadRequest), original referrer kept
#[tokio::test]
async fn rejects_already_linked_account() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::create_account(db, 0).await?;
    AccountFactory::new(db).referral_code("OTHER001").build().await?;
    let account = AccountFactory::new(db)
        .referred_by(Some(original.id))
        .build()
        .await?;

    let result = ReferralService::new(db)
        .link_referrer(&Account::from_entity(account), "OTHER001")
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that an account cannot use its own code.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_self_referral() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = AccountFactory::new(db).referral_code("SELF0001").build().await?;

    let result = ReferralService::new(db)
        .link_referrer(&Account::from_entity(account), "SELF0001")
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that linking to a descendant is refused.
///
/// R referred A, and A referred B. R linking to B's code would close the loop
/// R → B → A → R.
///
/// Expected: Err(AppError::BadRequest), R still unlinked
#[tokio::test]
async fn rejects_link_to_descendant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::create_account(db, 0).await?;
    let child = AccountFactory::new(db).referred_by(Some(root.id)).build().await?;
    AccountFactory::new(db)
        .referred_by(Some(child.id))
        .referral_code("GRAND001")
        .build()
        .await?;

    let result = ReferralService::new(db)
        .link_referrer(&Account::from_entity(root.clone()), "GRAND001")
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let root = crate::server::data::account::AccountRepository::new(db)
        .find_by_id(root.id)
        .await?
        .unwrap();
    assert_eq!(root.referred_by, None);

    Ok(())
}
