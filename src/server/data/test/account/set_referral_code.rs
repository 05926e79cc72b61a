use super::*;

/// Tests storing a referral code on an account without one.
///
/// Expected: Ok(true) and the code persisted
#[tokio::test]
async fn sets_code_when_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_account(db, 0).await?;

    let repo = AccountRepository::new(db);
    let stored = repo.set_referral_code(account.id, "CODE0001".to_string()).await?;

    assert!(stored);
    let account = repo.find_by_id(account.id).await?.unwrap();
    assert_eq!(account.referral_code.as_deref(), Some("CODE0001"));

    Ok(())
}

/// Tests that an existing referral code is never overwritten.
///
/// Expected: Ok(false) and the original code kept
#[tokio::test]
async fn keeps_existing_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = AccountFactory::new(db).referral_code("FIRST001").build().await?;

    let repo = AccountRepository::new(db);
    let stored = repo.set_referral_code(account.id, "SECOND01".to_string()).await?;

    assert!(!stored);
    let account = repo.find_by_id(account.id).await?.unwrap();
    assert_eq!(account.referral_code.as_deref(), Some("FIRST001"));

    Ok(())
}

/// Tests that two accounts cannot share a referral code.
///
/// Expected: Err(DbErr) classified as a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    AccountFactory::new(db).referral_code("TAKEN001").build().await?;
    let account = factory::create_account(db, 0).await?;

    let result = AccountRepository::new(db)
        .set_referral_code(account.id, "TAKEN001".to_string())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
