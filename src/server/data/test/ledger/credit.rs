use super::*;

/// Tests crediting an account.
///
/// Expected: Ok(new balance)
#[tokio::test]
async fn increases_balance() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_account(db, 7).await?;

    let repo = LedgerRepository::new(db);

    assert!(matches!(repo.credit(account.id, 3).await, Ok(10)));
    assert!(matches!(repo.credit(account.id, 0).await, Ok(10)));

    Ok(())
}

/// Tests crediting an account that does not exist.
///
/// Expected: Err(AccountNotFound)
#[tokio::test]
async fn rejects_missing_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = LedgerRepository::new(db).credit(42, 1).await;

    assert!(matches!(result, Err(LedgerError::AccountNotFound(42))));

    Ok(())
}

/// Tests that negative credits are refused.
///
/// Expected: Err(InvalidAmount)
#[tokio::test]
async fn rejects_negative_amount() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_account(db, 7).await?;

    let result = LedgerRepository::new(db).credit(account.id, -1).await;

    assert!(matches!(result, Err(LedgerError::InvalidAmount(-1))));

    Ok(())
}
