use super::*;

/// Tests finding the owner of a referral code.
///
/// Expected: Ok(Some(Account)) for a known code, Ok(None) otherwise
#[tokio::test]
async fn finds_owner_of_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = AccountFactory::new(db).referral_code("ABCD1234").build().await?;

    let repo = AccountRepository::new(db);

    let found = repo.find_by_referral_code("ABCD1234").await?;
    assert_eq!(found.map(|a| a.id), Some(owner.id));

    let missing = repo.find_by_referral_code("ZZZZ9999").await?;
    assert!(missing.is_none());

    Ok(())
}
