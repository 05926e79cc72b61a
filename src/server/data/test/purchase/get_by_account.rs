use super::*;

/// Tests listing a buyer's purchases newest first with pagination.
///
/// Verifies that other buyers' purchases are excluded and that limit and offset
/// select the expected window.
///
/// Expected: Ok(Vec) ordered by descending ID
#[tokio::test]
async fn returns_newest_first_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_account(db, 0).await?;
    let other = factory::create_account(db, 0).await?;

    let mut purchase_ids = Vec::new();
    for _ in 0..3 {
        let post = factory::create_premium_post(db, 10).await?;
        let purchase = factory::create_purchase(db, buyer.id, post.id, true).await?;
        purchase_ids.push(purchase.id);
        factory::create_purchase(db, other.id, post.id, true).await?;
    }

    let repo = PurchaseRepository::new(db);

    let all = repo.get_by_account(buyer.id, 20, 0).await?;
    let ids: Vec<i32> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![purchase_ids[2], purchase_ids[1], purchase_ids[0]]);

    let page = repo.get_by_account(buyer.id, 1, 1).await?;
    let ids: Vec<i32> = page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![purchase_ids[1]]);

    Ok(())
}

/// Tests listing purchases of an account that bought nothing.
///
/// Expected: Ok(empty Vec)
#[tokio::test]
async fn returns_empty_for_account_without_purchases() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_account(db, 0).await?;

    let purchases = PurchaseRepository::new(db)
        .get_by_account(buyer.id, 20, 0)
        .await?;

    assert!(purchases.is_empty());

    Ok(())
}
