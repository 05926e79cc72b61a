use super::*;

/// Tests recording commission levels for a purchase.
///
/// Verifies records are returned by purchase ordered by level.
///
/// Expected: Ok(records) with levels 1 and 2
#[tokio::test]
async fn records_levels_for_purchase() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_purchase_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (buyer, chain) =
        factory::helpers::create_buyer_with_referral_chain(db, 100, 2).await?;
    let post = factory::create_premium_post(db, 100).await?;
    let purchase = factory::create_purchase(db, buyer.id, post.id, true).await?;

    let repo = CommissionRepository::new(db);

    // Inserted out of order on purpose
    for (level, ancestor, amount) in [(2u8, &chain[1], 2), (1u8, &chain[0], 3)] {
        repo.create(CreateCommissionParams {
            purchase_id: purchase.id,
            beneficiary_id: ancestor.id,
            level,
            amount,
        })
        .await?;
    }

    let records = repo.get_by_purchase(purchase.id).await?;

    let levels: Vec<(u8, i32, i64)> = records
        .iter()
        .map(|r| (r.level, r.beneficiary_id, r.amount))
        .collect();
    assert_eq!(levels, vec![(1, chain[0].id, 3), (2, chain[1].id, 2)]);

    Ok(())
}
