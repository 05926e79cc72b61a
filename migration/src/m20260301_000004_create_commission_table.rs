use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_account_table::Account,
    m20260301_000003_create_purchase_table::Purchase,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Commission::Table)
                    .if_not_exists()
                    .col(pk_auto(Commission::Id))
                    .col(integer(Commission::PurchaseId))
                    .col(integer(Commission::BeneficiaryId))
                    .col(small_integer(Commission::Level))
                    .col(big_integer(Commission::Amount))
                    .col(
                        timestamp_with_time_zone(Commission::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_commission_purchase_id")
                            .from(Commission::Table, Commission::PurchaseId)
                            .to(Purchase::Table, Purchase::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_commission_beneficiary_id")
                            .from(Commission::Table, Commission::BeneficiaryId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_commission_beneficiary_id")
                    .table(Commission::Table)
                    .col(Commission::BeneficiaryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Commission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Commission {
    Table,
    Id,
    PurchaseId,
    BeneficiaryId,
    Level,
    Amount,
    CreatedAt,
}
