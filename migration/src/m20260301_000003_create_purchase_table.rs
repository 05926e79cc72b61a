use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_account_table::Account, m20260301_000002_create_post_table::Post,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Purchase::Table)
                    .if_not_exists()
                    .col(pk_auto(Purchase::Id))
                    .col(integer(Purchase::AccountId))
                    .col(integer(Purchase::PostId))
                    .col(boolean(Purchase::Completed).default(false))
                    .col(
                        timestamp_with_time_zone(Purchase::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_account_id")
                            .from(Purchase::Table, Purchase::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_post_id")
                            .from(Purchase::Table, Purchase::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One purchase per (buyer, post)
        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_account_post")
                    .table(Purchase::Table)
                    .col(Purchase::AccountId)
                    .col(Purchase::PostId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Purchase {
    Table,
    Id,
    AccountId,
    PostId,
    Completed,
    CreatedAt,
}
