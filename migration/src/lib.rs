pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_account_table;
mod m20260301_000002_create_post_table;
mod m20260301_000003_create_purchase_table;
mod m20260301_000004_create_commission_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_account_table::Migration),
            Box::new(m20260301_000002_create_post_table::Migration),
            Box::new(m20260301_000003_create_purchase_table::Migration),
            Box::new(m20260301_000004_create_commission_table::Migration),
        ]
    }
}
