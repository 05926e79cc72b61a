use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Account, Post};
///
/// let test = TestBuilder::new()
///     .with_table(Account)
///     .with_table(Post)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,

    /// CREATE INDEX statements executed after all tables exist.
    indexes: Vec<IndexCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a raw index statement, created once every table exists.
    pub fn with_index(mut self, index: IndexCreateStatement) -> Self {
        self.indexes.push(index);
        self
    }

    /// Adds the tables needed to purchase content, without the commission audit table.
    ///
    /// Adds `Account`, `Post` and `Purchase` plus the unique (account, post) index the
    /// migrations create. Tests that exercise the commission cascade should use
    /// `with_purchase_tables()` instead; leaving `Commission` out makes the commission
    /// step fail, which is how rollback behaviour is exercised.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_purchase_tables_without_commission(self) -> Self {
        self.with_table(Account)
            .with_table(Post)
            .with_table(Purchase)
            .with_index(
                Index::create()
                    .name("idx_purchase_account_post")
                    .table(Purchase)
                    .col(entity::purchase::Column::AccountId)
                    .col(entity::purchase::Column::PostId)
                    .unique()
                    .to_owned(),
            )
    }

    /// Adds every table of the purchase flow in dependency order.
    ///
    /// - Account
    /// - Post
    /// - Purchase (with its unique (account, post) index)
    /// - Commission
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_purchase_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_purchase_tables(self) -> Self {
        self.with_purchase_tables_without_commission()
            .with_table(Commission)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements followed by the CREATE INDEX statements.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}
