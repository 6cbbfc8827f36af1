use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Organization};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Organization)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema. Tables should be
    /// added in dependency order (tables with foreign keys after their
    /// referenced tables).
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds all tables required for space operations in dependency order:
    /// User, Organization, Plan, Space, DomainName plus the space-scoped
    /// child resources.
    pub fn with_space_tables(self) -> Self {
        self.with_table(User)
            .with_table(Organization)
            .with_table(OrganizationMember)
            .with_table(Plan)
            .with_table(Space)
            .with_table(DomainName)
            .with_table(FtpUser)
            .with_table(Mailbox)
            .with_table(MailForward)
            .with_table(SubDomain)
    }

    /// Adds every table of the schema, including user tokens and scheduled
    /// tasks.
    pub fn with_all_tables(self) -> Self {
        self.with_space_tables()
            .with_table(UserToken)
            .with_table(ScheduledTask)
    }

    /// Builds and initializes the test context with the configured tables.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
