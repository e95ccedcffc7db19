//! Schema migrations for the Press CMS database.

pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_users;
mod m20250310_000002_create_taxonomy;
mod m20250310_000003_create_content;
mod m20250310_000004_create_seo_metadata;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_users::Migration),
            Box::new(m20250310_000002_create_taxonomy::Migration),
            Box::new(m20250310_000003_create_content::Migration),
            Box::new(m20250310_000004_create_seo_metadata::Migration),
        ]
    }
}
