use sea_orm_migration::prelude::*;

use super::m20250310_000003_create_content::{Pages, Posts};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeoMetadata::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeoMetadata::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Unique nullable owners keep the record one-to-one
                    .col(ColumnDef::new(SeoMetadata::PostId).uuid().unique_key())
                    .col(ColumnDef::new(SeoMetadata::PageId).uuid().unique_key())
                    .col(ColumnDef::new(SeoMetadata::MetaTitle).string())
                    .col(ColumnDef::new(SeoMetadata::MetaDescription).string())
                    .col(ColumnDef::new(SeoMetadata::MetaKeywords).string())
                    .col(ColumnDef::new(SeoMetadata::OgTitle).string())
                    .col(ColumnDef::new(SeoMetadata::OgImage).string())
                    .col(
                        ColumnDef::new(SeoMetadata::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeoMetadata::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seo_metadata_post")
                            .from(SeoMetadata::Table, SeoMetadata::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seo_metadata_page")
                            .from(SeoMetadata::Table, SeoMetadata::PageId)
                            .to(Pages::Table, Pages::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeoMetadata::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SeoMetadata {
    Table,
    Id,
    PostId,
    PageId,
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    OgTitle,
    OgImage,
    CreatedAt,
    UpdatedAt,
}
