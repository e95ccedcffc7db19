//! SEO metadata entity for SeaORM. Attached to exactly one post or one
//! page; the unique indexes on the foreign keys keep it one-to-one.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seo_metadata")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub post_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub page_id: Option<Uuid>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_image: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Page,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for press_core::domain::SeoMetadata {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            page_id: model.page_id,
            meta_title: model.meta_title,
            meta_description: model.meta_description,
            meta_keywords: model.meta_keywords,
            og_title: model.og_title,
            og_image: model.og_image,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<press_core::domain::SeoMetadata> for ActiveModel {
    fn from(seo: press_core::domain::SeoMetadata) -> Self {
        Self {
            id: Set(seo.id),
            post_id: Set(seo.post_id),
            page_id: Set(seo.page_id),
            meta_title: Set(seo.meta_title),
            meta_description: Set(seo.meta_description),
            meta_keywords: Set(seo.meta_keywords),
            og_title: Set(seo.og_title),
            og_image: Set(seo.og_image),
            created_at: Set(seo.created_at.into()),
            updated_at: Set(seo.updated_at.into()),
        }
    }
}
