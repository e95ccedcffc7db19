//! Page entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use press_core::domain::PostStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub excerpt: Option<String>,
    pub template: Option<String>,
    pub status: String,
    #[sea_orm(column_name = "sort_order")]
    pub order: i32,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Parent,
    #[sea_orm(has_one = "super::seo_metadata::Entity")]
    SeoMetadata,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for press_core::domain::Page {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            parent_id: model.parent_id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            excerpt: model.excerpt,
            template: model.template,
            status: PostStatus::parse(&model.status).unwrap_or(PostStatus::Draft),
            order: model.order,
            published_at: model.published_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<press_core::domain::Page> for ActiveModel {
    fn from(page: press_core::domain::Page) -> Self {
        Self {
            id: Set(page.id),
            author_id: Set(page.author_id),
            parent_id: Set(page.parent_id),
            title: Set(page.title),
            slug: Set(page.slug),
            content: Set(page.content),
            excerpt: Set(page.excerpt),
            template: Set(page.template),
            status: Set(page.status.as_str().to_string()),
            order: Set(page.order),
            published_at: Set(page.published_at.map(Into::into)),
            created_at: Set(page.created_at.into()),
            updated_at: Set(page.updated_at.into()),
        }
    }
}
