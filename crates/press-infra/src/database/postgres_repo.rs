//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use press_core::domain::{Category, Page, Post, SeoDraft, SeoMetadata, Tag, TagDraft, User};
use press_core::error::RepoError;
use press_core::ports::{
    CategoryRepository, PageQuery, PageRepository, PostQuery, PostRepository,
    SeoMetadataRepository, TagRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::page::{self, Entity as PageEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::seo_metadata::{self, Entity as SeoMetadataEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL page repository.
pub type PostgresPageRepository = PostgresBaseRepository<PageEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL SEO metadata repository.
pub type PostgresSeoMetadataRepository = PostgresBaseRepository<SeoMetadataEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError> {
        let mut condition = Condition::all();

        if let Some(status) = query.status {
            condition = condition.add(post::Column::Status.eq(status.as_str()));
        }
        if let Some(category_id) = query.category_id {
            condition = condition.add(post::Column::CategoryId.eq(category_id));
        }
        if let Some(search) = query.search.as_deref() {
            condition = condition.add(
                Condition::any()
                    .add(post::Column::Title.contains(search))
                    .add(post::Column::Content.contains(search))
                    .add(post::Column::Excerpt.contains(search)),
            );
        }

        let mut select = PostEntity::find().filter(condition);

        if let Some(tag_slug) = query.tag_slug.as_deref() {
            select = select
                .join(JoinType::InnerJoin, post::Relation::PostTag.def())
                .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
                .filter(tag::Column::Slug.eq(tag_slug));
        }

        let select = select
            .order_by_desc(post::Column::Sticky)
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::CreatedAt);

        let per_page = query.per_page.max(1);
        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(query.page.max(1) - 1)
            .await
            .map_err(map_db_err)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn find_slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, RepoError> {
        let mut select = PostEntity::find()
            .select_only()
            .column(post::Column::Slug)
            .filter(post::Column::Slug.starts_with(prefix));

        if let Some(id) = exclude {
            select = select.filter(post::Column::Id.ne(id));
        }

        select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn set_tags(&self, post_id: Uuid, drafts: Vec<TagDraft>) -> Result<Vec<Tag>, RepoError> {
        tracing::debug!(%post_id, tag_count = drafts.len(), "Reconciling post tags");

        let txn = self.db.begin().await.map_err(map_db_err)?;

        // Full replacement: drop every association, then recreate one per
        // draft. The surrounding transaction keeps concurrent readers
        // from observing the post with zero tags mid-save.
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let mut tags = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let existing = TagEntity::find()
                .filter(tag::Column::Slug.eq(draft.slug.as_str()))
                .one(&txn)
                .await
                .map_err(map_db_err)?;

            let model = match existing {
                Some(model) => model,
                None => {
                    // Lazy tag creation on first reference
                    tag::ActiveModel::from(Tag::new(draft.name, draft.slug))
                        .insert(&txn)
                        .await
                        .map_err(map_db_err)?
                }
            };

            post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(model.id),
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?;

            tags.push(model.into());
        }

        txn.commit().await.map_err(map_db_err)?;

        Ok(tags)
    }
}

#[async_trait]
impl PageRepository for PostgresPageRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, RepoError> {
        let result = PageEntity::find()
            .filter(page::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, query: &PageQuery) -> Result<(Vec<Page>, u64), RepoError> {
        let mut condition = Condition::all();

        if let Some(status) = query.status {
            condition = condition.add(page::Column::Status.eq(status.as_str()));
        }
        if let Some(search) = query.search.as_deref() {
            condition = condition.add(
                Condition::any()
                    .add(page::Column::Title.contains(search))
                    .add(page::Column::Content.contains(search))
                    .add(page::Column::Excerpt.contains(search)),
            );
        }

        let select = PageEntity::find()
            .filter(condition)
            .order_by_asc(page::Column::Order)
            .order_by_asc(page::Column::Title);

        let per_page = query.per_page.max(1);
        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(query.page.max(1) - 1)
            .await
            .map_err(map_db_err)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn find_slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, RepoError> {
        let mut select = PageEntity::find()
            .select_only()
            .column(page::Column::Slug)
            .filter(page::Column::Slug.starts_with(prefix));

        if let Some(id) = exclude {
            select = select.filter(page::Column::Id.ne(id));
        }

        select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn children_of(&self, page_id: Uuid) -> Result<Vec<Page>, RepoError> {
        let result = PageEntity::find()
            .filter(page::Column::ParentId.eq(page_id))
            .order_by_asc(page::Column::Order)
            .order_by_asc(page::Column::Title)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, search: Option<&str>, limit: u64) -> Result<Vec<Tag>, RepoError> {
        let mut select = TagEntity::find();

        if let Some(search) = search {
            select = select.filter(
                Condition::any()
                    .add(tag::Column::Name.contains(search))
                    .add(tag::Column::Slug.contains(search)),
            );
        }

        let result = select
            .order_by_asc(tag::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn post_count(&self, tag_id: Uuid) -> Result<u64, RepoError> {
        PostTagEntity::find()
            .filter(post_tag::Column::TagId.eq(tag_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_conflicting(
        &self,
        name: &str,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Tag>, RepoError> {
        let mut select = TagEntity::find().filter(
            Condition::any()
                .add(tag::Column::Name.eq(name))
                .add(tag::Column::Slug.eq(slug)),
        );

        if let Some(id) = exclude {
            select = select.filter(tag::Column::Id.ne(id));
        }

        let result = select.one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn post_count(&self, category_id: Uuid) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_conflicting(
        &self,
        name: &str,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Category>, RepoError> {
        let mut select = CategoryEntity::find().filter(
            Condition::any()
                .add(category::Column::Name.eq(name))
                .add(category::Column::Slug.eq(slug)),
        );

        if let Some(id) = exclude {
            select = select.filter(category::Column::Id.ne(id));
        }

        let result = select.one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl SeoMetadataRepository for PostgresSeoMetadataRepository {
    async fn find_for_post(&self, post_id: Uuid) -> Result<Option<SeoMetadata>, RepoError> {
        let result = SeoMetadataEntity::find()
            .filter(seo_metadata::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_for_page(&self, page_id: Uuid) -> Result<Option<SeoMetadata>, RepoError> {
        let result = SeoMetadataEntity::find()
            .filter(seo_metadata::Column::PageId.eq(page_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn upsert_for_post(
        &self,
        post_id: Uuid,
        draft: SeoDraft,
    ) -> Result<SeoMetadata, RepoError> {
        let existing = SeoMetadataEntity::find()
            .filter(seo_metadata::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        self.apply_upsert(existing, Some(post_id), None, draft).await
    }

    async fn upsert_for_page(
        &self,
        page_id: Uuid,
        draft: SeoDraft,
    ) -> Result<SeoMetadata, RepoError> {
        let existing = SeoMetadataEntity::find()
            .filter(seo_metadata::Column::PageId.eq(page_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        self.apply_upsert(existing, None, Some(page_id), draft).await
    }
}

impl PostgresSeoMetadataRepository {
    async fn apply_upsert(
        &self,
        existing: Option<seo_metadata::Model>,
        post_id: Option<Uuid>,
        page_id: Option<Uuid>,
        draft: SeoDraft,
    ) -> Result<SeoMetadata, RepoError> {
        let model = match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                active.meta_title = Set(draft.meta_title);
                active.meta_description = Set(draft.meta_description);
                active.meta_keywords = Set(draft.meta_keywords);
                active.og_title = Set(draft.og_title);
                active.og_image = Set(draft.og_image);
                active.updated_at = Set(Utc::now().into());
                active.update(&self.db).await.map_err(map_db_err)?
            }
            None => {
                let now = Utc::now();
                let record = SeoMetadata {
                    id: Uuid::new_v4(),
                    post_id,
                    page_id,
                    meta_title: draft.meta_title,
                    meta_description: draft.meta_description,
                    meta_keywords: draft.meta_keywords,
                    og_title: draft.og_title,
                    og_image: draft.og_image,
                    created_at: now,
                    updated_at: now,
                };
                seo_metadata::ActiveModel::from(record)
                    .insert(&self.db)
                    .await
                    .map_err(map_db_err)?
            }
        };

        Ok(model.into())
    }
}
