#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    use press_core::domain::{Post, PostStatus, TagDraft};
    use press_core::ports::{BaseRepository, PostRepository};

    use crate::database::entity::{post, post_tag, tag};
    use crate::database::postgres_repo::PostgresPostRepository;

    fn post_model(id: uuid::Uuid, title: &str, slug: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            author_id: uuid::Uuid::new_v4(),
            category_id: None,
            title: title.to_owned(),
            slug: slug.to_owned(),
            content: "Content".to_owned(),
            excerpt: None,
            featured_image: None,
            status: "draft".to_owned(),
            sticky: false,
            published_at: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn tag_model(name: &str, slug: &str) -> tag::Model {
        let now = chrono::Utc::now();
        tag::Model {
            id: uuid::Uuid::new_v4(),
            name: name.to_owned(),
            slug: slug.to_owned(),
            color: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_post_by_id_maps_to_domain() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, "Test Post", "test-post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let found = result.unwrap();
        assert_eq!(found.id, post_id);
        assert_eq!(found.title, "Test Post");
        assert_eq!(found.status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn find_by_slug_returns_none_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_by_slug("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn find_slugs_with_prefix_collects_strings() {
        let rows = vec![
            BTreeMap::from([("slug", Value::from("hello-world"))]),
            BTreeMap::from([("slug", Value::from("hello-world-2"))]),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![rows])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let slugs = repo.find_slugs_with_prefix("hello-world", None).await.unwrap();
        assert_eq!(slugs, vec!["hello-world", "hello-world-2"]);
    }

    #[tokio::test]
    async fn set_tags_with_empty_list_only_clears_associations() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let tags = repo.set_tags(uuid::Uuid::new_v4(), Vec::new()).await.unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn set_tags_reuses_existing_tag() {
        let post_id = uuid::Uuid::new_v4();
        let existing = tag_model("News", "news");
        let association = post_tag::Model {
            post_id,
            tag_id: existing.id,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // clearing the previous associations
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            // tag lookup by slug finds the existing tag
            .append_query_results(vec![vec![existing.clone()]])
            // association insert returning
            .append_query_results(vec![vec![association]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let drafts = TagDraft::dedupe(["News"]);
        let tags = repo.set_tags(post_id, drafts).await.unwrap();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, existing.id);
        assert_eq!(tags[0].slug, "news");
    }

    #[tokio::test]
    async fn set_tags_creates_missing_tag() {
        let post_id = uuid::Uuid::new_v4();
        let created = tag_model("Tutorial", "tutorial");
        let association = post_tag::Model {
            post_id,
            tag_id: created.id,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            // lookup by slug comes back empty
            .append_query_results(vec![Vec::<tag::Model>::new()])
            // lazy tag insert returning
            .append_query_results(vec![vec![created.clone()]])
            // association insert returning
            .append_query_results(vec![vec![association]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let drafts = TagDraft::dedupe(["Tutorial"]);
        let tags = repo.set_tags(post_id, drafts).await.unwrap();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "Tutorial");
        assert_eq!(tags[0].slug, "tutorial");
    }
}
