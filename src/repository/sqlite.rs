//! # SQLite 저장소 (SqliteRepository)
//!
//! `Repository` 트레이트를 `db::articles`, `db::tags`의 쿼리 함수로 구현합니다.
//! 이 파일에는 SQL이 없습니다. 각 메서드는 연결 풀을 넘겨 해당 함수를 호출할 뿐입니다.
//!
//! ```text
//! 라우트 핸들러 ──→ Arc<dyn Repository> ──→ SqliteRepository ──→ db::* ──→ SQLite
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::Repository;
use crate::db;
use crate::error::AppError;
use crate::filter::ArticleFilter;
use crate::models::{ArticleDraft, ArticleWithTags, Tag};

/// SQLite 연결 풀 위의 저장소.
///
/// `SqlitePool`은 내부적으로 Arc이므로 clone해도 같은 풀을 가리킵니다.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// #[async_trait]: 트레이트의 async fn을 `Pin<Box<dyn Future>>` 반환으로 바꿔 주어
// `dyn Repository`로 쓸 수 있게 합니다.
#[async_trait]
impl Repository for SqliteRepository {
    async fn find_article(&self, id: i64) -> Result<Option<ArticleWithTags>, AppError> {
        db::articles::find_article(&self.pool, id).await
    }

    async fn find_articles(
        &self,
        filter: &ArticleFilter,
    ) -> Result<Vec<ArticleWithTags>, AppError> {
        db::articles::find_by_filter(&self.pool, filter).await
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleWithTags, AppError> {
        db::articles::create_article(&self.pool, draft).await
    }

    async fn update_article(
        &self,
        id: i64,
        draft: &ArticleDraft,
    ) -> Result<Option<ArticleWithTags>, AppError> {
        db::articles::update_article(&self.pool, id, draft).await
    }

    async fn delete_article(&self, id: i64) -> Result<bool, AppError> {
        db::articles::delete_article(&self.pool, id).await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        db::tags::list_tags(&self.pool).await
    }

    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, AppError> {
        db::tags::get_tag(&self.pool, id).await
    }

    async fn create_tag(&self, name: &str) -> Result<Tag, AppError> {
        db::tags::create_tag(&self.pool, name).await
    }

    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, AppError> {
        db::tags::update_tag(&self.pool, id, name).await
    }

    async fn delete_tag(&self, id: i64) -> Result<bool, AppError> {
        db::tags::delete_tag(&self.pool, id).await
    }
}
