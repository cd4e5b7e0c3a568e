//! # 저장소(Repository) 인터페이스
//!
//! 라우트 핸들러는 SQL을 직접 알지 못하고 이 트레이트만 호출합니다.
//! 구현체는 두 가지입니다.
//! - `SqliteRepository`: 실제 서비스용. `db` 모듈의 쿼리 함수를 감쌉니다.
//! - `MemoryRepository`: 메모리 위의 구현. 목록 필터를 SQL 없이 검증할 때 씁니다.
//!
//! "없음"은 에러가 아니라 `Ok(None)`/`Ok(false)`로 돌려주고,
//! 404로 바꾸는 일은 호출한 쪽(핸들러)이 합니다.

mod memory;
mod sqlite;

pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

use async_trait::async_trait;

use crate::error::AppError;
use crate::filter::ArticleFilter;
use crate::models::{ArticleDraft, ArticleWithTags, Tag};

#[async_trait]
pub trait Repository: Send + Sync {
    /// 게시글 하나를 태그와 함께 조회
    async fn find_article(&self, id: i64) -> Result<Option<ArticleWithTags>, AppError>;

    /// 필터에 맞는 게시글 목록 (ID 오름차순, 태그 포함)
    async fn find_articles(&self, filter: &ArticleFilter)
        -> Result<Vec<ArticleWithTags>, AppError>;

    /// 게시글 생성. 태그 이름은 find-or-create로 연결됩니다.
    async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleWithTags, AppError>;

    /// 게시글 수정. `draft.tags`가 있으면 태그 연결을 통째로 교체합니다.
    async fn update_article(
        &self,
        id: i64,
        draft: &ArticleDraft,
    ) -> Result<Option<ArticleWithTags>, AppError>;

    async fn delete_article(&self, id: i64) -> Result<bool, AppError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, AppError>;

    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// 태그 생성. 같은 이름이 있으면 `AppError::DuplicateName`.
    async fn create_tag(&self, name: &str) -> Result<Tag, AppError>;

    /// 태그 이름 변경. 다른 태그가 그 이름을 쓰고 있으면 `AppError::DuplicateName`.
    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, AppError>;

    /// 태그 삭제. 연결된 게시글은 남고 관계만 사라집니다.
    async fn delete_tag(&self, id: i64) -> Result<bool, AppError>;
}
