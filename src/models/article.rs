//! # 게시글 모델 정의
//!
//! ## 구조체 역할
//! - `Article`: `articles` 테이블 한 행
//! - `ArticleWithTags`: 태그 목록을 함께 담은 응답용 게시글
//! - `ArticleDraft`: 저장소에 넘기는 생성/수정 입력 (검증을 통과한 값)
//! - `ArticleWriteRequest`, `ArticleListRequest`: 클라이언트가 보내는 JSON 본문

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tag::{Tag, TagIdRef, TagNameRef};

/// 게시글 엔티티
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

/// 연결된 태그를 함께 로딩한 게시글.
///
/// JSON으로는 `{ "id": 1, "name": "...", "tags": [{ "id": 1, "name": "php" }] }`가 됩니다.
/// `#[serde(flatten)]`: Article의 필드를 중첩 객체가 아닌 같은 레벨에 펼칩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleWithTags {
    #[serde(flatten)]
    pub article: Article,
    /// 연결된 순서대로 정렬된 태그 목록
    pub tags: Vec<Tag>,
}

impl ArticleWithTags {
    pub fn id(&self) -> i64 {
        self.article.id
    }

    pub fn name(&self) -> &str {
        &self.article.name
    }

    /// 이 게시글에 해당 태그가 연결되어 있는지
    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

/// 게시글 생성/수정 입력.
///
/// `tags`가 `None`이면 수정 시 기존 태그를 그대로 두고,
/// `Some(..)`이면 (빈 목록 포함) 기존 연결을 모두 지운 뒤 다시 붙입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub name: String,
    pub tags: Option<Vec<String>>,
}

impl ArticleDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

impl From<ArticleWriteRequest> for ArticleDraft {
    fn from(req: ArticleWriteRequest) -> Self {
        Self {
            name: req.name,
            tags: req
                .tags
                .map(|tags| tags.into_iter().map(|t| t.name).collect()),
        }
    }
}

/// 게시글 생성/수정 요청: `POST /api/articles`, `PUT /api/articles/{id}`
#[derive(Debug, Deserialize)]
pub struct ArticleWriteRequest {
    pub name: String,
    /// 필드가 아예 없으면 None (수정 시 태그 유지)
    #[serde(default)]
    pub tags: Option<Vec<TagNameRef>>,
}

/// 게시글 목록 필터 요청: `POST /api/articles/list`
#[derive(Debug, Default, Deserialize)]
pub struct ArticleListRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<TagIdRef>>,
}
