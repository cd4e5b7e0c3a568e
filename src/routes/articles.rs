//! # 게시글(Article) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/articles/{id} | `get_article` | 게시글 하나 (태그 포함) |
//! | POST | /api/articles/list | `list_articles` | 이름/태그로 거른 목록 |
//! | POST | /api/articles | `create_article` | 새 게시글 (태그 find-or-create) |
//! | PUT | /api/articles/{id} | `update_article` | 수정, `tags`가 있으면 통째로 교체 |
//! | DELETE | /api/articles/{id} | `delete_article` | 삭제 |
//!
//! 목록 조회가 GET이 아니라 POST인 이유: 필터에 태그 객체 배열이 들어가므로
//! 쿼리 문자열보다 JSON 본문이 다루기 쉽습니다.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    filter::ArticleFilter,
    models::*,
    routes::AppState,
    validation::Validate,
};

/// `GET /api/articles/{id}` → `{ "id", "name", "tags": [...] }`
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArticleWithTags>, AppError> {
    let article = state
        .repo
        .find_article(id)
        .await?
        .ok_or(AppError::NotFound("Article"))?;
    Ok(Json(article))
}

/// `POST /api/articles/list` + `{ "name"?: "...", "tags"?: [{ "id": 1 }] }` → `[...]`
///
/// 태그 ID는 "하나라도 일치"로 결합되고, 이름과 함께 주면 둘 다 만족해야 합니다.
pub async fn list_articles(
    State(state): State<AppState>,
    Json(req): Json<ArticleListRequest>,
) -> Result<Json<Vec<ArticleWithTags>>, AppError> {
    req.validate()?;

    let filter = ArticleFilter::from_list_request(&req);
    let articles = state.repo.find_articles(&filter).await?;
    Ok(Json(articles))
}

/// `POST /api/articles` + `{ "name": "...", "tags"?: [{ "name": "php" }] }`
pub async fn create_article(
    State(state): State<AppState>,
    Json(req): Json<ArticleWriteRequest>,
) -> Result<Json<ArticleWithTags>, AppError> {
    req.validate()?;

    let article = state.repo.create_article(&ArticleDraft::from(req)).await?;
    Ok(Json(article))
}

/// `PUT /api/articles/{id}` + `{ "name": "...", "tags"?: [...] }`
///
/// `tags` 필드가 없으면 기존 태그를 유지하고, 있으면 (빈 배열 포함) 그 목록으로 교체합니다.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ArticleWriteRequest>,
) -> Result<Json<ArticleWithTags>, AppError> {
    req.validate()?;

    let article = state
        .repo
        .update_article(id, &ArticleDraft::from(req))
        .await?
        .ok_or(AppError::NotFound("Article"))?;
    Ok(Json(article))
}

/// `DELETE /api/articles/{id}` → `{ "success": true }`
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !state.repo.delete_article(id).await? {
        return Err(AppError::NotFound("Article"));
    }
    tracing::info!(id, "article deleted");
    Ok(Json(json!({ "success": true })))
}
