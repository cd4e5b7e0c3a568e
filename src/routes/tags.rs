//! # 태그 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/tags | `list_tags` | 전체 태그 목록 |
//! | GET | /api/tags/{id} | `get_tag` | 태그 하나 |
//! | POST | /api/tags | `create_tag` | 새 태그 생성 |
//! | PUT | /api/tags/{id} | `update_tag` | 태그 이름 변경 |
//! | DELETE | /api/tags/{id} | `delete_tag` | 태그 삭제 (게시글은 남음) |

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::*,
    routes::AppState,
    validation::Validate,
};

/// `GET /api/tags` → `[{ "id", "name" }, ...]`
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = state.repo.list_tags().await?;
    Ok(Json(tags))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tag>, AppError> {
    let tag = state
        .repo
        .find_tag(id)
        .await?
        .ok_or(AppError::NotFound("Tag"))?;
    Ok(Json(tag))
}

/// `POST /api/tags` + `{ "name": "..." }`
///
/// 이미 있는 이름이면 422 (`duplicate_name`).
pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<TagWriteRequest>,
) -> Result<Json<Tag>, AppError> {
    req.validate()?;

    let tag = state.repo.create_tag(&req.name).await?;
    Ok(Json(tag))
}

/// `PUT /api/tags/{id}` + `{ "name": "..." }`
///
/// 자기 자신의 현재 이름은 중복으로 치지 않습니다.
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagWriteRequest>,
) -> Result<Json<Tag>, AppError> {
    req.validate()?;

    let tag = state
        .repo
        .update_tag(id, &req.name)
        .await?
        .ok_or(AppError::NotFound("Tag"))?;
    Ok(Json(tag))
}

/// `DELETE /api/tags/{id}` → `{ "success": true }`
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !state.repo.delete_tag(id).await? {
        return Err(AppError::NotFound("Tag"));
    }
    tracing::info!(id, "tag deleted");
    Ok(Json(json!({ "success": true })))
}
