//! # 태그 모델 정의
//!
//! ## 구조체 역할
//! - `Tag`: 데이터베이스에 저장된 태그 (응답용)
//! - `TagWriteRequest`: 태그 생성/수정 시 클라이언트가 보내는 JSON 본문
//! - `TagNameRef`: 게시글 쓰기 요청 안의 `{ "name": "..." }` 항목
//! - `TagIdRef`: 게시글 목록 필터 안의 `{ "id": 1 }` 항목

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 태그 엔티티: DB의 `tags` 테이블 한 행(row)에 대응합니다.
///
/// 생성/수정 시각은 저장소가 관리하며 JSON 응답에는 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    /// 전체 태그 중에서 유일한 이름
    pub name: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

/// 태그 생성/수정 요청: `POST /api/tags`, `PUT /api/tags/{id}`
#[derive(Debug, Deserialize)]
pub struct TagWriteRequest {
    pub name: String,
}

/// 게시글에 붙일 태그를 이름으로 가리킵니다 (없으면 새로 만듭니다).
#[derive(Debug, Clone, Deserialize)]
pub struct TagNameRef {
    pub name: String,
}

/// 목록 필터에서 태그를 ID로 가리킵니다.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TagIdRef {
    pub id: i64,
}
