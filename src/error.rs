//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 저장소(Repository)는 "없음"을 `Ok(None)`/`Ok(false)`로 돌려주고,
//! 라우트 핸들러가 이를 `AppError::NotFound`로 바꿉니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 게시글/태그가 존재하지 않음 (HTTP 404)
    /// 필드에는 리소스 종류("Article", "Tag")가 들어갑니다.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 태그 이름 중복 (HTTP 422)
    /// 쓰기 전에 검사하지만, 최종 판단은 DB의 UNIQUE 제약입니다.
    #[error("The name has already been taken: {0}")]
    DuplicateName(String),

    /// 입력 검증 실패 (HTTP 422)
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: `?` 연산자로 sqlx::Error가 자동으로 AppError::Database가 됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl AppError {
    /// sqlx 에러가 UNIQUE 제약 위반이면 `DuplicateName`으로, 아니면 `Database`로 바꿉니다.
    ///
    /// 사전 중복 검사와 INSERT 사이에 다른 요청이 같은 이름을 먼저 쓴 경우에도
    /// 클라이언트는 500이 아닌 중복 에러를 받게 됩니다.
    pub fn from_tag_write(err: sqlx::Error, name: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::DuplicateName(name.to_string());
            }
        }
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 결과: `{ "error": { "code": "...", "message": "...", "fields"?: [...] } }`
    /// 내부 에러(Database, Internal)는 실제 내용을 로그에만 남기고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{resource} not found"),
                None,
            ),
            AppError::DuplicateName(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "duplicate_name",
                "The name has already been taken.".to_string(),
                None,
            ),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                "Validation failed".to_string(),
                Some(errors),
            ),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields.into_inner());
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
