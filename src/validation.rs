//! # 입력 검증 모듈
//!
//! 요청 본문을 타입이 있는 구조체로 파싱한 뒤(serde), 이 모듈의 `validate()`로
//! 필드 규칙을 검사합니다. 규칙을 어기면 어떤 필드가 왜 틀렸는지를 담은
//! `ValidationErrors` 목록을 돌려주고, 핸들러는 이를 그대로 422 응답으로 보냅니다.
//!
//! ## 규칙
//! | 요청 | 필드 | 규칙 |
//! |------|------|------|
//! | 게시글 생성/수정 | `name` | 필수, 최대 255자 |
//! | 게시글 생성/수정 | `tags.*.name` | 필수, 최대 255자 |
//! | 게시글 목록 | `name` | 최대 255자 |
//! | 태그 생성/수정 | `name` | 필수, 최대 255자 |
//!
//! 태그 이름의 중복 여부는 DB를 봐야 하므로 여기서 검사하지 않습니다 (저장소 담당).

use serde::Serialize;

use crate::models::{ArticleListRequest, ArticleWriteRequest, TagWriteRequest};

/// 이름 필드의 최대 길이 (문자 수 기준)
pub const MAX_NAME_LEN: usize = 255;

/// 필드 하나에 대한 검증 실패
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// 필드 경로 (예: "name", "tags.1.name")
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 검증 실패 목록. 비어 있으면 통과입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// 실패가 하나라도 있으면 Err, 아니면 Ok(())
    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

/// 검증 가능한 요청 타입
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// 필수 문자열 필드: 공백만 있는 값도 "없음"으로 봅니다.
fn required_name(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(
            field,
            format!("The {field} field is required."),
        ));
    } else {
        max_len(errors, field, value);
    }
}

fn max_len(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.chars().count() > MAX_NAME_LEN {
        errors.push(FieldError::new(
            field,
            format!("The {field} may not be greater than {MAX_NAME_LEN} characters."),
        ));
    }
}

impl Validate for ArticleWriteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        required_name(&mut errors, "name", &self.name);

        if let Some(tags) = &self.tags {
            for (i, tag) in tags.iter().enumerate() {
                required_name(&mut errors, &format!("tags.{i}.name"), &tag.name);
            }
        }

        errors.into_result()
    }
}

impl Validate for ArticleListRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(name) = &self.name {
            max_len(&mut errors, "name", name);
        }
        errors.into_result()
    }
}

impl Validate for TagWriteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        required_name(&mut errors, "name", &self.name);
        errors.into_result()
    }
}
