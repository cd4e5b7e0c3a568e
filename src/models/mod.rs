//! # 데이터 모델 모듈
//!
//! 동작이 없는 순수 데이터 구조체들입니다.
//! 조회·저장 로직은 `repository`와 `db` 모듈이 담당합니다.
//! - `article`: 게시글과 게시글 요청 구조체
//! - `tag`: 태그와 태그 요청 구조체

pub mod article;
pub mod tag;

pub use article::*;
pub use tag::*;
