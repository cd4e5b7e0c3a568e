//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! 핸들러는 요청 본문을 파싱·검증하고 저장소를 호출한 뒤, 결과를 JSON으로 돌려줍니다.
//!
//! 각 하위 모듈:
//! - `articles`: 게시글 CRUD와 목록 필터 조회
//! - `tags`: 태그 CRUD
//! - `health`: 서버 상태 확인

pub mod articles;
pub mod health;
pub mod tags;

pub use articles::*;
pub use health::*;
pub use tags::*;

use std::sync::Arc;

use crate::repository::Repository;

/// 모든 핸들러가 공유하는 애플리케이션 상태
///
/// 저장소 구현체를 트레이트 객체로 들고 있으므로, 테스트에서는 다른 구현을 끼울 수 있습니다.
/// `Arc` 덕분에 clone해도 저장소 자체는 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(repo: impl Repository + 'static) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}
