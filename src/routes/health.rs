//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok" }`
//! - `GET /api/info` → `{ "info": true }`

use axum::Json;
use serde_json::{json, Value};

/// `GET /api/health`: 서버 상태를 확인합니다.
///
/// State 등 아무 추출자도 필요 없고 고정된 JSON만 반환하므로 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// `GET /api/info`: 예전 클라이언트가 살아 있는지 확인할 때 쓰던 엔드포인트
pub async fn info() -> Json<Value> {
    Json(json!({ "info": true }))
}
