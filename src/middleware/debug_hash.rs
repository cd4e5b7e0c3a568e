//! # 응답 해시 미들웨어
//!
//! JSON 응답마다 본문 바이트의 SHA-1 해시(소문자 16진수 40자)를
//! `X-DEBUG-HASH` 헤더로 붙입니다. 클라이언트는 이 값으로 받은 본문이
//! 서버가 보낸 그대로인지 확인할 수 있습니다.
//!
//! JSON이 아닌 응답(본문 없는 응답 등)은 건드리지 않습니다.
//!
//! ```text
//! 요청 ──→ [debug_hash] ──→ 핸들러
//!              │
//! 응답 ←── 본문 수집 → sha1 → 헤더 추가 → 같은 본문으로 다시 조립
//! ```

use axum::{
    body::{self, Body},
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderValue},
    middleware::Next,
    response::Response,
};
use sha1::{Digest, Sha1};

use crate::error::AppError;

/// 응답 헤더 이름 (HTTP 헤더 이름은 대소문자를 구분하지 않습니다)
pub const DEBUG_HASH_HEADER: &str = "x-debug-hash";

/// `axum::middleware::from_fn`에 넘기는 미들웨어 함수
///
/// `next.run(request)`로 안쪽(라우터/핸들러)을 먼저 실행한 뒤 응답을 가공합니다.
pub async fn debug_hash(request: Request, next: Next) -> Result<Response, AppError> {
    let response = next.run(request).await;
    if !is_json(&response) {
        return Ok(response);
    }

    // 응답을 헤더 부분(parts)과 본문(body)으로 나눕니다.
    // 본문은 스트림이므로 해시를 구하려면 끝까지 모아야 합니다.
    let (mut parts, body) = response.into_parts();
    let bytes = body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read response body: {e}")))?;

    let hash = sha1_hex(&bytes);
    // 16진수 문자열은 항상 유효한 헤더 값입니다.
    if let Ok(value) = HeaderValue::from_str(&hash) {
        parts.headers.insert(DEBUG_HASH_HEADER, value);
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// `Content-Type`이 `application/json`으로 시작하는지
fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// 바이트의 SHA-1 해시를 소문자 16진수 문자열로 돌려줍니다.
pub fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
