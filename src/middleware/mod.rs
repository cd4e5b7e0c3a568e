//! # 미들웨어 모듈
//!
//! 모든 요청/응답에 공통으로 적용되는 처리를 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `debug_hash`: JSON 응답 본문의 SHA-1 해시를 `X-DEBUG-HASH` 헤더로 붙임

pub mod debug_hash;

pub use debug_hash::{debug_hash, DEBUG_HASH_HEADER};
