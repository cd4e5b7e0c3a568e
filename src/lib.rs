//! # tagboard
//!
//! 게시글(Article)과 태그(Tag)를 다대다로 연결해 관리하는 REST API입니다.
//! 핵심은 게시글 목록 필터입니다. 이름 부분 문자열과 태그 ID 집합으로
//! 게시글을 거르며, 두 조건은 AND로 결합되고 태그 ID끼리는 OR로 결합됩니다.
//!
//! ## 모듈 구성
//! - `models`: 동작 없는 데이터 구조체
//! - `filter`: 목록 조회 조건(`ArticleFilter`)
//! - `validation`: 요청 본문 검증
//! - `db`: SQLite 쿼리 함수
//! - `repository`: 핸들러가 호출하는 저장소 트레이트와 구현체
//! - `routes`, `app`: HTTP 핸들러와 라우터 조립
//! - `middleware`: 응답 해시 헤더 등 공통 응답 처리
//! - `config`, `error`: 설정과 에러 타입

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod validation;
