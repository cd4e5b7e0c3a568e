//! 통합 테스트 공용 도우미
//!
//! 테스트마다 새 `sqlite::memory:` DB를 만들고 마이그레이션을 적용합니다.
//! 메모리 DB는 연결마다 따로 생기므로 연결 수를 1로 고정합니다.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tagboard::{
    app::build_router, db, models::ArticleDraft, repository::Repository,
    repository::SqliteRepository, routes::AppState,
};
use tower::ServiceExt;

pub async fn sqlite_repo() -> SqliteRepository {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    SqliteRepository::new(pool)
}

pub async fn test_app() -> Router {
    build_router(AppState::new(sqlite_repo().await))
}

/// 라우터에 요청 하나를 보내고 (상태 코드, JSON 본문)을 돌려줍니다.
/// 본문이 JSON이 아니면 `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// 응답 JSON의 `tags` 배열에서 이름만 뽑습니다.
pub fn tag_names(article: &Value) -> Vec<String> {
    article["tags"]
        .as_array()
        .expect("tags array")
        .iter()
        .map(|t| t["name"].as_str().expect("tag name").to_string())
        .collect()
}

/// 응답 JSON 배열에서 `name`만 뽑습니다.
pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|a| a["name"].as_str().expect("name").to_string())
        .collect()
}

/// "PHP Tutorial"(php), "JS Guide"(js), "PHP & JS"(php, js)를 만들고
/// (php 태그 ID, js 태그 ID)를 돌려줍니다.
pub async fn seed_php_js(repo: &dyn Repository) -> (i64, i64) {
    let tutorial = repo
        .create_article(&ArticleDraft::new("PHP Tutorial").with_tags(["php"]))
        .await
        .unwrap();
    let guide = repo
        .create_article(&ArticleDraft::new("JS Guide").with_tags(["js"]))
        .await
        .unwrap();
    repo.create_article(&ArticleDraft::new("PHP & JS").with_tags(["php", "js"]))
        .await
        .unwrap();

    (tutorial.tags[0].id, guide.tags[0].id)
}
