mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn create_article_with_tags_returns_article_and_tags() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "PHP Tutorial", "tags": [{ "name": "php" }, { "name": "web" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "PHP Tutorial");
    assert_eq!(tag_names(&body), vec!["php", "web"]);
    // 타임스탬프는 응답에 나오지 않습니다.
    assert!(body.get("created_at").is_none());
    assert!(body.get("updated_at").is_none());
    assert!(body["tags"][0].get("created_at").is_none());
}

#[tokio::test]
async fn repeated_tag_names_attach_once() {
    let app = test_app().await;
    send(&app, "POST", "/api/tags", Some(json!({ "name": "x" }))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "dup", "tags": [{ "name": "x" }, { "name": "x" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag_names(&body), vec!["x"]);

    let (_, fresh) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "fresh", "tags": [{ "name": "y" }, { "name": "y" }] })),
    )
    .await;
    assert_eq!(tag_names(&fresh), vec!["y"]);

    let (_, tags) = send(&app, "GET", "/api/tags", None).await;
    assert_eq!(names(&tags), vec!["x", "y"]);
}

#[tokio::test]
async fn existing_tags_are_reused_by_exact_name() {
    let app = test_app().await;
    let (_, php) = send(&app, "POST", "/api/tags", Some(json!({ "name": "php" }))).await;

    let (_, article) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "a", "tags": [{ "name": "php" }, { "name": "PHP" }] })),
    )
    .await;

    assert_eq!(article["tags"][0]["id"], php["id"]);
    assert_eq!(tag_names(&article), vec!["php", "PHP"]);
}

#[tokio::test]
async fn get_article_and_missing_article() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "JS Guide", "tags": [{ "name": "js" }] })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/articles/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, body) = send(&app, "GET", "/api/articles/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn update_replaces_tag_set() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "before", "tags": [{ "name": "A" }, { "name": "B" }] })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/articles/{id}"),
        Some(json!({ "name": "after", "tags": [{ "name": "C" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "after");
    assert_eq!(tag_names(&body), vec!["C"]);

    // A, B는 연결만 풀리고 태그로는 남아 있습니다.
    let (_, tags) = send(&app, "GET", "/api/tags", None).await;
    assert_eq!(names(&tags), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn update_without_tags_keeps_them_and_empty_list_clears_them() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "keep", "tags": [{ "name": "php" }] })),
    )
    .await;
    let uri = format!("/api/articles/{}", created["id"]);

    let (_, kept) = send(&app, "PUT", &uri, Some(json!({ "name": "renamed" }))).await;
    assert_eq!(kept["name"], "renamed");
    assert_eq!(tag_names(&kept), vec!["php"]);

    let (_, cleared) = send(&app, "PUT", &uri, Some(json!({ "name": "renamed", "tags": [] }))).await;
    assert!(tag_names(&cleared).is_empty());
}

#[tokio::test]
async fn update_missing_article_is_not_found() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        "PUT",
        "/api/articles/41",
        Some(json!({ "name": "ghost", "tags": [{ "name": "orphan" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 실패한 수정은 태그도 만들지 않습니다.
    let (_, tags) = send(&app, "GET", "/api/tags", None).await;
    assert!(names(&tags).is_empty());
}

#[tokio::test]
async fn delete_article_keeps_its_tags() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": "gone", "tags": [{ "name": "stays" }] })),
    )
    .await;
    let uri = format!("/api/articles/{}", created["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, tags) = send(&app, "GET", "/api/tags", None).await;
    assert_eq!(names(&tags), vec!["stays"]);
}

#[tokio::test]
async fn invalid_article_payload_is_rejected_with_field_errors() {
    let app = test_app().await;
    let long = "n".repeat(256);

    let (status, body) = send(
        &app,
        "POST",
        "/api/articles",
        Some(json!({ "name": " ", "tags": [{ "name": long }] })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_failed");
    let fields: Vec<&str> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "tags.0.name"]);

    let (_, list) = send(&app, "POST", "/api/articles/list", Some(json!({}))).await;
    assert!(names(&list).is_empty());
}

#[tokio::test]
async fn list_scenario_php_and_js() {
    let app = test_app().await;
    for (name, tags) in [
        ("PHP Tutorial", json!([{ "name": "php" }])),
        ("JS Guide", json!([{ "name": "js" }])),
        ("PHP & JS", json!([{ "name": "php" }, { "name": "js" }])),
    ] {
        send(&app, "POST", "/api/articles", Some(json!({ "name": name, "tags": tags }))).await;
    }
    let (_, tags) = send(&app, "GET", "/api/tags", None).await;
    let js_id = tags[1]["id"].as_i64().unwrap();
    assert_eq!(tags[1]["name"], "js");

    let (status, by_name) =
        send(&app, "POST", "/api/articles/list", Some(json!({ "name": "PHP" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&by_name), vec!["PHP Tutorial", "PHP & JS"]);

    let (_, by_tag) = send(
        &app,
        "POST",
        "/api/articles/list",
        Some(json!({ "tags": [{ "id": js_id }] })),
    )
    .await;
    assert_eq!(names(&by_tag), vec!["JS Guide", "PHP & JS"]);

    let (_, both) = send(
        &app,
        "POST",
        "/api/articles/list",
        Some(json!({ "name": "PHP", "tags": [{ "id": js_id }] })),
    )
    .await;
    assert_eq!(names(&both), vec!["PHP & JS"]);
    assert_eq!(tag_names(&both[0]), vec!["php", "js"]);
}

#[tokio::test]
async fn list_edge_cases() {
    let app = test_app().await;
    send(&app, "POST", "/api/articles", Some(json!({ "name": "PHP Tutorial", "tags": [{ "name": "php" }] }))).await;
    send(&app, "POST", "/api/articles", Some(json!({ "name": "JS Guide" }))).await;

    // 존재하지 않는 태그 ID → 빈 결과, 에러 아님
    let (status, unknown) = send(
        &app,
        "POST",
        "/api/articles/list",
        Some(json!({ "tags": [{ "id": 9999 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&unknown).is_empty());

    // 빈 태그 배열, 공백뿐인 이름, 0인 ID는 조건 없음과 같습니다.
    for body in [
        json!({}),
        json!({ "tags": [] }),
        json!({ "name": "   " }),
        json!({ "tags": [{ "id": 0 }] }),
    ] {
        let (_, list) = send(&app, "POST", "/api/articles/list", Some(body)).await;
        assert_eq!(names(&list), vec!["PHP Tutorial", "JS Guide"]);
    }

    // 이름은 앞뒤 공백을 잘라낸 뒤 대소문자 없이 비교합니다.
    let (_, trimmed) = send(
        &app,
        "POST",
        "/api/articles/list",
        Some(json!({ "name": "  guide " })),
    )
    .await;
    assert_eq!(names(&trimmed), vec!["JS Guide"]);

    // `%`, `_`는 와일드카드가 아니라 글자 그대로 찾습니다.
    let (_, literal) = send(&app, "POST", "/api/articles/list", Some(json!({ "name": "%" }))).await;
    assert!(names(&literal).is_empty());
}
