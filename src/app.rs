//! # 라우터 조립
//!
//! `main`과 통합 테스트가 같은 라우터를 쓰도록 여기서 한 번만 조립합니다.
//! 모든 API는 `/api` 아래에 중첩됩니다.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::debug_hash;
use crate::routes::{self, AppState};

/// 전체 라우터를 만듭니다.
///
/// Axum 0.8부터 경로 변수는 `:id`가 아니라 `{id}`로 씁니다.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/info", get(routes::info))
        .route("/health", get(routes::health_check))
        // 게시글(Article) API
        .route("/articles", post(routes::create_article))
        .route("/articles/list", post(routes::list_articles))
        .route(
            "/articles/{id}",
            get(routes::get_article)
                .put(routes::update_article)
                .delete(routes::delete_article),
        )
        // 태그(Tag) API
        .route("/tags", get(routes::list_tags).post(routes::create_tag))
        .route(
            "/tags/{id}",
            get(routes::get_tag)
                .put(routes::update_tag)
                .delete(routes::delete_tag),
        )
        .with_state(state);

    // 개발 편의를 위해 모든 출처를 허용합니다. 배포 시에는 출처를 좁혀야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 레이어는 나중에 붙인 것이 바깥쪽입니다.
    // 요청: Trace → CORS → debug_hash → 핸들러, 응답은 그 역순
    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn(debug_hash))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
