//! # tagboard 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션
//! 4. 저장소를 AppState에 주입하고 라우터 조립
//! 5. HTTP 서버 시작

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use tagboard::{
    app::build_router,
    config::Config,
    db,
    repository::SqliteRepository,
    routes::AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 tagboard, tower_http, axum을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagboard=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting tagboard server on {}", config.bind_addr());

    // ── 4단계: 연결 풀 + 마이그레이션 ──
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    // ── 5단계: 의존성 주입 ──
    // 전역 레지스트리 없이, 여기서 만든 저장소를 상태로 넘기는 것이 전부입니다.
    let state = AppState::new(SqliteRepository::new(pool));
    let app = build_router(state);

    // ── 6단계: 서버 시작 ──
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
