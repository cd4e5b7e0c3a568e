//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! SQLite와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! `repository::SqliteRepository`가 이 함수들을 호출합니다.
//!
//! 각 하위 모듈:
//! - `articles`: 게시글 CRUD, 태그 연결, 목록 필터 조회
//! - `tags`: 태그 CRUD 및 find-or-create

pub mod articles;
pub mod tags;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite 연결 풀을 만들고 마이그레이션을 실행합니다.
///
/// 관계 테이블의 CASCADE가 동작하려면 연결마다 외래 키 검사가 켜져 있어야 합니다.
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 `max_connections`를 1로 주세요.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
