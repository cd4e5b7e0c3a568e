//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD와 "이름으로 찾고 없으면 만들기"(find-or-create) 쿼리입니다.
//!
//! 쿼리 하나로 끝나는 함수는 `impl SqliteExecutor`를 받습니다.
//! 연결 풀(`&SqlitePool`)과 트랜잭션(`&mut *tx`) 어느 쪽이든 넘길 수 있다는 뜻입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name UNIQUE, created_at, updated_at)
//! - `article_tags`: 게시글과 태그의 다대다(N:M) 관계 테이블.
//!   태그가 삭제되면 `ON DELETE CASCADE`로 관계 행도 함께 삭제됩니다.

use chrono::Utc;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use crate::error::AppError;
use crate::models::Tag;

/// 모든 태그를 ID 순으로 조회합니다.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT id, name, created_at, updated_at FROM tags ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// ID로 태그 하나를 조회합니다. 없으면 `Ok(None)`.
pub async fn get_tag<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, name, created_at, updated_at FROM tags WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(tag)
}

/// 이름이 정확히 일치하는 태그를 찾습니다 (대소문자 구분, 공백 제거 없음).
pub async fn find_tag_by_name<'e>(
    executor: impl SqliteExecutor<'e>,
    name: &str,
) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, name, created_at, updated_at FROM tags WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(executor)
    .await?;

    Ok(tag)
}

/// 같은 이름의 태그가 이미 있는지 확인합니다.
///
/// `except_id`를 주면 그 태그 자신은 제외합니다 (이름을 그대로 두고 수정하는 경우).
pub async fn name_taken<'e>(
    executor: impl SqliteExecutor<'e>,
    name: &str,
    except_id: Option<i64>,
) -> Result<bool, AppError> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM tags WHERE name = ? AND (? IS NULL OR id <> ?))",
    )
    .bind(name)
    .bind(except_id)
    .bind(except_id)
    .fetch_one(executor)
    .await?;

    Ok(taken)
}

/// 태그 행을 삽입하고 삽입된 행을 돌려줍니다.
///
/// UNIQUE 제약에 걸리면 `AppError::DuplicateName`이 됩니다.
pub async fn insert_tag<'e>(executor: impl SqliteExecutor<'e>, name: &str) -> Result<Tag, AppError> {
    let now = Utc::now();
    sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (name, created_at, updated_at)
        VALUES (?, ?, ?)
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::from_tag_write(e, name))
}

/// 이름으로 태그를 찾고, 없으면 새로 만듭니다.
///
/// 게시글 생성/수정 트랜잭션 안에서 호출됩니다.
pub async fn find_or_create_tag(conn: &mut SqliteConnection, name: &str) -> Result<Tag, AppError> {
    if let Some(tag) = find_tag_by_name(&mut *conn, name).await? {
        return Ok(tag);
    }

    tracing::debug!(name, "creating tag on first use");
    insert_tag(&mut *conn, name).await
}

/// 새 태그를 만듭니다.
///
/// 중복 검사와 삽입을 한 트랜잭션에서 실행합니다. 검사를 통과한 뒤에 다른 요청이
/// 같은 이름을 먼저 넣었다면 UNIQUE 제약이 최종적으로 막아 줍니다.
pub async fn create_tag(pool: &SqlitePool, name: &str) -> Result<Tag, AppError> {
    let mut tx = pool.begin().await?;

    if name_taken(&mut *tx, name, None).await? {
        return Err(AppError::DuplicateName(name.to_string()));
    }
    let tag = insert_tag(&mut *tx, name).await?;

    tx.commit().await?;
    tracing::info!(id = tag.id, name = %tag.name, "tag created");
    Ok(tag)
}

/// 태그 이름을 바꿉니다.
///
/// ## 반환값
/// - `Ok(Some(Tag))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 태그가 없음
/// - `Err(DuplicateName)`: 다른 태그가 이미 그 이름을 쓰고 있음
pub async fn update_tag(pool: &SqlitePool, id: i64, name: &str) -> Result<Option<Tag>, AppError> {
    let mut tx = pool.begin().await?;

    if get_tag(&mut *tx, id).await?.is_none() {
        return Ok(None);
    }
    if name_taken(&mut *tx, name, Some(id)).await? {
        return Err(AppError::DuplicateName(name.to_string()));
    }

    let tag = sqlx::query_as::<_, Tag>(
        r#"
        UPDATE tags SET name = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| AppError::from_tag_write(e, name))?;

    tx.commit().await?;
    Ok(tag)
}

/// ID로 태그를 삭제합니다.
///
/// 관계 행은 CASCADE로 사라지고, 태그가 붙어 있던 게시글은 그대로 남습니다.
/// 삭제된 행이 없으면 `false`.
pub async fn delete_tag(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
