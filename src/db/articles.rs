//! # 게시글 데이터베이스 쿼리 모듈
//!
//! 게시글 CRUD, 태그 연결, 그리고 목록 필터 조회(`find_by_filter`)를 담당합니다.
//!
//! ## 목록 조회 방식
//! 1. `ArticleFilter`로부터 SELECT 한 문장을 조립해 조건에 맞는 게시글을 가져옵니다.
//! 2. 가져온 게시글들의 태그를 **한 번의 쿼리**로 모아서 붙입니다.
//!    게시글마다 태그를 따로 조회하면(N+1) 목록이 길수록 느려지기 때문입니다.
//!
//! ```sql
//! articles ←── article_tags ──→ tags
//!    (1)          (N:M)          (1)
//! ```

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};

use crate::db::tags::find_or_create_tag;
use crate::error::AppError;
use crate::filter::{fold_case, ArticleFilter, TagMatch};
use crate::models::{Article, ArticleDraft, ArticleWithTags, Tag};

/// `IN (...)`에 한 번에 넣을 최대 ID 개수. SQLite 바인딩 변수 제한보다 한참 작게 잡습니다.
const IN_CHUNK: usize = 500;

/// 관계 테이블과 태그를 JOIN한 한 행
#[derive(sqlx::FromRow)]
struct ArticleTagRow {
    article_id: i64,
    #[sqlx(flatten)]
    tag: Tag,
}

/// 필터에 맞는 게시글을 ID 오름차순으로 조회합니다. 각 게시글에는 태그가 채워져 있습니다.
///
/// - 태그 조건(Any): 주어진 태그 중 하나라도 연결된 게시글 (`EXISTS` 서브쿼리)
/// - 태그 조건(All): 존재하는 태그 전부가 연결된 게시글
/// - 이름 조건: `instr(name_folded, ?) > 0`. LIKE와 달리 `%`, `_`를
///   와일드카드로 해석하지 않는 순수한 부분 문자열 검색입니다.
///   검색어도 `fold_case`로 접어서 넘기므로 `Über`는 `über`로 찾을 수 있습니다.
///
/// 존재하지 않는 태그 ID만 주면 에러가 아니라 빈 목록이 나옵니다.
/// 태그 ID가 몇 개든 바인딩 변수는 JSON 배열 하나뿐이라
/// SQLite의 변수 개수/식 깊이 제한에 걸리지 않습니다.
pub async fn find_by_filter(
    pool: &SqlitePool,
    filter: &ArticleFilter,
) -> Result<Vec<ArticleWithTags>, AppError> {
    // `WHERE 1 = 1`: 뒤에 붙는 조건이 모두 `AND ...` 형태가 되도록 하는 시작점
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT a.id, a.name, a.created_at, a.updated_at FROM articles a WHERE 1 = 1",
    );

    if let Some(ids) = filter.tag_ids() {
        push_tag_condition(&mut qb, ids, filter.tag_match())?;
    }

    if let Some(name) = filter.name() {
        qb.push(" AND instr(a.name_folded, ")
            .push_bind(fold_case(name))
            .push(") > 0");
    }

    qb.push(" ORDER BY a.id ASC");

    let articles = qb.build_query_as::<Article>().fetch_all(pool).await?;
    tracing::debug!(count = articles.len(), ?filter, "articles matched filter");

    with_tags(pool, articles).await
}

/// 태그 조건을 WHERE 절에 붙입니다.
///
/// ID 목록은 `[1,2,3]` 같은 JSON 문자열 하나로 바인딩하고,
/// SQL 안에서 `json_each(?)`로 다시 행(row)으로 펼칩니다.
fn push_tag_condition(
    qb: &mut QueryBuilder<'_, Sqlite>,
    ids: &[i64],
    tag_match: TagMatch,
) -> Result<(), AppError> {
    let ids_json = serde_json::to_string(ids)
        .map_err(|e| AppError::Internal(format!("Failed to encode tag ids: {e}")))?;

    match tag_match {
        TagMatch::Any => {
            // 게시글에 연결된 태그 중 하나라도 목록에 있으면 통과
            qb.push(
                " AND EXISTS (SELECT 1 FROM article_tags link \
                 WHERE link.article_id = a.id \
                 AND link.tag_id IN (SELECT value FROM json_each(",
            )
            .push_bind(ids_json)
            .push(")))");
        }
        TagMatch::All => {
            // (이 게시글에 연결된, 목록 안의 서로 다른 태그 수)
            //   = (목록 안에서 실제로 존재하는 태그 수)
            // 관계 행은 항상 존재하는 태그를 가리키므로(FK), 두 수가 같으면
            // 존재하는 태그를 전부 가진 것입니다. 없는 ID는 양쪽 모두에서 빠집니다.
            qb.push(
                " AND (SELECT COUNT(DISTINCT link.tag_id) FROM article_tags link \
                 WHERE link.article_id = a.id \
                 AND link.tag_id IN (SELECT value FROM json_each(",
            )
            .push_bind(ids_json.clone())
            .push(
                "))) = (SELECT COUNT(*) FROM tags t \
                 WHERE t.id IN (SELECT value FROM json_each(",
            )
            .push_bind(ids_json)
            .push(")))");
        }
    }

    Ok(())
}

/// 게시글 목록에 태그를 붙입니다. 태그는 연결된 순서(관계 행 ID 순)로 정렬됩니다.
async fn with_tags(
    pool: &SqlitePool,
    articles: Vec<Article>,
) -> Result<Vec<ArticleWithTags>, AppError> {
    let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
    let mut tags_by_article: HashMap<i64, Vec<Tag>> = HashMap::new();

    for chunk in ids.chunks(IN_CHUNK) {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT link.article_id, t.id, t.name, t.created_at, t.updated_at \
             FROM article_tags link JOIN tags t ON t.id = link.tag_id \
             WHERE link.article_id IN (",
        );
        let mut in_list = qb.separated(", ");
        for id in chunk {
            in_list.push_bind(*id);
        }
        in_list.push_unseparated(") ORDER BY link.id");

        let rows = qb.build_query_as::<ArticleTagRow>().fetch_all(pool).await?;
        for row in rows {
            tags_by_article.entry(row.article_id).or_default().push(row.tag);
        }
    }

    Ok(articles
        .into_iter()
        .map(|article| {
            let tags = tags_by_article.remove(&article.id).unwrap_or_default();
            ArticleWithTags { article, tags }
        })
        .collect())
}

/// ID로 게시글 행 하나를 조회합니다 (태그 없이).
pub async fn get_article<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Article>, AppError> {
    let article = sqlx::query_as::<_, Article>(
        "SELECT id, name, created_at, updated_at FROM articles WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(article)
}

/// ID로 게시글을 태그와 함께 조회합니다. 없으면 `Ok(None)`.
pub async fn find_article(pool: &SqlitePool, id: i64) -> Result<Option<ArticleWithTags>, AppError> {
    let Some(article) = get_article(pool, id).await? else {
        return Ok(None);
    };

    let mut found = with_tags(pool, vec![article]).await?;
    Ok(found.pop())
}

/// 태그 이름 목록을 게시글에 연결합니다.
///
/// 각 이름은 find-or-create로 태그가 되고, 이미 연결된 태그는 `INSERT OR IGNORE`로
/// 건너뜁니다. 그래서 `["x", "x"]`를 넘겨도 연결은 하나뿐입니다.
pub async fn attach_tags(
    conn: &mut SqliteConnection,
    article_id: i64,
    names: &[String],
) -> Result<(), AppError> {
    for name in names {
        // 1) 같은 이름의 태그가 있으면 그 태그를, 없으면 새로 만든 태그를 받습니다.
        //    `&mut *conn`: 가변 참조를 다시 빌려(reborrow) 반복마다 넘깁니다.
        let tag = find_or_create_tag(&mut *conn, name).await?;

        // 2) 관계 행 삽입. UNIQUE(article_id, tag_id)에 걸리면 조용히 건너뜁니다.
        sqlx::query("INSERT OR IGNORE INTO article_tags (article_id, tag_id) VALUES (?, ?)")
            .bind(article_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// 게시글의 태그 연결을 모두 해제합니다 (태그 자체는 남습니다).
pub async fn detach_all_tags<'e>(
    executor: impl SqliteExecutor<'e>,
    article_id: i64,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM article_tags WHERE article_id = ?")
        .bind(article_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// 새 게시글을 만들고, 태그 목록이 있으면 함께 연결합니다.
///
/// 삽입과 태그 연결은 한 트랜잭션입니다. 중간에 실패하면 게시글도 남지 않습니다.
pub async fn create_article(
    pool: &SqlitePool,
    draft: &ArticleDraft,
) -> Result<ArticleWithTags, AppError> {
    let mut tx = pool.begin().await?;

    let now = Utc::now();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO articles (name, name_folded, created_at, updated_at) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&draft.name)
    .bind(fold_case(&draft.name))
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(names) = &draft.tags {
        attach_tags(&mut *tx, id, names).await?;
    }

    tx.commit().await?;
    tracing::info!(id, name = %draft.name, "article created");

    find_article(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created article".to_string()))
}

/// 게시글 이름을 바꾸고, 태그 목록이 주어지면 연결을 통째로 교체합니다.
///
/// - `draft.tags == None`: 기존 태그 연결 유지
/// - `draft.tags == Some(..)`: 기존 연결을 모두 지운 뒤 새 목록을 연결 (빈 목록이면 태그 없음)
///
/// ## 반환값
/// - `Ok(Some(..))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 게시글이 없음
pub async fn update_article(
    pool: &SqlitePool,
    id: i64,
    draft: &ArticleDraft,
) -> Result<Option<ArticleWithTags>, AppError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE articles SET name = ?, name_folded = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&draft.name)
    .bind(fold_case(&draft.name))
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Ok(None);
    }

    if let Some(names) = &draft.tags {
        let detached = detach_all_tags(&mut *tx, id).await?;
        attach_tags(&mut *tx, id, names).await?;
        tracing::debug!(id, detached, attached = names.len(), "article tags replaced");
    }

    tx.commit().await?;

    find_article(pool, id).await
}

/// 게시글을 삭제합니다. 관계 행은 CASCADE로 사라지고 태그는 남습니다.
pub async fn delete_article(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
