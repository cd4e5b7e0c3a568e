//! 여러 단계로 이루어진 쓰기(게시글 + 태그 생성 + 연결)가 중간에 실패하면
//! 아무것도 남지 않는지 확인합니다.
//!
//! `boom`이라는 이름의 태그 삽입을 거부하는 트리거를 설치해서,
//! 태그 연결 도중에 DB 에러가 나도록 만듭니다.

use tagboard::{
    db,
    error::AppError,
    filter::ArticleFilter,
    models::ArticleDraft,
    repository::{Repository, SqliteRepository},
};

async fn repo_with_failing_tag() -> SqliteRepository {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    sqlx::query(
        "CREATE TRIGGER reject_boom_tag BEFORE INSERT ON tags \
         WHEN NEW.name = 'boom' \
         BEGIN SELECT RAISE(ABORT, 'boom'); END",
    )
    .execute(&pool)
    .await
    .unwrap();
    SqliteRepository::new(pool)
}

async fn tag_names(repo: &SqliteRepository) -> Vec<String> {
    repo.list_tags()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect()
}

#[tokio::test]
async fn failed_create_leaves_nothing_behind() {
    let repo = repo_with_failing_tag().await;

    let err = repo
        .create_article(&ArticleDraft::new("half done").with_tags(["ok", "boom"]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    assert!(repo.find_articles(&ArticleFilter::new()).await.unwrap().is_empty());
    assert!(tag_names(&repo).await.is_empty());

    // 실패 뒤에도 같은 연결로 정상 쓰기가 됩니다.
    let created = repo
        .create_article(&ArticleDraft::new("fine").with_tags(["ok"]))
        .await
        .unwrap();
    assert_eq!(created.tags.len(), 1);
}

#[tokio::test]
async fn failed_update_keeps_previous_state() {
    let repo = repo_with_failing_tag().await;
    let created = repo
        .create_article(&ArticleDraft::new("keep").with_tags(["old"]))
        .await
        .unwrap();

    let result = repo
        .update_article(
            created.id(),
            &ArticleDraft::new("renamed").with_tags(["ok", "boom"]),
        )
        .await;
    assert!(result.is_err());

    let current = repo.find_article(created.id()).await.unwrap().unwrap();
    assert_eq!(current.name(), "keep");
    let names: Vec<&str> = current.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["old"]);
    assert_eq!(tag_names(&repo).await, vec!["old"]);

    // 이름 검색도 이전 이름 기준 그대로입니다.
    let renamed = repo
        .find_articles(&ArticleFilter::new().with_name("renamed"))
        .await
        .unwrap();
    assert!(renamed.is_empty());
}
