//! # 메모리 저장소 (MemoryRepository)
//!
//! DB 없이 `Vec`/`BTreeMap`만으로 동작하는 저장소입니다.
//!
//! SQLite 구현과 같은 규칙을 따릅니다.
//! - 태그 이름은 전체에서 유일
//! - 같은 (게시글, 태그) 연결은 한 번만
//! - 게시글/태그 삭제 시 관계만 함께 삭제 (CASCADE)
//! - 여러 단계로 이루어진 쓰기는 복사본에서 실행한 뒤 성공하면 통째로 바꿔 끼웁니다
//!   (트랜잭션과 같은 효과)

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::Repository;
use crate::error::AppError;
use crate::filter::ArticleFilter;
use crate::models::{Article, ArticleDraft, ArticleWithTags, Tag};

#[derive(Debug, Clone, Copy)]
struct Link {
    article_id: i64,
    tag_id: i64,
}

#[derive(Debug, Clone, Default)]
struct State {
    last_article_id: i64,
    last_tag_id: i64,
    articles: BTreeMap<i64, Article>,
    tags: BTreeMap<i64, Tag>,
    /// 연결된 순서대로 쌓입니다 (관계 행 ID 순서와 같음)
    links: Vec<Link>,
}

impl State {
    fn tags_of(&self, article_id: i64) -> Vec<Tag> {
        self.links
            .iter()
            .filter(|link| link.article_id == article_id)
            .filter_map(|link| self.tags.get(&link.tag_id).cloned())
            .collect()
    }

    fn load(&self, article: &Article) -> ArticleWithTags {
        ArticleWithTags {
            article: article.clone(),
            tags: self.tags_of(article.id),
        }
    }

    fn name_taken(&self, name: &str, except_id: Option<i64>) -> bool {
        self.tags
            .values()
            .any(|t| t.name == name && Some(t.id) != except_id)
    }

    fn insert_tag(&mut self, name: &str) -> Tag {
        self.last_tag_id += 1;
        let now = Utc::now();
        let tag = Tag {
            id: self.last_tag_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tags.insert(tag.id, tag.clone());
        tag
    }

    fn find_or_create_tag(&mut self, name: &str) -> Tag {
        match self.tags.values().find(|t| t.name == name) {
            Some(tag) => tag.clone(),
            None => self.insert_tag(name),
        }
    }

    fn attach_tags(&mut self, article_id: i64, names: &[String]) {
        for name in names {
            let tag = self.find_or_create_tag(name);
            let linked = self
                .links
                .iter()
                .any(|l| l.article_id == article_id && l.tag_id == tag.id);
            if !linked {
                self.links.push(Link {
                    article_id,
                    tag_id: tag.id,
                });
            }
        }
    }
}

/// 테스트와 로컬 실험용 저장소.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_article(&self, id: i64) -> Result<Option<ArticleWithTags>, AppError> {
        let state = self.state.lock().await;
        Ok(state.articles.get(&id).map(|a| state.load(a)))
    }

    async fn find_articles(
        &self,
        filter: &ArticleFilter,
    ) -> Result<Vec<ArticleWithTags>, AppError> {
        let state = self.state.lock().await;
        let existing: HashSet<i64> = state.tags.keys().copied().collect();

        Ok(state
            .articles
            .values()
            .map(|a| state.load(a))
            .filter(|a| filter.matches(a, &existing))
            .collect())
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleWithTags, AppError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();

        next.last_article_id += 1;
        let now = Utc::now();
        let article = Article {
            id: next.last_article_id,
            name: draft.name.clone(),
            created_at: now,
            updated_at: now,
        };
        next.articles.insert(article.id, article.clone());
        if let Some(names) = &draft.tags {
            next.attach_tags(article.id, names);
        }

        *state = next;
        Ok(state.load(&article))
    }

    async fn update_article(
        &self,
        id: i64,
        draft: &ArticleDraft,
    ) -> Result<Option<ArticleWithTags>, AppError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();

        // 없는 게시글이면 복사본을 버리고 끝납니다 (상태는 그대로).
        let Some(article) = next.articles.get_mut(&id) else {
            return Ok(None);
        };
        article.name = draft.name.clone();
        article.updated_at = Utc::now();
        let article = article.clone();

        if let Some(names) = &draft.tags {
            next.links.retain(|l| l.article_id != id);
            next.attach_tags(id, names);
        }

        *state = next;
        Ok(Some(state.load(&article)))
    }

    async fn delete_article(&self, id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        let removed = state.articles.remove(&id).is_some();
        if removed {
            state.links.retain(|l| l.article_id != id);
        }
        Ok(removed)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        let state = self.state.lock().await;
        Ok(state.tags.values().cloned().collect())
    }

    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let state = self.state.lock().await;
        Ok(state.tags.get(&id).cloned())
    }

    async fn create_tag(&self, name: &str) -> Result<Tag, AppError> {
        let mut state = self.state.lock().await;
        if state.name_taken(name, None) {
            return Err(AppError::DuplicateName(name.to_string()));
        }
        Ok(state.insert_tag(name))
    }

    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, AppError> {
        let mut state = self.state.lock().await;
        if !state.tags.contains_key(&id) {
            return Ok(None);
        }
        if state.name_taken(name, Some(id)) {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        Ok(state.tags.get_mut(&id).map(|tag| {
            tag.name = name.to_string();
            tag.updated_at = Utc::now();
            tag.clone()
        }))
    }

    async fn delete_tag(&self, id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        let removed = state.tags.remove(&id).is_some();
        if removed {
            state.links.retain(|l| l.tag_id != id);
        }
        Ok(removed)
    }
}
