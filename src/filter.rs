//! # 게시글 목록 필터
//!
//! `POST /api/articles/list` 요청에서 만들어지는 불변 조회 조건입니다.
//! 두 조건 모두 선택 사항이며, 비어 있으면 "이 기준으로는 거르지 않음"을 뜻합니다.
//!
//! - `name`: 게시글 이름에 포함되어야 하는 부분 문자열 (대소문자 무시)
//! - `tag_ids`: 태그 ID 집합. 기본은 **하나라도** 붙어 있으면 통과(OR)
//!
//! 두 조건이 함께 있으면 둘 다 만족해야 합니다(AND).
//!
//! 같은 조건을 SQL(`db::articles::find_by_filter`)과 메모리
//! (`ArticleFilter::matches`) 두 곳에서 평가하므로, 둘의 의미가 항상 같아야 합니다.

use std::collections::HashSet;

use crate::models::{ArticleListRequest, ArticleWithTags};

/// 태그 ID 여러 개를 어떻게 결합할지
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagMatch {
    /// 주어진 태그 중 하나라도 붙어 있으면 통과 (목록 API가 쓰는 방식)
    #[default]
    Any,
    /// 주어진 태그 중 실제로 존재하는 태그를 모두 가지고 있어야 통과.
    /// 존재하지 않는 ID는 조건에서 빠집니다.
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    name: Option<String>,
    tag_ids: Option<Vec<i64>>,
    tag_match: TagMatch,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 목록 요청 본문을 필터로 바꿉니다.
    ///
    /// - `tags[*].id` 중 0 이하인 값은 버리고, 남는 게 없으면 태그 조건을 두지 않습니다.
    /// - `name`은 앞뒤 공백을 잘라낸 뒤 비어 있으면 이름 조건을 두지 않습니다.
    pub fn from_list_request(req: &ArticleListRequest) -> Self {
        let mut filter = Self::new();

        if let Some(tags) = &req.tags {
            let ids: Vec<i64> = tags.iter().map(|t| t.id).filter(|id| *id > 0).collect();
            filter = filter.with_tag_ids(ids);
        }

        if let Some(name) = &req.name {
            filter = filter.with_name(name.trim());
        }

        filter
    }

    /// 이름 조건. 빈 문자열이면 조건을 지웁니다.
    ///
    /// 공백 제거는 호출하는 쪽의 몫입니다. 여기서는 받은 문자열을 그대로 씁니다.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    /// 태그 ID 조건. 빈 목록은 "조건 없음"과 같습니다.
    pub fn with_tag_ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let ids: Vec<i64> = ids.into_iter().collect();
        self.tag_ids = (!ids.is_empty()).then_some(ids);
        self
    }

    pub fn with_tag_match(mut self, tag_match: TagMatch) -> Self {
        self.tag_match = tag_match;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tag_ids(&self) -> Option<&[i64]> {
        self.tag_ids.as_deref()
    }

    pub fn tag_match(&self) -> TagMatch {
        self.tag_match
    }

    /// 아무 조건도 없는 필터인지
    pub fn is_unfiltered(&self) -> bool {
        self.name.is_none() && self.tag_ids.is_none()
    }

    /// 메모리 위의 게시글 하나가 이 필터를 통과하는지 평가합니다.
    ///
    /// `existing_tags`는 저장소에 실제로 있는 태그 ID 집합이며 `TagMatch::All`에서만 쓰입니다.
    pub fn matches(&self, article: &ArticleWithTags, existing_tags: &HashSet<i64>) -> bool {
        self.matches_tags(article, existing_tags) && self.matches_name(article)
    }

    fn matches_tags(&self, article: &ArticleWithTags, existing_tags: &HashSet<i64>) -> bool {
        let Some(ids) = self.tag_ids() else {
            return true;
        };
        match self.tag_match {
            TagMatch::Any => ids.iter().any(|id| article.has_tag(*id)),
            TagMatch::All => ids
                .iter()
                .filter(|id| existing_tags.contains(*id))
                .all(|id| article.has_tag(*id)),
        }
    }

    fn matches_name(&self, article: &ArticleWithTags) -> bool {
        match self.name() {
            Some(needle) => fold_case(article.name()).contains(&fold_case(needle)),
            None => true,
        }
    }
}

/// 이름 비교용 대소문자 접기(case folding).
///
/// 유니코드 소문자 규칙(`str::to_lowercase`)을 씁니다. `Über`와 `über`, `ΣΟΦΊΑ`와
/// `σοφία`가 같은 값이 됩니다. SQLite의 `lower()`는 ASCII만 바꾸므로 DB에는
/// 이 함수로 접은 값을 `articles.name_folded`에 따로 저장하고, 메모리 저장소도
/// 같은 함수로 비교합니다.
pub fn fold_case(name: &str) -> String {
    name.to_lowercase()
}
