use std::sync::Arc;

use tracing::debug;

use crate::routing::{Action, PathMatcher};

/// 매처와 동작의 쌍입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: Option<String>,
    pub matcher: PathMatcher,
    pub action: Action,
}

impl Rule {
    pub fn new(matcher: PathMatcher, action: Action) -> Self {
        Self { name: None, matcher, action }
    }

    pub fn named(name: impl Into<String>, matcher: PathMatcher, action: Action) -> Self {
        Self { name: Some(name.into()), matcher, action }
    }

    /// 로그용 식별자. 이름이 없으면 매처 표현을 사용합니다.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.matcher.to_string(),
        }
    }
}

/// 순서가 있는 라우팅 규칙 테이블입니다.
///
/// 삽입 순서가 평가 순서이며 처음 매칭된 규칙이 이깁니다.
/// 생성 후에는 변경할 수 없고, 설정이 바뀌면 테이블 전체를 새로 만듭니다.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Arc<Vec<Rule>>,
}

impl RuleTable {
    /// 빈 테이블. 모든 요청이 기본 동작(백엔드 재작성)을 따릅니다.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// 경로에 처음으로 매칭되는 규칙을 찾습니다.
    ///
    /// `None`은 에러가 아니며 호출 측이 기본 동작을 적용합니다.
    pub fn match_path(&self, path: &str) -> Option<&Rule> {
        let matched = self.rules.iter().find(|rule| rule.matcher.matches(path));
        debug!(path = %path, rule = ?matched.map(Rule::label), "규칙 테이블 조회");
        matched
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: Arc::new(iter.into_iter().collect()),
        }
    }
}

/// 테이블 생성 전용 빌더. `build()` 이후에는 규칙을 추가할 수 없습니다.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    rules: Vec<Rule>,
}

impl RuleTableBuilder {
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn add(mut self, matcher: PathMatcher, action: Action) -> Self {
        self.rules.push(Rule::new(matcher, action));
        self
    }

    pub fn extend<I: IntoIterator<Item = Rule>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> RuleTable {
        RuleTable {
            rules: Arc::new(self.rules),
        }
    }
}
