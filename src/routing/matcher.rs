use std::fmt;
use std::str::FromStr;

use regex_lite as regex;
use serde::Deserialize;

use crate::routing::error::RoutingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatcherKind {
    Exact,
    Prefix,
    Regex,
}

/// 요청 경로(쿼리 제외)를 검사하는 매처입니다.
///
/// 대소문자를 구분하며 trailing slash 정규화는 하지 않습니다.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pub kind: PathMatcherKind,
    pub pattern: String,
    regex: Option<regex::Regex>,
}

impl PathMatcher {
    pub fn exact(pattern: impl Into<String>) -> Result<Self, RoutingError> {
        Self::new(PathMatcherKind::Exact, pattern)
    }

    pub fn prefix(pattern: impl Into<String>) -> Result<Self, RoutingError> {
        Self::new(PathMatcherKind::Prefix, pattern)
    }

    /// 정규식 매처를 생성합니다.
    ///
    /// 항상 경로 전체에 고정(anchor)됩니다. 패턴 안의 `^`, `$`는 그대로 두어도 무해하며,
    /// 부분 일치가 필요하면 `.*`를 직접 붙입니다.
    pub fn regex(pattern: impl Into<String>) -> Result<Self, RoutingError> {
        Self::new(PathMatcherKind::Regex, pattern)
    }

    pub fn new(kind: PathMatcherKind, pattern: impl Into<String>) -> Result<Self, RoutingError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(RoutingError::InvalidPathPattern {
                pattern,
                reason: "빈 패턴".to_string(),
            });
        }

        let regex = match kind {
            PathMatcherKind::Regex => Some(compile_anchored(&pattern)?),
            _ => None,
        };

        Ok(PathMatcher { kind, pattern, regex })
    }

    pub fn matches(&self, path: &str) -> bool {
        match self.kind {
            PathMatcherKind::Exact => self.pattern == path,
            PathMatcherKind::Prefix => path.starts_with(&self.pattern),
            PathMatcherKind::Regex => self.regex.as_ref()
                .map(|r| r.is_match(path))
                .unwrap_or(false),
        }
    }
}

fn compile_anchored(pattern: &str) -> Result<regex::Regex, RoutingError> {
    let source = format!("^(?:{})$", pattern);

    regex::Regex::new(&source).map_err(|e| RoutingError::InvalidPathPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// 축약 표기를 해석합니다.
///
/// * `^...` - 정규식
/// * `/api*` - `/api` 접두사
/// * 그 외 - 정확히 일치
impl FromStr for PathMatcher {
    type Err = RoutingError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        if pattern.starts_with('^') {
            PathMatcher::regex(pattern)
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            PathMatcher::prefix(prefix)
        } else {
            PathMatcher::exact(pattern)
        }
    }
}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PathMatcherKind::Exact => write!(f, "exact({})", self.pattern),
            PathMatcherKind::Prefix => write!(f, "prefix({})", self.pattern),
            PathMatcherKind::Regex => write!(f, "regex({})", self.pattern),
        }
    }
}

impl PartialEq for PathMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.pattern == other.pattern
    }
}

impl Eq for PathMatcher {}
