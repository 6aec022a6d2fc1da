use serde::Deserialize;

use crate::routing::{
    Action,
    BackendConfig,
    HeaderRule,
    PathMatcher,
    PathMatcherKind,
    Rule,
};
use super::{Result, SettingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    PassThrough,
    #[default]
    Rewrite,
    RewriteWithHeaders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderSource {
    Host,
    Scheme,
}

/// 재작성 시 추가할 헤더 설정. `value`와 `from` 중 하나만 지정합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderSettings {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub from: Option<HeaderSource>,
}

/// 설정 파일의 `[[rules]]` 항목
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSettings {
    #[serde(default)]
    pub name: Option<String>,

    /// 생략하면 패턴 축약 표기(`^...`, `/x*`)로 판단
    #[serde(rename = "match", default)]
    pub kind: Option<PathMatcherKind>,

    pub pattern: String,

    #[serde(default)]
    pub action: ActionKind,

    /// 이 규칙에만 적용할 백엔드 URL
    #[serde(default)]
    pub backend: Option<String>,

    #[serde(default)]
    pub headers: Vec<HeaderSettings>,
}

impl HeaderSettings {
    fn to_header_rule(&self) -> Result<HeaderRule> {
        let rule = match (&self.value, self.from) {
            (Some(value), None) => HeaderRule::fixed(&self.name, value)?,
            (None, Some(HeaderSource::Host)) => HeaderRule::request_host(&self.name)?,
            (None, Some(HeaderSource::Scheme)) => HeaderRule::request_scheme(&self.name)?,
            _ => {
                return Err(SettingsError::InvalidConfig(format!(
                    "헤더 '{}'에는 value 또는 from 중 하나만 지정해야 합니다",
                    self.name
                )))
            }
        };
        Ok(rule)
    }
}

impl RuleSettings {
    pub fn to_rule(&self) -> Result<Rule> {
        let matcher = match self.kind {
            Some(kind) => PathMatcher::new(kind, self.pattern.as_str())?,
            None => self.pattern.parse::<PathMatcher>()?,
        };

        let base_override = self.backend
            .as_deref()
            .map(BackendConfig::new)
            .transpose()?;

        let action = match self.action {
            ActionKind::PassThrough => {
                if base_override.is_some() || !self.headers.is_empty() {
                    return Err(self.invalid("pass-through 규칙에는 backend나 headers를 지정할 수 없습니다"));
                }
                Action::PassThrough
            }
            ActionKind::Rewrite => {
                if !self.headers.is_empty() {
                    return Err(self.invalid("헤더를 추가하려면 rewrite-with-headers를 사용하세요"));
                }
                Action::Rewrite { base_override }
            }
            ActionKind::RewriteWithHeaders => {
                let headers = self.headers
                    .iter()
                    .map(HeaderSettings::to_header_rule)
                    .collect::<Result<Vec<_>>>()?;
                Action::RewriteWithHeaders { base_override, headers }
            }
        };

        Ok(Rule {
            name: self.name.clone(),
            matcher,
            action,
        })
    }

    fn invalid(&self, reason: &str) -> SettingsError {
        SettingsError::InvalidConfig(format!("규칙 '{}': {}", self.pattern, reason))
    }
}
